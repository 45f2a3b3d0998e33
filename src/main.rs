use std::error::Error;

use chrono::Utc;
use colored::*;
use tracing_subscriber::EnvFilter;

use rusty_claims::config::{Command, Config};
use rusty_claims::helpers::print_output::{print_issued, print_output};
use rusty_claims::jwt_core::{IssueRequest, TokenInspector};

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let matches = Config::app().get_matches();
    let config = Config::from_matches(&matches)?;
    init_logging(config.verbose);

    let inspector = TokenInspector::new();

    match config.command {
        Command::Inspect { token, secret } => match inspector.inspect(&token, secret.as_deref()) {
            Ok(output) => print_output(config.format, &output)?,
            Err(e) => {
                eprintln!("{} Error inspecting token: {}", "[!]".red(), e.to_string().red());
                std::process::exit(1);
            }
        },
        Command::Issue {
            secret,
            subject,
            issuer,
            audience,
            identifier,
            ttl,
        } => {
            let request = IssueRequest {
                subject,
                issuer,
                audience,
                identifier,
                ttl,
            };
            let token = inspector.issue(&request, &secret, Utc::now())?;
            print_issued(config.format, &token);
        }
    }

    Ok(())
}
