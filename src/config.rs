// src/config.rs
use std::ffi::OsString;
use std::str::FromStr;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};

use crate::error::ConfigError;

pub const SECRET_ENV: &str = "RUSTY_CLAIMS_SECRET";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ConfigError::InvalidArgument {
                name: "format",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Inspect {
        token: String,
        secret: Option<String>,
    },
    Issue {
        secret: String,
        subject: Option<String>,
        issuer: Option<String>,
        audience: Vec<String>,
        identifier: Option<String>,
        ttl: Option<i64>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub command: Command,
    pub format: OutputFormat,
    pub verbose: bool,
}

impl Config {
    pub fn app() -> App<'static, 'static> {
        App::new("rusty_claims")
            .version("1.0")
            .about("Inspects and issues JWT claim sets")
            .setting(AppSettings::SubcommandRequiredElseHelp)
            .subcommand(with_common_args(
                SubCommand::with_name("inspect")
                    .about("Decodes a token and shows its claims")
                    .arg(
                        Arg::with_name("token")
                            .help("The JWT token to inspect")
                            .required(true)
                            .index(1),
                    )
                    .arg(secret_arg().help("Verify the HMAC signature with this secret")),
            ))
            .subcommand(with_common_args(
                SubCommand::with_name("issue")
                    .about("Builds a claim set and signs it with HS256")
                    .arg(secret_arg().help("The HMAC secret used for signing"))
                    .arg(value_arg("sub", "subject"))
                    .arg(value_arg("iss", "issuer"))
                    .arg(value_arg("jti", "identifier"))
                    .arg(
                        value_arg("aud", "audience")
                            .multiple(true)
                            .number_of_values(1),
                    )
                    .arg(value_arg("ttl", "lifetime in seconds, sets exp")),
            ))
    }

    pub fn from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::app().get_matches_from_safe(args)?;
        Self::from_matches(&matches)
    }

    pub fn from_matches(matches: &ArgMatches) -> Result<Self, ConfigError> {
        let (name, sub) = matches.subcommand();
        let sub = sub.ok_or(ConfigError::MissingArgument("subcommand"))?;
        let command = match name {
            "inspect" => Command::Inspect {
                token: sub
                    .value_of("token")
                    .ok_or(ConfigError::MissingArgument("token"))?
                    .to_string(),
                secret: sub.value_of("secret").map(String::from),
            },
            "issue" => Command::Issue {
                secret: sub
                    .value_of("secret")
                    .ok_or(ConfigError::MissingArgument("secret"))?
                    .to_string(),
                subject: sub.value_of("sub").map(String::from),
                issuer: sub.value_of("iss").map(String::from),
                audience: sub
                    .values_of("aud")
                    .map(|values| values.map(String::from).collect())
                    .unwrap_or_default(),
                identifier: sub.value_of("jti").map(String::from),
                ttl: sub.value_of("ttl").map(parse_ttl).transpose()?,
            },
            other => {
                return Err(ConfigError::InvalidArgument {
                    name: "subcommand",
                    value: other.to_string(),
                })
            }
        };

        Ok(Config {
            command,
            format: sub.value_of("format").unwrap_or("text").parse()?,
            verbose: sub.is_present("verbose"),
        })
    }
}

fn with_common_args(app: App<'static, 'static>) -> App<'static, 'static> {
    app.arg(
        Arg::with_name("format")
            .help("The output format (text, json)")
            .short("f")
            .long("format")
            .takes_value(true)
            .possible_values(&["text", "json"])
            .default_value("text"),
    )
    .arg(
        Arg::with_name("verbose")
            .help("Enables debug logging")
            .short("v")
            .long("verbose"),
    )
}

fn secret_arg() -> Arg<'static, 'static> {
    Arg::with_name("secret")
        .short("s")
        .long("secret")
        .takes_value(true)
        .env(SECRET_ENV)
}

fn value_arg(name: &'static str, help: &'static str) -> Arg<'static, 'static> {
    Arg::with_name(name).long(name).takes_value(true).help(help)
}

fn parse_ttl(value: &str) -> Result<i64, ConfigError> {
    value
        .parse::<i64>()
        .ok()
        .filter(|ttl| *ttl >= 0)
        .ok_or_else(|| ConfigError::InvalidArgument {
            name: "ttl",
            value: value.to_string(),
        })
}
