use colored::*;
use serde_json::json;

use crate::config::OutputFormat;
use crate::types::Output;

pub fn render_text(output: &Output) -> String {
    let mut report = String::new();
    report.push_str(&"Token header values:\n".yellow());
    if let Some(header) = output.header.as_object() {
        for (key, value) in header {
            report.push_str(&format!("[+] {} = {}\n", key, value.to_string().bright_blue()));
        }
    }

    report.push_str(&"\nReserved claims:\n".yellow());
    for claim in &output.reserved {
        if let Some(value) = &claim.value {
            report.push_str(&format!(
                "[+] {} ({}) = {}\n",
                claim.key,
                claim.label,
                value.bright_blue()
            ));
        }
    }

    if !output.custom.is_empty() {
        report.push_str(&"\nCustom claims:\n".yellow());
        for (key, value) in &output.custom {
            report.push_str(&format!("[+] {} = {}\n", key, value.to_string().bright_blue()));
        }
    }

    match output.verified {
        Some(true) => report.push_str(&format!("\n{} Signature verified\n", "[!]".green())),
        Some(false) => report.push_str(&format!("\n{} Signature does not match\n", "[-]".red())),
        None => {}
    }
    report
}

pub fn print_output(format: OutputFormat, output: &Output) -> Result<(), serde_json::Error> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(output)?),
        OutputFormat::Text => print!("{}", render_text(output)),
    }
    Ok(())
}

pub fn print_issued(format: OutputFormat, token: &str) {
    match format {
        OutputFormat::Json => println!("{}", json!({ "token": token })),
        OutputFormat::Text => println!("{}", token),
    }
}
