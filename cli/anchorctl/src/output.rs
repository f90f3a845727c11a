//! Output formatting for CLI commands.

use colored::Colorize;
use serde::Serialize;

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON.
    Json,
}

/// Pretty-print a value as JSON.
pub fn print_json<T: Serialize>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "Success:".green().bold(), message);
}

/// Print a `key: value` line with a dimmed placeholder for empty values.
pub fn print_field(key: &str, value: &str) {
    if value.is_empty() {
        println!("{}: {}", key.bold(), "-".dimmed());
    } else {
        println!("{}: {}", key.bold(), value);
    }
}
