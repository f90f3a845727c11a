//! CLI commands.

mod import;
mod schema;
mod write_back;

use anchor_identity::{CancellationToken, IdentityMap};
use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::Value;

use crate::config::AmbientArgs;
use crate::error::CliError;
use crate::logging;
use crate::output::OutputFormat;

/// anchorctl - resolve and inspect resource identities.
#[derive(Debug, Parser)]
#[command(name = "anchorctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log filter used when RUST_LOG is unset.
    #[arg(
        long,
        global = true,
        env = "ANCHOR_LOG_LEVEL",
        default_value = logging::DEFAULT_LOG_LEVEL
    )]
    log_level: String,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(flatten)]
    ambient: AmbientArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the identity schema for a descriptor.
    Schema(schema::SchemaCommand),

    /// Resolve resource state from an import ID or identity attributes.
    Import(import::ImportCommand),

    /// Compute the identity record written after create.
    WriteBack(write_back::WriteBackCommand),

    /// Show CLI version.
    Version,
}

impl Cli {
    /// Run the CLI command.
    pub fn run(self) -> Result<()> {
        logging::init(&self.log_level, self.log_json)?;

        let ctx = CommandContext {
            format: self.format,
            ambient: self.ambient,
            cancel: CancellationToken::new(),
        };

        match self.command {
            Commands::Schema(cmd) => cmd.run(ctx),
            Commands::Import(cmd) => cmd.run(ctx),
            Commands::WriteBack(cmd) => cmd.run(ctx),
            Commands::Version => {
                println!("anchorctl {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub format: OutputFormat,
    pub ambient: AmbientArgs,
    pub cancel: CancellationToken,
}

/// Parse a `KEY=VALUE` pair. Values are always strings.
pub fn parse_key_value(s: &str) -> Result<(String, Value), CliError> {
    let Some((key, value)) = s.split_once('=') else {
        return Err(CliError::InvalidKeyValue(s.to_string()));
    };

    let key = key.trim();
    if key.is_empty() {
        return Err(CliError::InvalidKeyValue(s.to_string()));
    }

    Ok((key.to_string(), Value::String(value.to_string())))
}

/// Merge `KEY=VALUE` pairs over a base record; pairs win.
pub fn merge_pairs(base: IdentityMap, pairs: Vec<(String, Value)>) -> IdentityMap {
    base.iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .chain(pairs)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("name=foo=bar").unwrap(),
            ("name".to_string(), Value::String("foo=bar".to_string()))
        );
        assert_eq!(
            parse_key_value("name=").unwrap(),
            ("name".to_string(), Value::String(String::new()))
        );
        assert!(parse_key_value("name").is_err());
        assert!(parse_key_value("=foo").is_err());
    }

    #[test]
    fn test_merge_pairs_overrides() {
        let base = IdentityMap::new().with("name", "old").with("region", "us-east-1");
        let merged = merge_pairs(base, vec![("name".to_string(), Value::from("new"))]);
        assert_eq!(merged.get_str("name"), Some("new"));
        assert_eq!(merged.get_str("region"), Some("us-east-1"));
    }
}
