//! Import command.

use std::path::PathBuf;

use anchor_identity::{IdentityMap, Importer, StateMap};
use anyhow::Result;
use clap::Args;
use serde_json::Value;
use tracing::info;

use crate::config::{load_descriptor, load_identity};
use crate::output::{print_field, print_json, OutputFormat};

use super::{merge_pairs, parse_key_value, CommandContext};

/// Resolve resource state the way an import would.
#[derive(Debug, Args)]
pub struct ImportCommand {
    /// Path to the descriptor JSON file.
    #[arg(long)]
    descriptor: PathBuf,

    /// Legacy import ID. When omitted, the identity attributes are used.
    #[arg(long, default_value = "")]
    id: String,

    /// Identity attribute as KEY=VALUE (repeatable).
    #[arg(long = "identity", value_parser = parse_key_value)]
    identity: Vec<(String, Value)>,

    /// Identity record JSON file; --identity pairs override its entries.
    #[arg(long)]
    identity_file: Option<PathBuf>,
}

impl ImportCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let descriptor = load_descriptor(&self.descriptor)?;
        let ambient = ctx.ambient.resolve()?;

        let base = match &self.identity_file {
            Some(path) => load_identity(path)?,
            None => IdentityMap::new(),
        };
        let identity = merge_pairs(base, self.identity);

        let importer = Importer::for_descriptor(&descriptor)?;
        let mut resource = StateMap::new();
        importer.import(&ctx.cancel, &ambient, &self.id, &identity, &mut resource)?;

        info!(kind = importer.kind(), id = %resource.id, "Import resolved");

        match ctx.format {
            OutputFormat::Json => print_json(&resource)?,
            OutputFormat::Text => {
                print_field("id", &resource.id);
                for (name, value) in &resource.attributes {
                    match value {
                        Value::String(s) => print_field(name, s),
                        other => print_field(name, &other.to_string()),
                    }
                }
            }
        }

        Ok(())
    }
}
