//! Schema command.

use std::path::PathBuf;

use anchor_identity::IdentitySchema;
use anyhow::Result;
use clap::Args;

use crate::config::load_descriptor;
use crate::output::{print_field, print_json, OutputFormat};

use super::CommandContext;

/// Print the import schema derived from a descriptor.
#[derive(Debug, Args)]
pub struct SchemaCommand {
    /// Path to the descriptor JSON file.
    #[arg(long)]
    descriptor: PathBuf,
}

impl SchemaCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let descriptor = load_descriptor(&self.descriptor)?;
        let schema = IdentitySchema::from_attributes(&descriptor.attributes);

        match ctx.format {
            OutputFormat::Json => print_json(&schema)?,
            OutputFormat::Text => {
                for attr in schema.iter() {
                    let requirement = if attr.is_required() {
                        "required"
                    } else {
                        "optional"
                    };
                    print_field(&attr.name, requirement);
                }
            }
        }

        Ok(())
    }
}
