//! Write-back command.

use std::path::PathBuf;

use anchor_identity::{IdentityInterceptor, IdentityMap, LifecycleOp, StateMap};
use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use crate::config::load_descriptor;
use crate::output::{print_json, print_success, OutputFormat};

use super::{parse_key_value, CommandContext};

/// Compute the identity record a create would write.
#[derive(Debug, Args)]
pub struct WriteBackCommand {
    /// Path to the descriptor JSON file.
    #[arg(long)]
    descriptor: PathBuf,

    /// Primary identifier of the created resource.
    #[arg(long, default_value = "")]
    id: String,

    /// Resource attribute as KEY=VALUE (repeatable).
    #[arg(long = "attr", value_parser = parse_key_value)]
    attrs: Vec<(String, Value)>,

    /// Resource state JSON file (`{"id": ..., "attributes": {...}}`).
    #[arg(long)]
    state_file: Option<PathBuf>,
}

impl WriteBackCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let descriptor = load_descriptor(&self.descriptor)?;
        let ambient = ctx.ambient.resolve()?;

        let mut resource = match &self.state_file {
            Some(path) => {
                let contents = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read resource state from {:?}", path))?;
                serde_json::from_str::<StateMap>(&contents)
                    .with_context(|| format!("Failed to parse resource state from {:?}", path))?
            }
            None => StateMap::new(),
        };
        if !self.id.is_empty() {
            resource.id = self.id;
        }
        resource.attributes.extend(self.attrs);

        let mut identity = IdentityMap::new();
        IdentityInterceptor::new(&descriptor.attributes).after(
            LifecycleOp::Create,
            &ctx.cancel,
            &ambient,
            &resource,
            &mut identity,
        )?;

        match ctx.format {
            OutputFormat::Json => print_json(&identity)?,
            OutputFormat::Text => {
                print_success(&format!("{} identity attribute(s) written", identity.len()));
                print_json(&identity)?;
            }
        }

        Ok(())
    }
}
