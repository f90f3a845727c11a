//! anchorctl - inspect resource identities and run imports locally.
//!
//! Ambient account and region come from flags or `ANCHOR_*` environment
//! variables; descriptors are read from JSON files.

use anyhow::Result;
use clap::Parser;

mod commands;
mod config;
mod error;
mod logging;
mod output;

use commands::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = cli.run() {
        error::print_error(&e);
        std::process::exit(1);
    }

    Ok(())
}
