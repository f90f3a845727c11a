//! Error handling and display for the CLI.

use anchor_identity::IdentityError;
use colored::Colorize;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("No {0} configured. Pass it as a flag or set {1}.")]
    MissingAmbient(&'static str, &'static str),

    #[error("Invalid attribute '{0}': expected KEY=VALUE")]
    InvalidKeyValue(String),
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {:#}", "Error:".red().bold(), err);

    if let Some(hint) = hint_for(err) {
        eprintln!("\n{}", format!("Hint: {hint}").as_str().yellow());
    }
}

fn hint_for(err: &anyhow::Error) -> Option<&'static str> {
    if let Some(identity_err) = err.downcast_ref::<IdentityError>() {
        return match identity_err {
            IdentityError::AccountMismatch { .. } => {
                Some("The identity belongs to another account. Check ANCHOR_ACCOUNT_ID.")
            }
            IdentityError::RegionMismatch { .. } | IdentityError::InvalidRegion { .. } => {
                Some("Check ANCHOR_REGION, or pass the resource's region explicitly.")
            }
            IdentityError::PartitionMismatch { .. } => {
                Some("The ARN is from another partition. Check ANCHOR_PARTITION.")
            }
            IdentityError::MissingRequiredAttribute { .. } => {
                Some("Supply the attribute with --identity KEY=VALUE, or import by ID.")
            }
            IdentityError::InvalidArn { .. } => {
                Some("ARNs look like arn:PARTITION:SERVICE:REGION:ACCOUNT:RESOURCE.")
            }
            _ => None,
        };
    }

    match err.downcast_ref::<CliError>() {
        Some(CliError::MissingAmbient(..)) => {
            Some("Set ANCHOR_ACCOUNT_ID and ANCHOR_REGION in your environment.")
        }
        _ => None,
    }
}
