//! Error types for ARN parsing.

use thiserror::Error;

/// Errors that can occur when parsing an ARN.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArnError {
    /// The ARN string is empty.
    #[error("ARN cannot be empty")]
    Empty,

    /// The string does not start with `arn:`.
    #[error("ARN must start with 'arn:'")]
    MissingPrefix,

    /// Fewer than six colon-separated sections.
    #[error("ARN has {found} sections, expected 6")]
    TooFewSections { found: usize },

    /// The partition section is empty.
    #[error("ARN partition cannot be empty")]
    EmptyPartition,

    /// The service section is empty.
    #[error("ARN service cannot be empty")]
    EmptyService,

    /// The resource section is empty.
    #[error("ARN resource cannot be empty")]
    EmptyResource,

    /// The region section contains characters a region never has.
    #[error("invalid ARN region: '{0}'")]
    InvalidRegion(String),

    /// The account section is neither empty, 12 digits, nor `aws`.
    #[error("invalid ARN account ID: '{0}'")]
    InvalidAccountId(String),
}

impl ArnError {
    /// Returns true if the input was not ARN-shaped at all, as opposed to an
    /// ARN with a malformed section.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ArnError::Empty | ArnError::MissingPrefix | ArnError::TooFewSections { .. }
        )
    }
}
