//! Error types for identity write-back and import resolution.

use anchor_arn::ArnError;
use thiserror::Error;

/// Errors raised by a [`crate::AttributeStore`] write.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The attribute exists but cannot be written.
    #[error("attribute '{0}' is read-only")]
    ReadOnly(String),

    /// The store refused the value.
    #[error("write to '{attribute}' rejected: {message}")]
    Rejected { attribute: String, message: String },
}

/// A descriptor that violates its own invariants.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    /// An attribute has an empty name.
    #[error("identity attribute name cannot be empty")]
    EmptyName,

    /// Two attributes share a name.
    #[error("duplicate identity attribute '{0}'")]
    DuplicateAttribute(String),

    /// An ARN descriptor does not declare its ARN attribute as required.
    #[error("ARN attribute '{0}' must be declared and required")]
    MissingArnAttribute(String),

    /// An ARN descriptor requires something besides the ARN.
    #[error("ARN identity cannot require attribute '{0}'")]
    ExtraRequiredAttribute(String),

    /// A singleton declares more than one scope attribute, or requires one.
    #[error("singleton identity has invalid scope attribute '{0}'")]
    InvalidSingletonScope(String),

    /// A descriptor is marked both ARN and singleton.
    #[error("identity cannot be both ARN-based and singleton")]
    ConflictingKinds,

    /// The shadow attribute is not a declared plain attribute.
    #[error("ID shadow attribute '{0}' is not a declared plain attribute")]
    InvalidShadowAttribute(String),
}

/// Errors from write-back and import resolution.
///
/// All variants are terminal: they describe caller or configuration mistakes,
/// never transient failures, so none of them are retried.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Writing to the identity record failed during write-back.
    #[error("failed to write identity attribute '{attribute}': {source}")]
    IdentityWrite {
        attribute: String,
        #[source]
        source: StoreError,
    },

    /// Writing to the resource state failed during import.
    #[error("failed to write resource attribute '{attribute}': {source}")]
    StateWrite {
        attribute: String,
        #[source]
        source: StoreError,
    },

    /// A required identity attribute is absent.
    #[error("missing required identity attribute '{attribute}'")]
    MissingRequiredAttribute { attribute: String },

    /// An identity value is not of the expected type.
    #[error("identity attribute '{attribute}' must be {expected}, got {actual}")]
    TypeMismatch {
        attribute: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// The identity's account differs from the configured account.
    #[error("account mismatch: expected '{expected}', got '{actual}'")]
    AccountMismatch { expected: String, actual: String },

    /// The identity's region is not the one in scope.
    #[error("region mismatch: expected '{expected}', got '{actual}'")]
    RegionMismatch { expected: String, actual: String },

    /// A region string is malformed.
    #[error("invalid region '{value}'")]
    InvalidRegion { value: String },

    /// The import string is not a well-formed ARN.
    #[error("invalid ARN '{input}': {source}")]
    InvalidArn {
        input: String,
        #[source]
        source: ArnError,
    },

    /// The ARN's partition differs from the configured partition.
    #[error("partition mismatch: expected '{expected}', got '{actual}'")]
    PartitionMismatch { expected: String, actual: String },

    /// The descriptor is inconsistent.
    #[error("invalid identity descriptor: {0}")]
    Descriptor(#[from] DescriptorError),

    /// The operation was cancelled before it finished.
    #[error("operation cancelled")]
    Cancelled,
}

impl IdentityError {
    /// Returns true if the error reports identity values that disagree with
    /// the ambient context or the descriptor.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            IdentityError::MissingRequiredAttribute { .. }
                | IdentityError::TypeMismatch { .. }
                | IdentityError::AccountMismatch { .. }
                | IdentityError::RegionMismatch { .. }
                | IdentityError::InvalidRegion { .. }
                | IdentityError::InvalidArn { .. }
                | IdentityError::PartitionMismatch { .. }
        )
    }

    /// Returns the attribute the error is about, if any.
    pub fn attribute(&self) -> Option<&str> {
        match self {
            IdentityError::IdentityWrite { attribute, .. }
            | IdentityError::StateWrite { attribute, .. }
            | IdentityError::MissingRequiredAttribute { attribute }
            | IdentityError::TypeMismatch { attribute, .. } => Some(attribute),
            _ => None,
        }
    }
}
