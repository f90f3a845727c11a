//! # anchor-identity
//!
//! Resource identity write-back and import resolution.
//!
//! A resource's identity is the small, stable set of attributes that lets a
//! control plane re-attach to a resource it created earlier: an opaque ID, an
//! ARN, or structured fields such as account, region and name.
//!
//! ## Operations
//!
//! - [`IdentitySchema::from_attributes`] derives the host-facing schema
//! - [`write_back`] fills an identity record right after create
//! - [`Importer`] rebuilds resource state from a legacy import ID or an
//!   identity record, in one of three variants:
//!   - [`AttributeImporter`] for plain attribute identities
//!   - [`ArnImporter`] for ARN identities
//!   - [`SingletonImporter`] for one-per-account or one-per-region resources
//!
//! ## Invariants
//!
//! - Every operation is synchronous and keeps no state between calls
//! - Ambient account/region are always passed in, never looked up globally
//! - Resolution is fail-fast and not transactional: writes made before an
//!   error stay in the resource state

mod ambient;
mod descriptor;
mod error;
mod import;
mod schema;
mod state;
mod writeback;

pub use ambient::{AmbientContext, StaticAmbient};
pub use descriptor::{
    AttributeRole, IdentityAttribute, IdentityDescriptor, ACCOUNT_ID_ATTR, ID_ATTR, REGION_ATTR,
};
pub use error::{DescriptorError, IdentityError, StoreError};
pub use import::{ArnImporter, AttributeImporter, Importer, SingletonImporter, SingletonScope};
pub use schema::{IdentitySchema, ImportRequirement, SchemaAttribute};
pub use state::{AttributeStore, IdentityMap, ResourceState, StateMap};
pub use writeback::{write_back, IdentityInterceptor, LifecycleOp};

/// Re-export so callers do not need a direct tokio-util dependency.
pub use tokio_util::sync::CancellationToken;

/// Result alias for identity operations.
pub type Result<T, E = IdentityError> = std::result::Result<T, E>;
