//! Identity write-back after resource creation.

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::{
    AmbientContext, AttributeRole, AttributeStore, IdentityAttribute, IdentityError,
    ResourceState, Result, ID_ATTR,
};

/// Lifecycle operations an interceptor can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleOp {
    Create,
    Read,
    Update,
    Delete,
    Import,
}

impl std::fmt::Display for LifecycleOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LifecycleOp::Create => "create",
            LifecycleOp::Read => "read",
            LifecycleOp::Update => "update",
            LifecycleOp::Delete => "delete",
            LifecycleOp::Import => "import",
        };
        write!(f, "{}", s)
    }
}

/// Runs identity write-back after successful lifecycle operations.
///
/// Only `Create` triggers a write-back. An identity record is therefore never
/// refreshed after read or update, even if the resource's own attributes
/// change.
#[derive(Debug, Clone, Copy)]
pub struct IdentityInterceptor<'a> {
    attributes: &'a [IdentityAttribute],
}

impl<'a> IdentityInterceptor<'a> {
    /// Creates an interceptor for a descriptor's attributes.
    pub fn new(attributes: &'a [IdentityAttribute]) -> Self {
        Self { attributes }
    }

    /// Returns true if write-back runs after `op`.
    pub fn applies_to(op: LifecycleOp) -> bool {
        matches!(op, LifecycleOp::Create)
    }

    /// Called once after `op` completed successfully.
    ///
    /// Returns whether write-back ran.
    pub fn after(
        &self,
        op: LifecycleOp,
        ctx: &CancellationToken,
        ambient: &dyn AmbientContext,
        resource: &dyn ResourceState,
        identity: &mut dyn AttributeStore,
    ) -> Result<bool> {
        if !Self::applies_to(op) {
            debug!(%op, "Skipping identity write-back");
            return Ok(false);
        }

        write_back(ctx, ambient, resource, identity, self.attributes)?;
        Ok(true)
    }
}

/// Populates an identity record from a freshly created resource.
///
/// Scope attributes come from the ambient context, everything else from the
/// resource's own state. Absent resource attributes are skipped. The first
/// failing write aborts; attributes written before it are kept.
#[instrument(skip_all, fields(attributes = attributes.len()))]
pub fn write_back(
    ctx: &CancellationToken,
    ambient: &dyn AmbientContext,
    resource: &dyn ResourceState,
    identity: &mut dyn AttributeStore,
    attributes: &[IdentityAttribute],
) -> Result<()> {
    for attr in attributes {
        if ctx.is_cancelled() {
            return Err(IdentityError::Cancelled);
        }

        let value = match attr.role {
            AttributeRole::AccountScope => Some(Value::String(ambient.account_id(ctx))),
            AttributeRole::Region => Some(Value::String(ambient.region(ctx))),
            AttributeRole::Plain if attr.name == ID_ATTR => {
                let id = resource.id();
                (!id.is_empty()).then(|| Value::String(id.to_string()))
            }
            AttributeRole::Plain => resource.get(&attr.name),
        };

        let Some(value) = value else {
            debug!(attribute = %attr.name, "Resource attribute absent, not written to identity");
            continue;
        };

        identity
            .set(&attr.name, value)
            .map_err(|source| IdentityError::IdentityWrite {
                attribute: attr.name.clone(),
                source,
            })?;
        debug!(attribute = %attr.name, role = %attr.role, "Wrote identity attribute");
    }

    Ok(())
}
