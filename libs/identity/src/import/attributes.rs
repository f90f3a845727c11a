//! Generic attribute-based import.

use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{check_account, ensure_active, identity_text, require_text, set_text};
use crate::{
    AmbientContext, AttributeRole, AttributeStore, IdentityDescriptor, IdentityError,
    ResourceState, Result, ID_ATTR, REGION_ATTR,
};

/// Resolves resource state attribute by attribute from an identity record.
#[derive(Debug, Clone, Copy)]
pub struct AttributeImporter<'a> {
    descriptor: &'a IdentityDescriptor,
}

impl<'a> AttributeImporter<'a> {
    /// Creates an importer for a descriptor.
    pub fn new(descriptor: &'a IdentityDescriptor) -> Self {
        Self { descriptor }
    }

    /// Runs the legacy path for a non-empty `import_id`, otherwise resolves
    /// every declared attribute from `identity`.
    pub fn import(
        &self,
        ctx: &CancellationToken,
        ambient: &dyn AmbientContext,
        import_id: &str,
        identity: &dyn AttributeStore,
        resource: &mut dyn ResourceState,
    ) -> Result<()> {
        ensure_active(ctx)?;

        if !import_id.is_empty() {
            return self.import_legacy(import_id, resource);
        }

        for attr in &self.descriptor.attributes {
            ensure_active(ctx)?;

            match attr.role {
                AttributeRole::AccountScope => {
                    if let Some(account) = identity_text(identity, &attr.name)? {
                        check_account(ctx, ambient, &account)?;
                    }
                }
                AttributeRole::Region => {
                    if let Some(region) = identity_text(identity, &attr.name)? {
                        set_text(resource, REGION_ATTR, &region)?;
                    }
                }
                AttributeRole::Plain => {
                    let Some(value) = identity.get(&attr.name) else {
                        if attr.required {
                            return Err(IdentityError::MissingRequiredAttribute {
                                attribute: attr.name.clone(),
                            });
                        }
                        continue;
                    };

                    let value = require_text(&attr.name, value)?;
                    set_text(resource, &attr.name, &value)?;

                    if self.descriptor.is_id_shadow(&attr.name) {
                        resource.set_id(&value);
                    }
                }
            }
            debug!(attribute = %attr.name, role = %attr.role, "Resolved identity attribute");
        }

        ensure_active(ctx)
    }

    fn import_legacy(&self, import_id: &str, resource: &mut dyn ResourceState) -> Result<()> {
        resource.set_id(import_id);

        if let Some(shadow) = self.descriptor.id_shadow_attribute.as_deref() {
            if shadow != ID_ATTR {
                set_text(resource, shadow, import_id)?;
            }
        }

        debug!(import_id, "Imported from legacy ID");
        Ok(())
    }
}
