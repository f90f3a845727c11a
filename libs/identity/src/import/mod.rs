//! Import resolution: rebuilding resource state from an import ID or an
//! identity record.
//!
//! Every importer follows the same routing rule. A non-empty import ID is the
//! legacy path; an empty one means the structured identity record is the
//! source of truth.

mod arn;
mod attributes;
mod singleton;

pub use arn::ArnImporter;
pub use attributes::AttributeImporter;
pub use singleton::{SingletonImporter, SingletonScope};

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{instrument, warn};

use crate::{
    AmbientContext, AttributeStore, IdentityDescriptor, IdentityError, ResourceState, Result,
};

/// Importer selected for a descriptor.
#[derive(Debug, Clone)]
pub enum Importer<'a> {
    Attributes(AttributeImporter<'a>),
    Arn(ArnImporter<'a>),
    Singleton(SingletonImporter<'a>),
}

impl<'a> Importer<'a> {
    /// Validates the descriptor and picks the importer for its kind.
    pub fn for_descriptor(descriptor: &'a IdentityDescriptor) -> Result<Self> {
        descriptor.validate()?;

        let importer = if descriptor.is_arn {
            Importer::Arn(ArnImporter::for_descriptor(descriptor))
        } else if descriptor.singleton {
            Importer::Singleton(SingletonImporter::for_descriptor(descriptor))
        } else {
            Importer::Attributes(AttributeImporter::new(descriptor))
        };
        Ok(importer)
    }

    /// Short name of the variant, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Importer::Attributes(_) => "attributes",
            Importer::Arn(_) => "arn",
            Importer::Singleton(_) => "singleton",
        }
    }

    /// Populates `resource` from `import_id` or, when that is empty, from
    /// `identity`.
    #[instrument(skip_all, fields(kind = self.kind(), legacy = !import_id.is_empty()))]
    pub fn import(
        &self,
        ctx: &CancellationToken,
        ambient: &dyn AmbientContext,
        import_id: &str,
        identity: &dyn AttributeStore,
        resource: &mut dyn ResourceState,
    ) -> Result<()> {
        let result = match self {
            Importer::Attributes(importer) => {
                importer.import(ctx, ambient, import_id, identity, resource)
            }
            Importer::Arn(importer) => importer.import(ctx, ambient, import_id, identity, resource),
            Importer::Singleton(importer) => {
                importer.import(ctx, ambient, import_id, identity, resource)
            }
        };

        if let Err(err) = &result {
            if err.is_validation() {
                warn!(error = %err, "Import rejected");
            }
        }
        result
    }
}

fn ensure_active(ctx: &CancellationToken) -> Result<()> {
    if ctx.is_cancelled() {
        return Err(IdentityError::Cancelled);
    }
    Ok(())
}

/// JSON type name of a value, for type mismatch errors.
fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Unwraps a textual identity value.
fn require_text(attribute: &str, value: Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(IdentityError::TypeMismatch {
            attribute: attribute.to_string(),
            expected: "string",
            actual: value_kind(&other),
        }),
    }
}

/// Reads an optional textual attribute from the identity record.
fn identity_text(identity: &dyn AttributeStore, attribute: &str) -> Result<Option<String>> {
    identity
        .get(attribute)
        .map(|value| require_text(attribute, value))
        .transpose()
}

/// Checks a supplied account against the ambient one.
fn check_account(
    ctx: &CancellationToken,
    ambient: &dyn AmbientContext,
    actual: &str,
) -> Result<()> {
    let expected = ambient.account_id(ctx);
    if actual != expected {
        return Err(IdentityError::AccountMismatch {
            expected,
            actual: actual.to_string(),
        });
    }
    Ok(())
}

fn set_text(resource: &mut dyn ResourceState, attribute: &str, value: &str) -> Result<()> {
    resource
        .set(attribute, Value::String(value.to_string()))
        .map_err(|source| IdentityError::StateWrite {
            attribute: attribute.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IdentityAttribute, IdentityMap, StateMap, StaticAmbient};
    use serde_json::json;

    #[test]
    fn test_dispatch_by_kind() {
        let arn = IdentityDescriptor::global_arn("arn");
        let singleton = IdentityDescriptor::regional_singleton();
        let plain = IdentityDescriptor::parameterized([IdentityAttribute::required("name")]);

        assert_eq!(Importer::for_descriptor(&arn).unwrap().kind(), "arn");
        assert_eq!(Importer::for_descriptor(&singleton).unwrap().kind(), "singleton");
        assert_eq!(Importer::for_descriptor(&plain).unwrap().kind(), "attributes");
    }

    #[test]
    fn test_dispatch_rejects_invalid_descriptor() {
        let descriptor = IdentityDescriptor::parameterized([]).with_id_shadow("name");
        let err = Importer::for_descriptor(&descriptor).unwrap_err();
        assert!(matches!(err, IdentityError::Descriptor(_)));
    }

    #[test]
    fn test_import_through_dispatch() {
        let ctx = CancellationToken::new();
        let ambient = StaticAmbient::new("111111111111", "us-east-1");
        let descriptor = IdentityDescriptor::parameterized([IdentityAttribute::required("name")])
            .with_id_shadow("name");
        let identity = IdentityMap::new().with("name", "foo");
        let mut resource = StateMap::new();

        Importer::for_descriptor(&descriptor)
            .unwrap()
            .import(&ctx, &ambient, "", &identity, &mut resource)
            .unwrap();

        assert_eq!(resource.id, "foo");
        assert_eq!(resource.get_str("name"), Some("foo"));
    }

    #[test]
    fn test_require_text() {
        assert_eq!(require_text("a", json!("x")).unwrap(), "x");
        let err = require_text("a", json!(["x"])).unwrap_err();
        assert!(matches!(
            err,
            IdentityError::TypeMismatch {
                expected: "string",
                actual: "array",
                ..
            }
        ));
    }
}
