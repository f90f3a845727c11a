//! Import for resources with at most one instance per scope.

use anchor_arn::{normalize_region, partition_for_region, validate_region};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{check_account, ensure_active, identity_text, set_text};
use crate::{
    AmbientContext, AttributeRole, AttributeStore, IdentityDescriptor, IdentityError,
    ResourceState, Result, ACCOUNT_ID_ATTR, REGION_ATTR,
};

/// The scope a singleton is unique within.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingletonScope {
    /// One instance per account. The identifier is the account ID.
    Account,
    /// One instance per account and region. The identifier is the region.
    Region,
}

impl SingletonScope {
    /// Role of the identity attribute carrying the scope value.
    pub fn role(self) -> AttributeRole {
        match self {
            SingletonScope::Account => AttributeRole::AccountScope,
            SingletonScope::Region => AttributeRole::Region,
        }
    }

    fn ambient_value(self, ctx: &CancellationToken, ambient: &dyn AmbientContext) -> String {
        match self {
            SingletonScope::Account => ambient.account_id(ctx),
            SingletonScope::Region => ambient.region(ctx),
        }
    }

    /// Account-scoped import IDs are taken verbatim.
    fn accepts_any_import_id(self) -> bool {
        matches!(self, SingletonScope::Account)
    }

    fn normalize(
        self,
        ctx: &CancellationToken,
        ambient: &dyn AmbientContext,
        value: &str,
    ) -> Result<String> {
        match self {
            SingletonScope::Account => Ok(value.to_string()),
            SingletonScope::Region => {
                let region = normalize_region(value);
                if !validate_region(&region) {
                    return Err(IdentityError::InvalidRegion {
                        value: value.to_string(),
                    });
                }

                let partition = ambient.partition(ctx);
                if partition_for_region(&region) != partition {
                    return Err(IdentityError::RegionMismatch {
                        expected: partition,
                        actual: region,
                    });
                }
                Ok(region)
            }
        }
    }

    fn write(self, resource: &mut dyn ResourceState, value: &str) -> Result<()> {
        if self == SingletonScope::Region {
            set_text(resource, REGION_ATTR, value)?;
        }
        resource.set_id(value);
        Ok(())
    }
}

/// Resolves a singleton resource.
///
/// The strategy is selected by its scope and by whether a missing scope value
/// falls back to the ambient context. The importer cannot tell whether the
/// singleton was already imported; the caller's storage enforces uniqueness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingletonImporter<'a> {
    scope: SingletonScope,
    default_from_ambient: bool,
    account_attribute: &'a str,
    region_attribute: &'a str,
}

impl<'a> SingletonImporter<'a> {
    /// Creates an importer reading the well-known `account_id` and `region`
    /// identity attributes.
    pub fn new(scope: SingletonScope, default_from_ambient: bool) -> Self {
        Self {
            scope,
            default_from_ambient,
            account_attribute: ACCOUNT_ID_ATTR,
            region_attribute: REGION_ATTR,
        }
    }

    /// One instance per account.
    pub fn global() -> Self {
        Self::new(SingletonScope::Account, true)
    }

    /// One instance per region.
    pub fn regional() -> Self {
        Self::new(SingletonScope::Region, true)
    }

    /// Picks the variant matching a singleton descriptor and reads the
    /// identity attributes carrying the account and region roles.
    pub fn for_descriptor(descriptor: &'a IdentityDescriptor) -> Self {
        let base = if descriptor.global {
            Self::global()
        } else {
            Self::regional()
        };
        let named = move |role: AttributeRole, fallback: &'a str| {
            descriptor
                .attributes
                .iter()
                .find(|attr| attr.role == role)
                .map_or(fallback, |attr| attr.name.as_str())
        };

        Self {
            account_attribute: named(AttributeRole::AccountScope, ACCOUNT_ID_ATTR),
            region_attribute: named(AttributeRole::Region, REGION_ATTR),
            ..base
        }
    }

    pub fn scope(&self) -> SingletonScope {
        self.scope
    }

    /// Identity attribute carrying the scope value.
    pub fn scope_attribute(&self) -> &'a str {
        match self.scope {
            SingletonScope::Account => self.account_attribute,
            SingletonScope::Region => self.region_attribute,
        }
    }

    /// Resolves the scope value from `import_id`, the identity record, or the
    /// ambient context, in that order, and writes it to `resource`.
    pub fn import(
        &self,
        ctx: &CancellationToken,
        ambient: &dyn AmbientContext,
        import_id: &str,
        identity: &dyn AttributeStore,
        resource: &mut dyn ResourceState,
    ) -> Result<()> {
        ensure_active(ctx)?;

        let supplied = if import_id.is_empty() {
            if let Some(account) = identity_text(identity, self.account_attribute)? {
                check_account(ctx, ambient, &account)?;
            }
            match self.scope {
                SingletonScope::Account => None,
                SingletonScope::Region => identity_text(identity, self.region_attribute)?,
            }
        } else if self.scope.accepts_any_import_id() {
            resource.set_id(import_id);
            debug!(import_id, "Imported global singleton from legacy ID");
            return Ok(());
        } else {
            Some(import_id.to_string())
        };

        let value = match supplied {
            Some(value) => value,
            None if self.default_from_ambient => self.scope.ambient_value(ctx, ambient),
            None => {
                return Err(IdentityError::MissingRequiredAttribute {
                    attribute: self.scope_attribute().to_string(),
                });
            }
        };

        let value = self.scope.normalize(ctx, ambient, &value)?;
        ensure_active(ctx)?;
        self.scope.write(resource, &value)?;

        debug!(scope = ?self.scope, id = %value, "Imported singleton");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IdentityAttribute, IdentityMap, StateMap, StaticAmbient};
    use serde_json::json;

    fn run(
        importer: SingletonImporter<'_>,
        import_id: &str,
        identity: &IdentityMap,
    ) -> (Result<()>, StateMap) {
        let ctx = CancellationToken::new();
        let ambient = StaticAmbient::new("111111111111", "eu-west-1");
        let mut resource = StateMap::new();
        let result = importer.import(&ctx, &ambient, import_id, identity, &mut resource);
        (result, resource)
    }

    #[test]
    fn test_regional_defaults_to_ambient_region() {
        let (result, resource) = run(SingletonImporter::regional(), "", &IdentityMap::new());
        result.unwrap();
        assert_eq!(resource.id, "eu-west-1");
        assert_eq!(resource.get_str("region"), Some("eu-west-1"));
    }

    #[test]
    fn test_regional_import_id_is_normalized() {
        let (result, resource) = run(
            SingletonImporter::regional(),
            " US-East-2 ",
            &IdentityMap::new(),
        );
        result.unwrap();
        assert_eq!(resource.id, "us-east-2");
        assert_eq!(resource.get_str("region"), Some("us-east-2"));
    }

    #[test]
    fn test_regional_malformed_region() {
        let (result, resource) =
            run(SingletonImporter::regional(), "moon-base", &IdentityMap::new());
        assert!(matches!(
            result,
            Err(IdentityError::InvalidRegion { value }) if value == "moon-base"
        ));
        assert_eq!(resource.id, "");
    }

    #[test]
    fn test_regional_other_partition() {
        let (result, _) = run(SingletonImporter::regional(), "cn-north-1", &IdentityMap::new());
        match result.unwrap_err() {
            IdentityError::RegionMismatch { expected, actual } => {
                assert_eq!(expected, "aws");
                assert_eq!(actual, "cn-north-1");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_regional_identity_record() {
        let identity = IdentityMap::new()
            .with("account_id", "111111111111")
            .with("region", "ap-northeast-1");
        let (result, resource) = run(SingletonImporter::regional(), "", &identity);
        result.unwrap();
        assert_eq!(resource.id, "ap-northeast-1");
    }

    #[test]
    fn test_identity_account_mismatch() {
        let identity = IdentityMap::new().with("account_id", "222222222222");
        for importer in [SingletonImporter::global(), SingletonImporter::regional()] {
            let (result, _) = run(importer, "", &identity);
            assert!(
                matches!(result, Err(IdentityError::AccountMismatch { .. })),
                "{importer:?}"
            );
        }
    }

    #[test]
    fn test_global_accepts_any_import_id() {
        let (result, resource) = run(
            SingletonImporter::global(),
            "whatever you like",
            &IdentityMap::new(),
        );
        result.unwrap();
        assert_eq!(resource.id, "whatever you like");
        assert!(resource.attributes.is_empty());
    }

    #[test]
    fn test_global_derives_account() {
        let (result, resource) = run(SingletonImporter::global(), "", &IdentityMap::new());
        result.unwrap();
        assert_eq!(resource.id, "111111111111");
    }

    #[test]
    fn test_no_ambient_default() {
        let importer = SingletonImporter::new(SingletonScope::Region, false);
        let (result, _) = run(importer, "", &IdentityMap::new());
        assert!(matches!(
            result,
            Err(IdentityError::MissingRequiredAttribute { attribute }) if attribute == "region"
        ));
    }

    #[test]
    fn test_for_descriptor() {
        assert_eq!(
            SingletonImporter::for_descriptor(&IdentityDescriptor::global_singleton()).scope(),
            SingletonScope::Account
        );
        assert_eq!(
            SingletonImporter::for_descriptor(&IdentityDescriptor::regional_singleton()).scope(),
            SingletonScope::Region
        );
    }

    #[test]
    fn test_custom_named_account_scope_is_checked() {
        let json = r#"{
            "attributes": [{"name": "owner", "role": "account_scope"}],
            "singleton": true,
            "global": true
        }"#;
        let descriptor: IdentityDescriptor = serde_json::from_str(json).unwrap();
        let importer = SingletonImporter::for_descriptor(&descriptor);
        assert_eq!(importer.scope_attribute(), "owner");

        let identity = IdentityMap::new().with("owner", "222222222222");
        let (result, resource) = run(importer, "", &identity);
        match result.unwrap_err() {
            IdentityError::AccountMismatch { expected, actual } => {
                assert_eq!(expected, "111111111111");
                assert_eq!(actual, "222222222222");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(resource.id, "");

        let identity = IdentityMap::new().with("owner", "111111111111");
        let (result, resource) = run(importer, "", &identity);
        result.unwrap();
        assert_eq!(resource.id, "111111111111");
    }

    #[test]
    fn test_custom_named_region_scope() {
        let descriptor = IdentityDescriptor {
            attributes: vec![
                IdentityAttribute::account_id(),
                IdentityAttribute {
                    name: "location".to_string(),
                    required: false,
                    role: AttributeRole::Region,
                },
            ],
            ..IdentityDescriptor::regional_singleton()
        };
        let importer = SingletonImporter::for_descriptor(&descriptor);
        assert_eq!(importer.scope_attribute(), "location");

        let identity = IdentityMap::new().with("location", "eu-central-1");
        let (result, resource) = run(importer, "", &identity);
        result.unwrap();
        assert_eq!(resource.id, "eu-central-1");
        assert_eq!(resource.get_str("region"), Some("eu-central-1"));

        let importer = SingletonImporter {
            default_from_ambient: false,
            ..importer
        };
        let (result, _) = run(importer, "", &IdentityMap::new());
        assert!(matches!(
            result,
            Err(IdentityError::MissingRequiredAttribute { attribute }) if attribute == "location"
        ));
    }

    #[test]
    fn test_identity_values_must_be_text() {
        let identity = IdentityMap::new().with("region", json!(7));
        let (result, resource) = run(SingletonImporter::regional(), "", &identity);
        assert!(matches!(
            result,
            Err(IdentityError::TypeMismatch { attribute, expected: "string", actual: "number" })
                if attribute == "region"
        ));
        assert_eq!(resource.id, "");

        let identity = IdentityMap::new().with("account_id", json!(null));
        for importer in [SingletonImporter::global(), SingletonImporter::regional()] {
            let (result, _) = run(importer, "", &identity);
            assert!(
                matches!(
                    result,
                    Err(IdentityError::TypeMismatch { ref attribute, actual: "null", .. })
                        if attribute == "account_id"
                ),
                "{importer:?}"
            );
        }
    }
}
