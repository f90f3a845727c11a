//! Import for resources identified by an ARN.

use anchor_arn::Arn;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{ensure_active, identity_text, set_text};
use crate::{
    AmbientContext, AttributeRole, AttributeStore, IdentityDescriptor, IdentityError,
    ResourceState, Result, REGION_ATTR,
};

/// Resolves an ARN-identified resource.
///
/// Global ARNs are checked against the ambient partition, regional ARNs
/// against the expected region.
#[derive(Debug, Clone, Copy)]
pub struct ArnImporter<'a> {
    arn_attribute: &'a str,
    region_attribute: &'a str,
    global: bool,
}

impl<'a> ArnImporter<'a> {
    /// Creates an importer writing the ARN to `arn_attribute`.
    pub fn new(arn_attribute: &'a str, global: bool) -> Self {
        Self {
            arn_attribute,
            region_attribute: REGION_ATTR,
            global,
        }
    }

    /// Creates an importer for an ARN descriptor. The region override is read
    /// from the attribute carrying the region role.
    pub fn for_descriptor(descriptor: &'a IdentityDescriptor) -> Self {
        let region_attribute = descriptor
            .attributes
            .iter()
            .find(|attr| attr.role == AttributeRole::Region)
            .map_or(REGION_ATTR, |attr| attr.name.as_str());

        Self {
            region_attribute,
            ..Self::new(&descriptor.arn_attribute, descriptor.global)
        }
    }

    /// Takes the ARN from `import_id`, or from the identity record's ARN
    /// attribute when `import_id` is empty.
    pub fn import(
        &self,
        ctx: &CancellationToken,
        ambient: &dyn AmbientContext,
        import_id: &str,
        identity: &dyn AttributeStore,
        resource: &mut dyn ResourceState,
    ) -> Result<()> {
        ensure_active(ctx)?;

        let (input, identity_region) = if import_id.is_empty() {
            let input = identity_text(identity, self.arn_attribute)?.ok_or_else(|| {
                IdentityError::MissingRequiredAttribute {
                    attribute: self.arn_attribute.to_string(),
                }
            })?;
            let region = if self.global {
                None
            } else {
                identity_text(identity, self.region_attribute)?
                    .filter(|region| !region.is_empty())
            };
            (input, region)
        } else {
            (import_id.to_string(), None)
        };

        let arn = Arn::parse(&input).map_err(|source| IdentityError::InvalidArn {
            input: input.clone(),
            source,
        })?;

        if self.global {
            let expected = ambient.partition(ctx);
            if arn.partition() != expected {
                return Err(IdentityError::PartitionMismatch {
                    expected,
                    actual: arn.partition().to_string(),
                });
            }
        } else {
            let expected = identity_region
                .or_else(|| region_override(&*resource))
                .unwrap_or_else(|| ambient.region(ctx));
            if arn.region() != expected {
                return Err(IdentityError::RegionMismatch {
                    expected,
                    actual: arn.region().to_string(),
                });
            }
        }

        ensure_active(ctx)?;

        set_text(resource, self.arn_attribute, &input)?;
        resource.set_id(&input);
        if !self.global {
            set_text(resource, REGION_ATTR, arn.region())?;
        }

        debug!(arn = %arn, global = self.global, "Imported ARN identity");
        Ok(())
    }
}

/// A region the host already placed in the resource state.
fn region_override(resource: &dyn ResourceState) -> Option<String> {
    resource
        .get(REGION_ATTR)
        .and_then(|value| value.as_str().map(str::to_string))
        .filter(|region| !region.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IdentityAttribute, IdentityMap, StateMap, StaticAmbient};
    use serde_json::json;

    const ROLE_ARN: &str = "arn:aws:iam::111111111111:role/example";
    const QUEUE_ARN: &str = "arn:aws:sqs:us-east-1:111111111111:queue";

    fn run(
        global: bool,
        import_id: &str,
        identity: &IdentityMap,
        mut resource: StateMap,
    ) -> (Result<()>, StateMap) {
        let ctx = CancellationToken::new();
        let ambient = StaticAmbient::new("111111111111", "us-east-1");
        let result = ArnImporter::new("arn", global).import(
            &ctx,
            &ambient,
            import_id,
            identity,
            &mut resource,
        );
        (result, resource)
    }

    #[test]
    fn test_global_arn_import() {
        let (result, resource) = run(true, ROLE_ARN, &IdentityMap::new(), StateMap::new());
        result.unwrap();
        assert_eq!(resource.id, ROLE_ARN);
        assert_eq!(resource.get_str("arn"), Some(ROLE_ARN));
        assert_eq!(resource.get("region"), None);
    }

    #[test]
    fn test_invalid_arn() {
        let (result, resource) = run(true, "not-an-arn", &IdentityMap::new(), StateMap::new());
        match result.unwrap_err() {
            IdentityError::InvalidArn { input, .. } => assert_eq!(input, "not-an-arn"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(resource.id, "");
    }

    #[test]
    fn test_global_partition_mismatch() {
        let (result, _) = run(
            true,
            "arn:aws-cn:iam::111111111111:role/example",
            &IdentityMap::new(),
            StateMap::new(),
        );
        match result.unwrap_err() {
            IdentityError::PartitionMismatch { expected, actual } => {
                assert_eq!(expected, "aws");
                assert_eq!(actual, "aws-cn");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_regional_arn_import() {
        let (result, resource) = run(false, QUEUE_ARN, &IdentityMap::new(), StateMap::new());
        result.unwrap();
        assert_eq!(resource.id, QUEUE_ARN);
        assert_eq!(resource.get_str("region"), Some("us-east-1"));
    }

    #[test]
    fn test_regional_region_mismatch() {
        let arn = "arn:aws:sqs:eu-west-1:111111111111:queue";
        let (result, _) = run(false, arn, &IdentityMap::new(), StateMap::new());
        match result.unwrap_err() {
            IdentityError::RegionMismatch { expected, actual } => {
                assert_eq!(expected, "us-east-1");
                assert_eq!(actual, "eu-west-1");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_regional_uses_state_region_override() {
        let arn = "arn:aws:sqs:eu-west-1:111111111111:queue";
        let resource = StateMap::new().with("region", "eu-west-1");
        let (result, resource) = run(false, arn, &IdentityMap::new(), resource);
        result.unwrap();
        assert_eq!(resource.id, arn);
    }

    #[test]
    fn test_identity_path_reads_arn_attribute() {
        let identity = IdentityMap::new().with("arn", ROLE_ARN);
        let (result, resource) = run(true, "", &identity, StateMap::new());
        result.unwrap();
        assert_eq!(resource.id, ROLE_ARN);
    }

    #[test]
    fn test_identity_path_region_override() {
        let arn = "arn:aws:sqs:ap-south-1:111111111111:queue";
        let identity = IdentityMap::new().with("arn", arn).with("region", "ap-south-1");
        let (result, resource) = run(false, "", &identity, StateMap::new());
        result.unwrap();
        assert_eq!(resource.get_str("region"), Some("ap-south-1"));
    }

    #[test]
    fn test_identity_path_empty_region_is_ignored() {
        let identity = IdentityMap::new().with("arn", QUEUE_ARN).with("region", "");
        let (result, resource) = run(false, "", &identity, StateMap::new());
        result.unwrap();
        assert_eq!(resource.id, QUEUE_ARN);
        assert_eq!(resource.get_str("region"), Some("us-east-1"));
    }

    #[test]
    fn test_region_override_follows_role() {
        let descriptor = IdentityDescriptor {
            attributes: vec![
                IdentityAttribute::required("arn"),
                IdentityAttribute {
                    name: "location".to_string(),
                    required: false,
                    role: AttributeRole::Region,
                },
            ],
            ..IdentityDescriptor::regional_arn("arn")
        };
        let arn = "arn:aws:sqs:eu-west-1:111111111111:queue";
        let identity = IdentityMap::new().with("arn", arn).with("location", "eu-west-1");
        let ctx = CancellationToken::new();
        let ambient = StaticAmbient::new("111111111111", "us-east-1");
        let mut resource = StateMap::new();

        ArnImporter::for_descriptor(&descriptor)
            .import(&ctx, &ambient, "", &identity, &mut resource)
            .unwrap();

        assert_eq!(resource.id, arn);
        assert_eq!(resource.get_str("region"), Some("eu-west-1"));
    }

    #[test]
    fn test_identity_path_missing_arn() {
        let (result, _) = run(true, "", &IdentityMap::new(), StateMap::new());
        assert!(matches!(
            result,
            Err(IdentityError::MissingRequiredAttribute { attribute }) if attribute == "arn"
        ));
    }

    #[test]
    fn test_identity_path_non_text_arn() {
        let identity = IdentityMap::new().with("arn", json!(42));
        let (result, _) = run(true, "", &identity, StateMap::new());
        assert!(matches!(result, Err(IdentityError::TypeMismatch { .. })));
    }
}
