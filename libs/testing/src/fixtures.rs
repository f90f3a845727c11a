//! Shared constants and descriptors.

use anchor_identity::{IdentityAttribute, IdentityDescriptor};

pub const ACCOUNT_ID: &str = "111111111111";
pub const OTHER_ACCOUNT_ID: &str = "222222222222";
pub const REGION: &str = "us-east-1";

/// A regional resource named by a required `name`, mirrored into the ID.
pub fn named_resource() -> IdentityDescriptor {
    IdentityDescriptor::parameterized([IdentityAttribute::required("name")]).with_id_shadow("name")
}

/// A global resource named by a required `bucket`, mirrored into the ID.
pub fn global_bucket() -> IdentityDescriptor {
    IdentityDescriptor::global_parameterized([IdentityAttribute::required("bucket")])
        .with_id_shadow("bucket")
}
