//! Ambient account and region supplied by the caller's configuration.

use anchor_arn::partition_for_region;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

/// Read-only view of the configured account and region.
///
/// Implementations are expected to be cheap and local (already-resolved
/// configuration). The core calls them fresh on every operation and never
/// caches the results.
pub trait AmbientContext {
    /// The configured account ID.
    fn account_id(&self, ctx: &CancellationToken) -> String;

    /// The configured region.
    fn region(&self, ctx: &CancellationToken) -> String;

    /// The configured partition. Defaults to the partition owning
    /// [`AmbientContext::region`].
    fn partition(&self, ctx: &CancellationToken) -> String {
        partition_for_region(&self.region(ctx)).to_string()
    }
}

/// Ambient context from fixed values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticAmbient {
    pub account_id: String,
    pub region: String,

    /// Explicit partition; derived from `region` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition: Option<String>,
}

impl StaticAmbient {
    /// Creates an ambient context for an account and region.
    pub fn new(account_id: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            region: region.into(),
            partition: None,
        }
    }

    /// Overrides the partition derived from the region.
    #[must_use]
    pub fn with_partition(mut self, partition: impl Into<String>) -> Self {
        self.partition = Some(partition.into());
        self
    }
}

impl AmbientContext for StaticAmbient {
    fn account_id(&self, _ctx: &CancellationToken) -> String {
        self.account_id.clone()
    }

    fn region(&self, _ctx: &CancellationToken) -> String {
        self.region.clone()
    }

    fn partition(&self, _ctx: &CancellationToken) -> String {
        match &self.partition {
            Some(partition) => partition.clone(),
            None => partition_for_region(&self.region).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_derived_from_region() {
        let ctx = CancellationToken::new();
        let ambient = StaticAmbient::new("111111111111", "cn-north-1");
        assert_eq!(ambient.partition(&ctx), "aws-cn");

        let ambient = ambient.with_partition("aws");
        assert_eq!(ambient.partition(&ctx), "aws");
    }

    #[test]
    fn test_json_without_partition() {
        let ambient: StaticAmbient =
            serde_json::from_str(r#"{"account_id": "111111111111", "region": "us-east-1"}"#)
                .unwrap();
        assert_eq!(ambient, StaticAmbient::new("111111111111", "us-east-1"));
    }
}
