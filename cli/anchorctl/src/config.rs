//! Configuration: ambient context from flags/environment, descriptors and
//! identity records from JSON files.

use std::fs;
use std::path::Path;

use anchor_identity::{IdentityDescriptor, IdentityMap, StaticAmbient};
use anyhow::{Context, Result};
use clap::Args;
use serde::de::DeserializeOwned;

use crate::error::CliError;

/// Ambient account, region and partition.
#[derive(Debug, Clone, Default, Args)]
pub struct AmbientArgs {
    /// Account ID the caller is configured for.
    #[arg(long, global = true, env = "ANCHOR_ACCOUNT_ID")]
    pub account_id: Option<String>,

    /// Region the caller is configured for.
    #[arg(long, global = true, env = "ANCHOR_REGION")]
    pub region: Option<String>,

    /// Partition override; derived from the region when unset.
    #[arg(long, global = true, env = "ANCHOR_PARTITION")]
    pub partition: Option<String>,
}

impl AmbientArgs {
    /// Builds the ambient context, failing if account or region is missing.
    pub fn resolve(&self) -> Result<StaticAmbient, CliError> {
        let account_id = non_empty(self.account_id.as_deref())
            .ok_or(CliError::MissingAmbient("account ID", "ANCHOR_ACCOUNT_ID"))?;
        let region = non_empty(self.region.as_deref())
            .ok_or(CliError::MissingAmbient("region", "ANCHOR_REGION"))?;

        let ambient = StaticAmbient::new(account_id, region);
        Ok(match non_empty(self.partition.as_deref()) {
            Some(partition) => ambient.with_partition(partition),
            None => ambient,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} from {:?}", what, path))?;

    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse {} from {:?}", what, path))
}

/// Load and validate an identity descriptor.
pub fn load_descriptor(path: &Path) -> Result<IdentityDescriptor> {
    let descriptor: IdentityDescriptor = read_json(path, "descriptor")?;
    descriptor
        .validate()
        .with_context(|| format!("Invalid descriptor in {:?}", path))?;
    Ok(descriptor)
}

/// Load an identity record.
pub fn load_identity(path: &Path) -> Result<IdentityMap> {
    read_json(path, "identity record")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_resolve_ambient() {
        let args = AmbientArgs {
            account_id: Some("111111111111".to_string()),
            region: Some(" cn-north-1 ".to_string()),
            partition: Some(String::new()),
        };
        let ambient = args.resolve().unwrap();
        assert_eq!(ambient.region, "cn-north-1");
        assert_eq!(ambient.partition, None);
    }

    #[test]
    fn test_resolve_requires_account() {
        let args = AmbientArgs {
            region: Some("us-east-1".to_string()),
            ..AmbientArgs::default()
        };
        assert!(matches!(
            args.resolve(),
            Err(CliError::MissingAmbient("account ID", _))
        ));
    }

    #[test]
    fn test_load_descriptor() {
        let file = write_temp(
            r#"{"attributes":[{"name":"arn","required":true}],"is_arn":true,"global":true}"#,
        );
        let descriptor = load_descriptor(file.path()).unwrap();
        assert!(descriptor.is_arn);
        assert_eq!(descriptor.arn_attribute, "arn");
    }

    #[test]
    fn test_load_invalid_descriptor() {
        let file = write_temp(r#"{"attributes": [], "id_shadow_attribute": "name"}"#);
        let err = load_descriptor(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid descriptor"));
    }

    #[test]
    fn test_load_identity() {
        let file = write_temp(r#"{"name": "foo", "port": 443}"#);
        let identity = load_identity(file.path()).unwrap();
        assert_eq!(identity.get_str("name"), Some("foo"));
        assert_eq!(identity.len(), 2);
    }
}
