//! The parsed ARN type.

use crate::ArnError;

/// Number of colon-separated sections in an ARN, including the `arn` literal.
const SECTIONS: usize = 6;

/// A parsed Amazon Resource Name.
///
/// Parsing is strict about structure and lenient about content: the service
/// and resource sections are not checked against any catalogue.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Arn {
    partition: String,
    service: String,
    region: String,
    account_id: String,
    resource: String,
}

impl Arn {
    /// Parses an ARN from a string.
    pub fn parse(s: &str) -> Result<Self, ArnError> {
        if s.is_empty() {
            return Err(ArnError::Empty);
        }

        let Some(rest) = s.strip_prefix("arn:") else {
            return Err(ArnError::MissingPrefix);
        };

        let sections: Vec<&str> = rest.splitn(SECTIONS - 1, ':').collect();
        let [partition, service, region, account_id, resource] = sections.as_slice() else {
            return Err(ArnError::TooFewSections {
                found: sections.len() + 1,
            });
        };

        if partition.is_empty() {
            return Err(ArnError::EmptyPartition);
        }
        if service.is_empty() {
            return Err(ArnError::EmptyService);
        }
        if resource.is_empty() {
            return Err(ArnError::EmptyResource);
        }

        if !region
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(ArnError::InvalidRegion((*region).to_string()));
        }

        if !is_valid_account_id(account_id) {
            return Err(ArnError::InvalidAccountId((*account_id).to_string()));
        }

        Ok(Self {
            partition: (*partition).to_string(),
            service: (*service).to_string(),
            region: (*region).to_string(),
            account_id: (*account_id).to_string(),
            resource: (*resource).to_string(),
        })
    }

    /// The partition, e.g. `aws` or `aws-cn`.
    pub fn partition(&self) -> &str {
        &self.partition
    }

    /// The service namespace, e.g. `iam`.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// The region, empty for global resources.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// The owning account, empty for resources such as S3 buckets.
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// Everything after the account section.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Returns true if the ARN carries no region.
    pub fn is_global(&self) -> bool {
        self.region.is_empty()
    }
}

/// Account IDs are 12 digits. Empty is allowed for account-less resources and
/// `aws` for service-owned ones (managed policies).
fn is_valid_account_id(account_id: &str) -> bool {
    account_id.is_empty()
        || account_id == "aws"
        || (account_id.len() == 12 && account_id.chars().all(|c| c.is_ascii_digit()))
}

impl std::fmt::Display for Arn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "arn:{}:{}:{}:{}:{}",
            self.partition, self.service, self.region, self.account_id, self.resource
        )
    }
}

impl std::str::FromStr for Arn {
    type Err = ArnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for Arn {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Arn {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
