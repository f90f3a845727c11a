//! Region to partition lookup and region string validation.

/// Partition used when a region matches no special prefix.
pub const DEFAULT_PARTITION: &str = "aws";

/// Region prefixes of the non-default partitions.
///
/// Order matters: `us-isob-` and `us-isof-` must be tested before `us-iso-`.
const PARTITION_PREFIXES: &[(&str, &str)] = &[
    ("cn-", "aws-cn"),
    ("us-gov-", "aws-us-gov"),
    ("us-isob-", "aws-iso-b"),
    ("us-isof-", "aws-iso-f"),
    ("eu-isoe-", "aws-iso-e"),
    ("us-iso-", "aws-iso"),
];

/// Returns the partition a region belongs to.
pub fn partition_for_region(region: &str) -> &'static str {
    PARTITION_PREFIXES
        .iter()
        .find(|(prefix, _)| region.starts_with(prefix))
        .map_or(DEFAULT_PARTITION, |(_, partition)| partition)
}

/// Trims surrounding whitespace and lowercases a region.
pub fn normalize_region(region: &str) -> String {
    region.trim().to_ascii_lowercase()
}

/// Checks that a normalized region has the `{area}-{location}-{number}` shape,
/// e.g. `us-east-1` or `us-gov-west-1`.
pub fn validate_region(region: &str) -> bool {
    let parts: Vec<&str> = region.split('-').collect();
    let Some((number, words)) = parts.split_last() else {
        return false;
    };

    if words.len() < 2 {
        return false;
    }

    !number.is_empty()
        && number.chars().all(|c| c.is_ascii_digit())
        && words
            .iter()
            .all(|w| !w.is_empty() && w.chars().all(|c| c.is_ascii_lowercase()))
}
