//! # anchor-arn
//!
//! ARN parsing and validation, plus the region-to-partition table.
//!
//! ## ARN Format
//!
//! `arn:{partition}:{service}:{region}:{account}:{resource}`
//!
//! Examples:
//! - `arn:aws:iam::111111111111:role/example` (global, no region)
//! - `arn:aws:sqs:us-east-1:111111111111:queue-name`
//! - `arn:aws-cn:s3:::bucket-name` (no region, no account)
//!
//! The resource section may itself contain colons; everything after the fifth
//! separator belongs to it.

mod arn;
mod error;
mod partition;

pub use arn::Arn;
pub use error::ArnError;
pub use partition::{normalize_region, partition_for_region, validate_region, DEFAULT_PARTITION};
