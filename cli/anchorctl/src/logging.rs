//! Logging initialization.
//!
//! Logs go to stderr so that command output on stdout stays parseable.

use std::io;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when neither `RUST_LOG` nor `--log-level` is set.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Initialize tracing (prefer RUST_LOG, fallback to the configured level).
pub fn init(log_level: &str, json: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .without_time()
                    .with_writer(io::stderr),
            )
            .try_init()?;
    }

    Ok(())
}
