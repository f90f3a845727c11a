//! Test doubles and fixtures shared by the workspace's integration tests.

mod ambient;
mod store;

pub mod fixtures;

pub use ambient::RecordingAmbient;
pub use store::FailingStore;

/// Installs a test-friendly tracing subscriber once per process.
///
/// Output goes through the test harness writer so it only shows for failing
/// tests. Repeated calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}
