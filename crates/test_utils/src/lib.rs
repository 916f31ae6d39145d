//! Shared fixtures and builders for integration tests

pub mod builders;

use once_cell::sync::OnceCell;

static TRACING: OnceCell<()> = OnceCell::new();

/// Installs a test tracing subscriber once per process
pub fn init_tracing() {
    TRACING.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "debug".into()),
            )
            .with_test_writer()
            .try_init();
    });
}
