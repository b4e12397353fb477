//! Logging setup and version banner

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set
fn default_directives() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

/// Initialize the `tracing` subscriber for the explorer.
///
/// Logs go to stderr so that stdout only carries the resolved routes.
pub fn setup_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    log_version_info();
}

/// Log the crate name and version
pub fn log_version_info() {
    tracing::info!("{}", short_version_info());
}

pub fn short_version_info() -> String {
    format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
