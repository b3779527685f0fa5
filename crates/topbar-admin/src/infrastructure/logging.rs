//! Log output setup.

use tracing_subscriber::EnvFilter;

/// Installs a global `tracing` fmt subscriber.
///
/// The filter comes from `RUST_LOG` when set, otherwise from `default_level`
/// (e.g. the configured `log_level`), otherwise `info`.  Returns `false` if a
/// global subscriber was already installed; calling this twice is harmless.
pub fn init_logging(default_level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
