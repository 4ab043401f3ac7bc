/**
 * Tracing Setup
 *
 * Installs a `tracing_subscriber::fmt` subscriber for hosts that do not bring
 * their own. `RUST_LOG` wins over `default_filter` when set.
 */

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "healthtrack=info";

/// Filter from `RUST_LOG`, or `default_filter` when unset or unparsable.
pub fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Install the global subscriber.
///
/// Returns `false` if a subscriber was already installed; calling this twice
/// is harmless.
pub fn init_tracing(default_filter: &str) -> bool {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_filter))
        .with_target(false)
        .try_init()
        .is_ok();
    if installed {
        tracing::debug!("[Logging] Tracing initialized");
    }
    installed
}
