//! Logging bootstrap
//!
//! The library only emits `tracing` events; this installs a fmt subscriber
//! for binaries and tests that want to see them.

use tracing_subscriber::{fmt, EnvFilter};

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "info,record_repo=debug";

/// Install a global fmt subscriber filtered by `RUST_LOG`, else `default_filter`
///
/// Returns `false` when a global subscriber was already installed; in that
/// case nothing changes.
pub fn init_tracing(default_filter: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
