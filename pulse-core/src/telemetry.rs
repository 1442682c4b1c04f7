//! Tracing bootstrap for binaries, benches, and tests.
//!
//! The library itself never installs a global subscriber; hosts opt in.

use tracing_subscriber::EnvFilter;

use crate::config::TelemetrySettings;

/// Install a fmt subscriber honoring `RUST_LOG` over the configured filter.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init(settings: &TelemetrySettings) {
    if !settings.effective_enabled() {
        return;
    }
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.effective_filter()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
