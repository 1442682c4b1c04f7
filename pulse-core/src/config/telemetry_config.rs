//! Telemetry settings — tracing filter and toggle.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetrySettings {
    pub enabled: Option<bool>,
    /// Tracing env-filter directive, e.g. `"pulse_analysis=debug"`.
    pub filter: Option<String>,
}

impl TelemetrySettings {
    pub fn effective_enabled(&self) -> bool {
        self.enabled.unwrap_or(false)
    }

    pub fn effective_filter(&self) -> &str {
        self.filter.as_deref().unwrap_or("info")
    }
}
