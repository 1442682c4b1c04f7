//! Alert engine thresholds.

use serde::{Deserialize, Serialize};

/// Resolved thresholds governing alert evaluation.
///
/// Defaults match the alerting behavior the downstream dashboard was
/// tuned against; change them through configuration, not code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Observations backed by fewer outcome events than this are ignored.
    pub min_sample_size: u64,
    /// Absolute confidence delta that triggers an increase/decrease alert.
    pub confidence_change_threshold: f64,
    /// Producer-supplied significance at or below this level alerts.
    pub significance_level: f64,
    /// History length required before trend regression runs.
    pub trend_detection_window: usize,
    /// Minimum interval between same-type alerts for one pattern.
    pub alert_cooldown_ms: u64,
    /// Confidence at which a pattern is considered ready to apply.
    pub high_confidence_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_sample_size: 5,
            confidence_change_threshold: 0.10,
            significance_level: 0.05,
            trend_detection_window: 5,
            alert_cooldown_ms: 300_000,
            high_confidence_threshold: 0.80,
        }
    }
}

/// TOML-facing engine settings. `None` means "use the compiled default".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub min_sample_size: Option<u64>,
    pub confidence_change_threshold: Option<f64>,
    pub significance_level: Option<f64>,
    pub trend_detection_window: Option<usize>,
    pub alert_cooldown_ms: Option<u64>,
    pub high_confidence_threshold: Option<f64>,
}

impl EngineSettings {
    /// Collapse the optional layer onto the compiled defaults.
    pub fn resolve(&self) -> EngineConfig {
        let defaults = EngineConfig::default();
        EngineConfig {
            min_sample_size: self.min_sample_size.unwrap_or(defaults.min_sample_size),
            confidence_change_threshold: self
                .confidence_change_threshold
                .unwrap_or(defaults.confidence_change_threshold),
            significance_level: self
                .significance_level
                .unwrap_or(defaults.significance_level),
            trend_detection_window: self
                .trend_detection_window
                .unwrap_or(defaults.trend_detection_window),
            alert_cooldown_ms: self.alert_cooldown_ms.unwrap_or(defaults.alert_cooldown_ms),
            high_confidence_threshold: self
                .high_confidence_threshold
                .unwrap_or(defaults.high_confidence_threshold),
        }
    }
}
