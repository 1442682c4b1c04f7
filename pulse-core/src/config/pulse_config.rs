//! Top-level Pulse configuration with 4-layer resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{EngineSettings, TelemetrySettings};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`PULSE_*`)
/// 3. Project config (`pulse.toml` in project root)
/// 4. User config (`~/.pulse/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PulseConfig {
    pub engine: EngineSettings,
    pub telemetry: TelemetrySettings,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub min_sample_size: Option<u64>,
    pub alert_cooldown_ms: Option<u64>,
    pub significance_level: Option<f64>,
}

impl PulseConfig {
    /// Load configuration with 4-layer resolution.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(ConfigError::ParseError { .. }) => {
                        return Err(ConfigError::ParseError {
                            path: user_config_path.display().to_string(),
                            message: "invalid TOML in user config".to_string(),
                        });
                    }
                    Err(_) => {
                        // Non-parse errors from user config are warnings, not fatal.
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join("pulse.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &PulseConfig) -> Result<(), ConfigError> {
        for (field, value) in [
            (
                "engine.confidence_change_threshold",
                config.engine.confidence_change_threshold,
            ),
            ("engine.significance_level", config.engine.significance_level),
            (
                "engine.high_confidence_threshold",
                config.engine.high_confidence_threshold,
            ),
        ] {
            if let Some(v) = value {
                if !(0.0..=1.0).contains(&v) {
                    return Err(ConfigError::ValidationFailed {
                        field: field.to_string(),
                        message: "must be between 0.0 and 1.0".to_string(),
                    });
                }
            }
        }
        if let Some(window) = config.engine.trend_detection_window {
            if window < 3 {
                return Err(ConfigError::ValidationFailed {
                    field: "engine.trend_detection_window".to_string(),
                    message: "must be at least 3".to_string(),
                });
            }
        }
        if let Some(n) = config.engine.min_sample_size {
            if n == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "engine.min_sample_size".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.pulse/config.toml`.
    fn user_config_path() -> Option<std::path::PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut PulseConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: PulseConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base`
    /// values only when `other` has a `Some` value.
    fn merge(base: &mut PulseConfig, other: &PulseConfig) {
        // Engine
        if other.engine.min_sample_size.is_some() {
            base.engine.min_sample_size = other.engine.min_sample_size;
        }
        if other.engine.confidence_change_threshold.is_some() {
            base.engine.confidence_change_threshold = other.engine.confidence_change_threshold;
        }
        if other.engine.significance_level.is_some() {
            base.engine.significance_level = other.engine.significance_level;
        }
        if other.engine.trend_detection_window.is_some() {
            base.engine.trend_detection_window = other.engine.trend_detection_window;
        }
        if other.engine.alert_cooldown_ms.is_some() {
            base.engine.alert_cooldown_ms = other.engine.alert_cooldown_ms;
        }
        if other.engine.high_confidence_threshold.is_some() {
            base.engine.high_confidence_threshold = other.engine.high_confidence_threshold;
        }

        // Telemetry
        if other.telemetry.enabled.is_some() {
            base.telemetry.enabled = other.telemetry.enabled;
        }
        if other.telemetry.filter.is_some() {
            base.telemetry.filter = other.telemetry.filter.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `PULSE_MIN_SAMPLE_SIZE`, `PULSE_ALERT_COOLDOWN_MS`, etc.
    fn apply_env_overrides(config: &mut PulseConfig) {
        if let Ok(val) = std::env::var("PULSE_MIN_SAMPLE_SIZE") {
            if let Ok(v) = val.parse::<u64>() {
                config.engine.min_sample_size = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PULSE_CONFIDENCE_CHANGE_THRESHOLD") {
            if let Ok(v) = val.parse::<f64>() {
                config.engine.confidence_change_threshold = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PULSE_SIGNIFICANCE_LEVEL") {
            if let Ok(v) = val.parse::<f64>() {
                config.engine.significance_level = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PULSE_TREND_DETECTION_WINDOW") {
            if let Ok(v) = val.parse::<usize>() {
                config.engine.trend_detection_window = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PULSE_ALERT_COOLDOWN_MS") {
            if let Ok(v) = val.parse::<u64>() {
                config.engine.alert_cooldown_ms = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PULSE_HIGH_CONFIDENCE_THRESHOLD") {
            if let Ok(v) = val.parse::<f64>() {
                config.engine.high_confidence_threshold = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PULSE_TELEMETRY_ENABLED") {
            if let Ok(v) = val.parse::<bool>() {
                config.telemetry.enabled = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut PulseConfig, cli: &CliOverrides) {
        if let Some(v) = cli.min_sample_size {
            config.engine.min_sample_size = Some(v);
        }
        if let Some(v) = cli.alert_cooldown_ms {
            config.engine.alert_cooldown_ms = Some(v);
        }
        if let Some(v) = cli.significance_level {
            config.engine.significance_level = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Returns the user-level pulse config directory: `~/.pulse/`.
fn dirs_path() -> Option<std::path::PathBuf> {
    home_dir().map(|h| h.join(".pulse"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<std::path::PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(std::path::PathBuf::from)
}
