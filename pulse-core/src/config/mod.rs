//! Configuration with layered resolution, mirrored across `pulse.toml`,
//! `PULSE_*` environment variables, and CLI overrides.

pub mod engine_config;
pub mod pulse_config;
pub mod telemetry_config;

pub use engine_config::{EngineConfig, EngineSettings};
pub use pulse_config::{CliOverrides, PulseConfig};
pub use telemetry_config::TelemetrySettings;
