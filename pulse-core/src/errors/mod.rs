//! Error handling for Pulse.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod engine_error;
pub mod error_code;
pub mod observation_error;

pub use config_error::ConfigError;
pub use engine_error::EngineError;
pub use error_code::PulseErrorCode;
pub use observation_error::ObservationError;
