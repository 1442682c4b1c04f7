//! Observation boundary errors.

use super::error_code::{self, PulseErrorCode};

/// Contract violations in an incoming observation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ObservationError {
    #[error("{field} is {value}, expected a value in [0, 1]")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("{field} is not a finite number")]
    NotFinite { field: &'static str },
}

impl PulseErrorCode for ObservationError {
    fn error_code(&self) -> &'static str {
        error_code::OBSERVATION_ERROR
    }
}
