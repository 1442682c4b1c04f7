//! Alert engine errors.
//!
//! The engine degrades to "fewer or no alerts" for undersized input; its
//! only hard failure mode is a malformed observation at the boundary.

use crate::types::observation::PatternId;

use super::error_code::{self, PulseErrorCode};
use super::observation_error::ObservationError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("rejected observation for pattern {pattern_id}: {source}")]
    InvalidObservation {
        pattern_id: PatternId,
        #[source]
        source: ObservationError,
    },
}

impl PulseErrorCode for EngineError {
    fn error_code(&self) -> &'static str {
        error_code::ENGINE_ERROR
    }
}
