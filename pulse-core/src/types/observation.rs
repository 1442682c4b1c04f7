//! Pattern observation — the engine's sole input type.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ObservationError;

/// Opaque identifier for a tracked pattern, stable across observations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternId(String);

impl PatternId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PatternId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PatternId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One snapshot of a tracked pattern at a point in time.
///
/// Produced by an upstream pattern-computation process whenever the
/// pattern is re-estimated from new outcome data. The engine trusts the
/// producer for `statistical_significance`; only the trend significance
/// is computed downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternObservation {
    pub pattern_id: PatternId,
    /// Believed validity of the pattern, in [0, 1].
    pub confidence_score: f64,
    /// Number of underlying outcome events backing the score.
    pub sample_size: u64,
    /// Fraction of backing events classified successful, in [0, 1].
    pub success_rate: f64,
    /// Producer-supplied p-value-like validity measure, in [0, 1].
    pub statistical_significance: f64,
    /// Unix epoch milliseconds.
    pub timestamp_ms: u64,
}

impl PatternObservation {
    /// Check the documented field ranges.
    ///
    /// Out-of-range or non-finite scores must never reach the regression
    /// math; the engine rejects the observation before any state mutation.
    pub fn validate(&self) -> Result<(), ObservationError> {
        check_unit("confidence_score", self.confidence_score)?;
        check_unit("success_rate", self.success_rate)?;
        check_unit("statistical_significance", self.statistical_significance)?;
        Ok(())
    }
}

fn check_unit(field: &'static str, value: f64) -> Result<(), ObservationError> {
    if !value.is_finite() {
        return Err(ObservationError::NotFinite { field });
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(ObservationError::OutOfRange { field, value });
    }
    Ok(())
}
