//! Alert records emitted by the engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::observation::PatternId;

/// Unique identifier for one emitted alert.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertId(String);

impl AlertId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What kind of change triggered the alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    /// A pattern entered tracking at high confidence.
    NewPattern,
    /// Confidence rose past a threshold, trend, or expected range.
    ConfidenceIncrease,
    /// Confidence fell past a threshold, trend, or expected range.
    ConfidenceDecrease,
    /// The pattern's own significance measure crossed the alert level.
    StatisticalSignificance,
}

impl AlertType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::NewPattern => "new_pattern",
            Self::ConfidenceIncrease => "confidence_increase",
            Self::ConfidenceDecrease => "confidence_decrease",
            Self::StatisticalSignificance => "statistical_significance",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How much attention the alert deserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSignificance {
    Low,
    Medium,
    High,
}

impl AlertSignificance {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for AlertSignificance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One emitted alert, returned to the caller and fanned out via events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRecord {
    pub id: AlertId,
    pub alert_type: AlertType,
    pub pattern_id: PatternId,
    pub message: String,
    pub significance: AlertSignificance,
    /// The confidence that triggered the alert.
    pub confidence: f64,
    pub previous_confidence: Option<f64>,
    pub sample_size: u64,
    pub recommended_action: String,
    pub created_at_ms: u64,
}
