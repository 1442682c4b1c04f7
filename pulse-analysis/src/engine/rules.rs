//! Alert rule evaluation.
//!
//! Five independent checks over the freshly updated history. Each
//! contributes at most one candidate; candidates are filtered against
//! the cooldown ledger by the engine, not here.

use smallvec::SmallVec;

use pulse_core::config::EngineConfig;
use pulse_core::types::alert::{AlertSignificance, AlertType};
use pulse_core::types::observation::PatternObservation;

use super::history::PatternHistory;
use crate::stats::{anomaly, significance, TrendDirection, DEFAULT_ANOMALY_THRESHOLD};

/// Sample size required before the producer's significance claim alerts.
const MIN_SIGNIFICANCE_SAMPLES: u64 = 10;
/// Absolute slope a significant trend must exceed to alert.
const TREND_EFFECT_FLOOR: f64 = 0.1;
/// Z-score a detected anomaly must exceed to alert.
const ANOMALY_ALERT_FLOOR: f64 = 2.5;
/// Z-score above which an anomaly alert is high significance.
const ANOMALY_HIGH_SCORE: f64 = 3.0;

const ACTION_APPLY: &str = "Consider applying this pattern more broadly";
const ACTION_MONITOR: &str = "Monitor for further validation";
const ACTION_INVESTIGATE: &str = "Investigate potential issues with this pattern";
const ACTION_REVIEW: &str = "Review the pattern for promotion to active use";

/// An alert candidate before id assignment and cooldown filtering.
#[derive(Debug, Clone)]
pub(crate) struct CandidateAlert {
    pub alert_type: AlertType,
    pub significance: AlertSignificance,
    pub message: String,
    pub previous_confidence: Option<f64>,
    pub recommended_action: String,
}

/// Evaluate all rules for one observation.
///
/// `history` already contains `current` at its tail; `first_observation`
/// reflects whether the pattern was unknown before this call.
pub(crate) fn evaluate(
    config: &EngineConfig,
    current: &PatternObservation,
    previous: Option<&PatternObservation>,
    history: &PatternHistory,
    first_observation: bool,
) -> SmallVec<[CandidateAlert; 4]> {
    let mut candidates = SmallVec::new();

    if let Some(candidate) = new_pattern_rule(config, current, first_observation) {
        candidates.push(candidate);
    }
    if let Some(candidate) = confidence_change_rule(config, current, previous) {
        candidates.push(candidate);
    }
    if let Some(candidate) = significance_rule(config, current) {
        candidates.push(candidate);
    }
    if let Some(candidate) = trend_rule(config, current, history) {
        candidates.push(candidate);
    }
    if let Some(candidate) = anomaly_rule(current, history) {
        candidates.push(candidate);
    }

    candidates
}

/// A pattern entering tracking at high confidence is worth a look even
/// before any history accumulates.
fn new_pattern_rule(
    config: &EngineConfig,
    current: &PatternObservation,
    first_observation: bool,
) -> Option<CandidateAlert> {
    if !first_observation || current.confidence_score < config.high_confidence_threshold {
        return None;
    }
    let significance = if current.statistical_significance <= config.significance_level {
        AlertSignificance::High
    } else {
        AlertSignificance::Medium
    };
    Some(CandidateAlert {
        alert_type: AlertType::NewPattern,
        significance,
        message: format!(
            "New pattern {} entered tracking at confidence {:.2} (n = {})",
            current.pattern_id, current.confidence_score, current.sample_size
        ),
        previous_confidence: None,
        recommended_action: ACTION_MONITOR.to_string(),
    })
}

fn confidence_change_rule(
    config: &EngineConfig,
    current: &PatternObservation,
    previous: Option<&PatternObservation>,
) -> Option<CandidateAlert> {
    let previous = previous?;
    let delta = current.confidence_score - previous.confidence_score;

    if delta >= config.confidence_change_threshold {
        let recommended_action = if current.confidence_score >= config.high_confidence_threshold {
            ACTION_APPLY
        } else {
            ACTION_MONITOR
        };
        Some(CandidateAlert {
            alert_type: AlertType::ConfidenceIncrease,
            significance: change_significance(delta, current.sample_size),
            message: format!(
                "Confidence for pattern {} rose from {:.2} to {:.2}",
                current.pattern_id, previous.confidence_score, current.confidence_score
            ),
            previous_confidence: Some(previous.confidence_score),
            recommended_action: recommended_action.to_string(),
        })
    } else if delta <= -config.confidence_change_threshold {
        Some(CandidateAlert {
            alert_type: AlertType::ConfidenceDecrease,
            significance: change_significance(-delta, current.sample_size),
            message: format!(
                "Confidence for pattern {} dropped from {:.2} to {:.2}",
                current.pattern_id, previous.confidence_score, current.confidence_score
            ),
            previous_confidence: Some(previous.confidence_score),
            recommended_action: ACTION_INVESTIGATE.to_string(),
        })
    } else {
        None
    }
}

/// Graduate the change by magnitude, with large samples promoting a tier.
fn change_significance(delta_abs: f64, sample_size: u64) -> AlertSignificance {
    if delta_abs >= 0.20 || sample_size >= 20 {
        AlertSignificance::High
    } else if delta_abs >= 0.10 || sample_size >= 10 {
        AlertSignificance::Medium
    } else {
        AlertSignificance::Low
    }
}

fn significance_rule(
    config: &EngineConfig,
    current: &PatternObservation,
) -> Option<CandidateAlert> {
    if current.statistical_significance > config.significance_level
        || current.sample_size < MIN_SIGNIFICANCE_SAMPLES
    {
        return None;
    }
    Some(CandidateAlert {
        alert_type: AlertType::StatisticalSignificance,
        significance: AlertSignificance::High,
        message: format!(
            "Pattern {} achieved statistical significance (p = {:.3}, n = {})",
            current.pattern_id, current.statistical_significance, current.sample_size
        ),
        previous_confidence: None,
        recommended_action: ACTION_REVIEW.to_string(),
    })
}

fn trend_rule(
    config: &EngineConfig,
    current: &PatternObservation,
    history: &PatternHistory,
) -> Option<CandidateAlert> {
    if history.len() < config.trend_detection_window {
        return None;
    }

    // Trailing window, newest (= current) at the tail.
    let confidences = history.confidences();
    let window = &confidences[confidences.len() - config.trend_detection_window..];
    let historical = &window[..window.len() - 1];
    let analysis = significance::analyze(current.confidence_score, historical);

    if !analysis.is_significant || analysis.effect_size <= TREND_EFFECT_FLOOR {
        return None;
    }

    match analysis.direction {
        TrendDirection::Improving => Some(CandidateAlert {
            alert_type: AlertType::ConfidenceIncrease,
            significance: AlertSignificance::High,
            message: format!(
                "Pattern {} confidence is improving significantly (p = {:.4}, slope {:+.3} per observation)",
                current.pattern_id, analysis.p_value, analysis.effect_size
            ),
            previous_confidence: None,
            recommended_action: if current.confidence_score >= config.high_confidence_threshold {
                ACTION_APPLY.to_string()
            } else {
                ACTION_MONITOR.to_string()
            },
        }),
        TrendDirection::Declining => Some(CandidateAlert {
            alert_type: AlertType::ConfidenceDecrease,
            significance: AlertSignificance::High,
            message: format!(
                "Pattern {} confidence is declining significantly (p = {:.4}, slope {:+.3} per observation)",
                current.pattern_id, analysis.p_value, -analysis.effect_size
            ),
            previous_confidence: None,
            recommended_action: ACTION_INVESTIGATE.to_string(),
        }),
        TrendDirection::Stable => None,
    }
}

fn anomaly_rule(
    current: &PatternObservation,
    history: &PatternHistory,
) -> Option<CandidateAlert> {
    if history.len() < anomaly::MIN_ANOMALY_POINTS {
        return None;
    }

    // Current is already the tail of the history buffer.
    let series = history.confidences();
    let report = anomaly::detect(&series, DEFAULT_ANOMALY_THRESHOLD);
    if !report.has_anomaly || report.anomaly_score <= ANOMALY_ALERT_FLOOR {
        return None;
    }

    let (low, high) = report.expected_range;
    let above = report.latest_value > high;
    let (alert_type, recommended_action) = if above {
        (AlertType::ConfidenceIncrease, ACTION_MONITOR)
    } else {
        (AlertType::ConfidenceDecrease, ACTION_INVESTIGATE)
    };
    let significance = if report.anomaly_score > ANOMALY_HIGH_SCORE {
        AlertSignificance::High
    } else {
        AlertSignificance::Medium
    };

    Some(CandidateAlert {
        alert_type,
        significance,
        message: format!(
            "Confidence {:.2} for pattern {} is outside the expected range [{:.2}, {:.2}] (z = {:.2})",
            report.latest_value, current.pattern_id, low, high, report.anomaly_score
        ),
        previous_confidence: None,
        recommended_action: recommended_action.to_string(),
    })
}
