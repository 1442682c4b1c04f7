//! Event payload types for all 5 Pulse events.

use crate::types::alert::{AlertRecord, AlertType};
use crate::types::observation::PatternId;

/// Payload for `on_observation_recorded`.
#[derive(Debug, Clone)]
pub struct ObservationRecordedEvent {
    pub pattern_id: PatternId,
    pub confidence: f64,
    pub sample_size: u64,
}

/// Payload for `on_observation_rejected`.
#[derive(Debug, Clone)]
pub struct ObservationRejectedEvent {
    pub pattern_id: PatternId,
    pub reason: String,
}

/// Payload for `on_alert_raised`.
#[derive(Debug, Clone)]
pub struct AlertRaisedEvent {
    pub alert: AlertRecord,
}

/// Payload for `on_alert_suppressed`.
#[derive(Debug, Clone)]
pub struct AlertSuppressedEvent {
    pub pattern_id: PatternId,
    pub alert_type: AlertType,
    /// Milliseconds until this alert type may fire again.
    pub remaining_ms: u64,
}

/// Payload for `on_history_cleared`. `None` means a full engine reset.
#[derive(Debug, Clone)]
pub struct HistoryClearedEvent {
    pub pattern_id: Option<PatternId>,
}
