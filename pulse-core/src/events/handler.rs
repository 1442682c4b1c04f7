//! PulseEventHandler — observer trait with no-op defaults.

use super::types::*;

/// Receives engine lifecycle events. Every method has a no-op default so
/// handlers implement only what they care about.
pub trait PulseEventHandler: Send + Sync {
    fn on_observation_recorded(&self, _event: &ObservationRecordedEvent) {}
    fn on_observation_rejected(&self, _event: &ObservationRejectedEvent) {}
    fn on_alert_raised(&self, _event: &AlertRaisedEvent) {}
    fn on_alert_suppressed(&self, _event: &AlertSuppressedEvent) {}
    fn on_history_cleared(&self, _event: &HistoryClearedEvent) {}
}
