//! Channel-backed event forwarding for queue-style consumers.

use crossbeam_channel::{Sender, TrySendError};

use super::handler::PulseEventHandler;
use super::types::AlertRaisedEvent;
use crate::types::alert::AlertRecord;

/// Forwards raised alerts into a crossbeam channel.
///
/// Lets consumers drain alerts from a queue instead of implementing a
/// handler. A full or disconnected receiver drops the alert rather than
/// blocking the engine's observation path.
pub struct ChannelForwarder {
    tx: Sender<AlertRecord>,
}

impl ChannelForwarder {
    pub fn new(tx: Sender<AlertRecord>) -> Self {
        Self { tx }
    }
}

impl PulseEventHandler for ChannelForwarder {
    fn on_alert_raised(&self, event: &AlertRaisedEvent) {
        match self.tx.try_send(event.alert.clone()) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                tracing::warn!(
                    alert_id = %event.alert.id,
                    "alert channel full; dropping alert"
                );
            }
            Err(TrySendError::Disconnected(_)) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::alert::{AlertId, AlertSignificance, AlertType};
    use crate::types::observation::PatternId;

    fn alert(id: &str) -> AlertRecord {
        AlertRecord {
            id: AlertId::new(id),
            alert_type: AlertType::ConfidenceIncrease,
            pattern_id: PatternId::from("p1"),
            message: "test".to_string(),
            significance: AlertSignificance::Medium,
            confidence: 0.8,
            previous_confidence: Some(0.6),
            sample_size: 10,
            recommended_action: "monitor".to_string(),
            created_at_ms: 0,
        }
    }

    #[test]
    fn forwards_alerts_to_receiver() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let forwarder = ChannelForwarder::new(tx);
        forwarder.on_alert_raised(&AlertRaisedEvent { alert: alert("a1") });
        let received = rx.try_recv().unwrap();
        assert_eq!(received.id.as_str(), "a1");
    }

    #[test]
    fn full_channel_drops_instead_of_blocking() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let forwarder = ChannelForwarder::new(tx);
        forwarder.on_alert_raised(&AlertRaisedEvent { alert: alert("a1") });
        forwarder.on_alert_raised(&AlertRaisedEvent { alert: alert("a2") });
        assert_eq!(rx.try_recv().unwrap().id.as_str(), "a1");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn disconnected_receiver_is_silent() {
        let (tx, rx) = crossbeam_channel::unbounded();
        drop(rx);
        let forwarder = ChannelForwarder::new(tx);
        forwarder.on_alert_raised(&AlertRaisedEvent { alert: alert("a1") });
    }
}
