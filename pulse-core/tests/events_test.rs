//! Tests for the Pulse event system.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pulse_core::events::dispatcher::EventDispatcher;
use pulse_core::events::handler::PulseEventHandler;
use pulse_core::events::types::*;
use pulse_core::types::alert::{AlertId, AlertRecord, AlertSignificance, AlertType};
use pulse_core::types::observation::PatternId;

/// A test handler that counts events.
struct CountingHandler {
    recorded: AtomicUsize,
    raised: AtomicUsize,
    suppressed: AtomicUsize,
    cleared: AtomicUsize,
}

impl CountingHandler {
    fn new() -> Self {
        Self {
            recorded: AtomicUsize::new(0),
            raised: AtomicUsize::new(0),
            suppressed: AtomicUsize::new(0),
            cleared: AtomicUsize::new(0),
        }
    }
}

impl PulseEventHandler for CountingHandler {
    fn on_observation_recorded(&self, _event: &ObservationRecordedEvent) {
        self.recorded.fetch_add(1, Ordering::Relaxed);
    }

    fn on_alert_raised(&self, _event: &AlertRaisedEvent) {
        self.raised.fetch_add(1, Ordering::Relaxed);
    }

    fn on_alert_suppressed(&self, _event: &AlertSuppressedEvent) {
        self.suppressed.fetch_add(1, Ordering::Relaxed);
    }

    fn on_history_cleared(&self, _event: &HistoryClearedEvent) {
        self.cleared.fetch_add(1, Ordering::Relaxed);
    }
}

fn sample_alert() -> AlertRecord {
    AlertRecord {
        id: AlertId::new("a1"),
        alert_type: AlertType::ConfidenceIncrease,
        pattern_id: PatternId::from("p1"),
        message: "confidence rose".to_string(),
        significance: AlertSignificance::High,
        confidence: 0.85,
        previous_confidence: Some(0.6),
        sample_size: 25,
        recommended_action: "apply".to_string(),
        created_at_ms: 1_000,
    }
}

#[test]
fn test_handler_noop_defaults() {
    struct NoopHandler;
    impl PulseEventHandler for NoopHandler {}

    let handler = NoopHandler;
    // All methods should be callable without implementing them
    handler.on_observation_recorded(&ObservationRecordedEvent {
        pattern_id: PatternId::from("p1"),
        confidence: 0.8,
        sample_size: 10,
    });
    handler.on_alert_raised(&AlertRaisedEvent {
        alert: sample_alert(),
    });
    handler.on_history_cleared(&HistoryClearedEvent { pattern_id: None });
}

#[test]
fn test_dispatcher_zero_handlers() {
    let dispatcher = EventDispatcher::new();
    assert_eq!(dispatcher.handler_count(), 0);

    // Should not panic with zero handlers
    dispatcher.emit_alert_raised(&AlertRaisedEvent {
        alert: sample_alert(),
    });
    dispatcher.emit_history_cleared(&HistoryClearedEvent { pattern_id: None });
}

#[test]
fn test_dispatcher_multiple_handlers() {
    let mut dispatcher = EventDispatcher::new();

    let handler1 = Arc::new(CountingHandler::new());
    let handler2 = Arc::new(CountingHandler::new());

    dispatcher.register(handler1.clone());
    dispatcher.register(handler2.clone());

    assert_eq!(dispatcher.handler_count(), 2);

    dispatcher.emit_alert_raised(&AlertRaisedEvent {
        alert: sample_alert(),
    });

    assert_eq!(handler1.raised.load(Ordering::Relaxed), 1);
    assert_eq!(handler2.raised.load(Ordering::Relaxed), 1);
}

#[test]
fn test_panicking_handler_does_not_crash() {
    struct PanickingHandler;
    impl PulseEventHandler for PanickingHandler {
        fn on_alert_raised(&self, _event: &AlertRaisedEvent) {
            panic!("intentional panic in handler");
        }
    }

    let mut dispatcher = EventDispatcher::new();
    let panicking = Arc::new(PanickingHandler);
    let counting = Arc::new(CountingHandler::new());

    // Register panicking handler first, then counting handler
    dispatcher.register(panicking);
    dispatcher.register(counting.clone());

    dispatcher.emit_alert_raised(&AlertRaisedEvent {
        alert: sample_alert(),
    });

    // The counting handler should still receive the event
    assert_eq!(counting.raised.load(Ordering::Relaxed), 1);
}

#[test]
fn test_event_payload_integrity() {
    struct CapturingHandler {
        captured_remaining: AtomicUsize,
    }

    impl PulseEventHandler for CapturingHandler {
        fn on_alert_suppressed(&self, event: &AlertSuppressedEvent) {
            self.captured_remaining
                .store(event.remaining_ms as usize, Ordering::Relaxed);
        }
    }

    let mut dispatcher = EventDispatcher::new();
    let handler = Arc::new(CapturingHandler {
        captured_remaining: AtomicUsize::new(0),
    });
    dispatcher.register(handler.clone());

    dispatcher.emit_alert_suppressed(&AlertSuppressedEvent {
        pattern_id: PatternId::from("p1"),
        alert_type: AlertType::StatisticalSignificance,
        remaining_ms: 42_000,
    });

    assert_eq!(handler.captured_remaining.load(Ordering::Relaxed), 42_000);
}

#[test]
fn test_dispatcher_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<EventDispatcher>();
}
