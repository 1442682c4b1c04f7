//! EventDispatcher — synchronous event dispatch with zero overhead when empty.

use std::sync::Arc;

use super::handler::PulseEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
///
/// When no handlers are registered, `emit` iterates over an empty Vec —
/// effectively zero cost.
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn PulseEventHandler>>,
}

impl EventDispatcher {
    /// Create a new empty dispatcher.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn PulseEventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// Handlers that panic are caught and do not prevent subsequent
    /// handlers from receiving the event.
    fn emit<F: Fn(&dyn PulseEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::warn!("event handler panicked; continuing with remaining handlers");
            }
        }
    }

    pub fn emit_observation_recorded(&self, event: &ObservationRecordedEvent) {
        self.emit(|h| h.on_observation_recorded(event));
    }

    pub fn emit_observation_rejected(&self, event: &ObservationRejectedEvent) {
        self.emit(|h| h.on_observation_rejected(event));
    }

    pub fn emit_alert_raised(&self, event: &AlertRaisedEvent) {
        self.emit(|h| h.on_alert_raised(event));
    }

    pub fn emit_alert_suppressed(&self, event: &AlertSuppressedEvent) {
        self.emit(|h| h.on_alert_suppressed(event));
    }

    pub fn emit_history_cleared(&self, event: &HistoryClearedEvent) {
        self.emit(|h| h.on_history_cleared(event));
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
