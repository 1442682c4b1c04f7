//! Cooldown ledger — minimum interval between same-type alerts per pattern.

use pulse_core::types::alert::AlertType;
use pulse_core::types::collections::FxHashMap;

/// Bookkeeping for one `(pattern, alert type)` pair.
#[derive(Debug, Clone, Copy)]
pub struct CooldownEntry {
    pub last_triggered_ms: u64,
    pub trigger_count: u64,
}

/// Per-pattern cooldown table.
///
/// Entries are never auto-expired: the key universe is bounded by the
/// tracked patterns times four alert types, and clearing a pattern's
/// state is the explicit eviction path.
#[derive(Debug, Clone, Default)]
pub struct CooldownLedger {
    entries: FxHashMap<AlertType, CooldownEntry>,
}

impl CooldownLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds until `alert_type` may fire again; 0 means it may
    /// fire now. Out-of-order timestamps (now before the last trigger)
    /// stay suppressed for the full window.
    pub fn remaining_ms(&self, alert_type: AlertType, now_ms: u64, cooldown_ms: u64) -> u64 {
        match self.entries.get(&alert_type) {
            Some(entry) => {
                let elapsed = now_ms.saturating_sub(entry.last_triggered_ms);
                cooldown_ms.saturating_sub(elapsed)
            }
            None => 0,
        }
    }

    /// Record an emission at `now_ms`.
    pub fn record(&mut self, alert_type: AlertType, now_ms: u64) {
        let entry = self.entries.entry(alert_type).or_insert(CooldownEntry {
            last_triggered_ms: now_ms,
            trigger_count: 0,
        });
        entry.last_triggered_ms = now_ms;
        entry.trigger_count += 1;
    }

    pub fn trigger_count(&self, alert_type: AlertType) -> u64 {
        self.entries
            .get(&alert_type)
            .map(|e| e.trigger_count)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_type_may_fire_immediately() {
        let ledger = CooldownLedger::new();
        assert_eq!(
            ledger.remaining_ms(AlertType::ConfidenceIncrease, 1_000, 300_000),
            0
        );
    }

    #[test]
    fn recorded_type_is_held_for_the_window() {
        let mut ledger = CooldownLedger::new();
        ledger.record(AlertType::ConfidenceIncrease, 1_000);
        assert_eq!(
            ledger.remaining_ms(AlertType::ConfidenceIncrease, 2_000, 300_000),
            299_000
        );
        // A different type is unaffected.
        assert_eq!(
            ledger.remaining_ms(AlertType::ConfidenceDecrease, 2_000, 300_000),
            0
        );
    }

    #[test]
    fn window_elapses() {
        let mut ledger = CooldownLedger::new();
        ledger.record(AlertType::StatisticalSignificance, 1_000);
        assert_eq!(
            ledger.remaining_ms(AlertType::StatisticalSignificance, 301_000, 300_000),
            0
        );
    }

    #[test]
    fn trigger_count_accumulates() {
        let mut ledger = CooldownLedger::new();
        ledger.record(AlertType::NewPattern, 1_000);
        ledger.record(AlertType::NewPattern, 400_000);
        assert_eq!(ledger.trigger_count(AlertType::NewPattern), 2);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn out_of_order_timestamp_stays_suppressed() {
        let mut ledger = CooldownLedger::new();
        ledger.record(AlertType::ConfidenceIncrease, 10_000);
        assert_eq!(
            ledger.remaining_ms(AlertType::ConfidenceIncrease, 5_000, 300_000),
            300_000
        );
    }
}
