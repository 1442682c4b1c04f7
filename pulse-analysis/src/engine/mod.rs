//! The stateful alert engine.
//!
//! Owns per-pattern rolling history and cooldown bookkeeping, invokes
//! the analyzer in [`crate::stats`], and returns deduplicated,
//! cooldown-filtered alerts per incoming observation. All mutation goes
//! through [`AlertEngine::analyze_for_alerts`]; there are no ambient
//! singletons, so multiple engines (one per tenant) coexist safely.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use pulse_core::config::EngineConfig;
use pulse_core::errors::EngineError;
use pulse_core::events::types::{
    AlertRaisedEvent, AlertSuppressedEvent, HistoryClearedEvent, ObservationRecordedEvent,
    ObservationRejectedEvent,
};
use pulse_core::events::{EventDispatcher, PulseEventHandler};
use pulse_core::types::alert::{AlertId, AlertRecord};
use pulse_core::types::collections::FxHashMap;
use pulse_core::types::observation::{PatternId, PatternObservation};

use crate::stats::{significance, TrendDirection, MIN_TREND_POINTS};

pub mod cooldown;
pub mod history;
mod rules;

pub use cooldown::{CooldownEntry, CooldownLedger};
pub use history::{PatternHistory, HISTORY_CAP};

/// Cap on the engine-wide log of emitted alerts.
const ALERT_LOG_CAP: usize = 256;

/// One observation plus its optional predecessor, for batch analysis.
#[derive(Debug, Clone)]
pub struct ObservationUpdate {
    pub current: PatternObservation,
    pub previous: Option<PatternObservation>,
}

/// Trend summary re-derived from stored history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendSummary {
    pub direction: TrendDirection,
    /// Absolute slope of the fitted trend.
    pub magnitude: f64,
    /// `1 − p`, in [0, 1]; 0 when the history is too short to fit.
    pub confidence: f64,
    pub data_points: usize,
    pub time_span_ms: u64,
}

/// All mutable state for one tracked pattern, guarded by one mutex so
/// read-modify-write stays serialized per pattern while distinct
/// patterns proceed in parallel.
#[derive(Debug, Default)]
struct PatternState {
    history: PatternHistory,
    cooldowns: CooldownLedger,
}

/// The alert engine.
///
/// Time comes from the observation stream (`timestamp_ms`), never from a
/// wall clock: cooldown arithmetic and alert timestamps are fully
/// deterministic given the same input sequence, and the engine performs
/// no I/O of any kind.
pub struct AlertEngine {
    config: EngineConfig,
    patterns: RwLock<FxHashMap<PatternId, Arc<Mutex<PatternState>>>>,
    alert_log: Mutex<VecDeque<AlertRecord>>,
    dispatcher: EventDispatcher,
    alert_seq: AtomicU64,
}

impl AlertEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            patterns: RwLock::new(FxHashMap::default()),
            alert_log: Mutex::new(VecDeque::with_capacity(ALERT_LOG_CAP)),
            dispatcher: EventDispatcher::new(),
            alert_seq: AtomicU64::new(0),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(EngineConfig::default())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Register an event handler. Handlers are configured up front,
    /// before the engine is shared across threads.
    pub fn register_handler(&mut self, handler: Arc<dyn PulseEventHandler>) {
        self.dispatcher.register(handler);
    }

    /// Analyze one observation and return the surviving alerts.
    ///
    /// Step order: boundary validation, sample-size gate, history
    /// append, rule evaluation, cooldown filter, cooldown upsert for
    /// survivors. Candidates are filtered against the ledger as it stood
    /// before this call, so two same-type candidates from one
    /// observation both survive.
    pub fn analyze_for_alerts(
        &self,
        current: &PatternObservation,
        previous: Option<&PatternObservation>,
    ) -> Result<Vec<AlertRecord>, EngineError> {
        if let Err(source) = current.validate() {
            warn!(pattern = %current.pattern_id, error = %source, "rejected malformed observation");
            self.dispatcher
                .emit_observation_rejected(&ObservationRejectedEvent {
                    pattern_id: current.pattern_id.clone(),
                    reason: source.to_string(),
                });
            return Err(EngineError::InvalidObservation {
                pattern_id: current.pattern_id.clone(),
                source,
            });
        }

        // Sample-size gate: below the floor nothing is recorded or alerted.
        if current.sample_size < self.config.min_sample_size {
            trace!(
                pattern = %current.pattern_id,
                sample_size = current.sample_size,
                "below sample-size floor; skipping"
            );
            return Ok(Vec::new());
        }

        let state_arc = self.pattern_state(&current.pattern_id);
        let mut state = state_arc.lock().unwrap_or_else(PoisonError::into_inner);

        let first_observation = state.history.is_empty();
        state.history.push(current.clone());
        trace!(
            pattern = %current.pattern_id,
            history_len = state.history.len(),
            "recorded observation"
        );
        self.dispatcher
            .emit_observation_recorded(&ObservationRecordedEvent {
                pattern_id: current.pattern_id.clone(),
                confidence: current.confidence_score,
                sample_size: current.sample_size,
            });

        let candidates = rules::evaluate(
            &self.config,
            current,
            previous,
            &state.history,
            first_observation,
        );

        let now_ms = current.timestamp_ms;
        let mut survivors = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let remaining =
                state
                    .cooldowns
                    .remaining_ms(candidate.alert_type, now_ms, self.config.alert_cooldown_ms);
            if remaining > 0 {
                debug!(
                    pattern = %current.pattern_id,
                    alert_type = %candidate.alert_type,
                    remaining_ms = remaining,
                    "alert suppressed by cooldown"
                );
                self.dispatcher
                    .emit_alert_suppressed(&AlertSuppressedEvent {
                        pattern_id: current.pattern_id.clone(),
                        alert_type: candidate.alert_type,
                        remaining_ms: remaining,
                    });
                continue;
            }
            survivors.push(candidate);
        }

        let mut alerts = Vec::with_capacity(survivors.len());
        for candidate in survivors {
            let alert = self.build_alert(current, candidate, now_ms);
            state.cooldowns.record(alert.alert_type, now_ms);
            debug!(
                pattern = %current.pattern_id,
                alert_type = %alert.alert_type,
                significance = %alert.significance,
                "alert raised"
            );
            self.dispatcher
                .emit_alert_raised(&AlertRaisedEvent {
                    alert: alert.clone(),
                });
            alerts.push(alert);
        }
        drop(state);

        if !alerts.is_empty() {
            self.log_alerts(&alerts);
        }
        Ok(alerts)
    }

    /// Analyze a batch of updates across the rayon pool.
    ///
    /// Updates for different patterns are independent and run in
    /// parallel; updates for the same pattern serialize on that
    /// pattern's mutex. The relative order of two same-pattern updates
    /// within one batch is not guaranteed — callers needing strict
    /// ordering submit sequentially.
    pub fn analyze_batch(
        &self,
        updates: &[ObservationUpdate],
    ) -> Vec<Result<Vec<AlertRecord>, EngineError>> {
        updates
            .par_iter()
            .map(|update| self.analyze_for_alerts(&update.current, update.previous.as_ref()))
            .collect()
    }

    /// Emitted alerts, oldest first, optionally filtered to one pattern.
    ///
    /// Backed by a bounded ring (cap 256) so long-running processes
    /// cannot grow it without limit.
    pub fn alert_history(&self, pattern_id: Option<&PatternId>) -> Vec<AlertRecord> {
        let log = self.alert_log.lock().unwrap_or_else(PoisonError::into_inner);
        match pattern_id {
            Some(id) => log.iter().filter(|a| &a.pattern_id == id).cloned().collect(),
            None => log.iter().cloned().collect(),
        }
    }

    /// Re-derive a trend summary from stored history.
    ///
    /// `None` for an untracked pattern; histories too short to fit
    /// report a stable direction with zero confidence.
    pub fn pattern_trend(&self, pattern_id: &PatternId) -> Option<TrendSummary> {
        let state_arc = {
            let map = self.patterns.read().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(map.get(pattern_id)?)
        };
        let state = state_arc.lock().unwrap_or_else(PoisonError::into_inner);

        let confidences = state.history.confidences();
        let data_points = confidences.len();
        let time_span_ms = state.history.time_span_ms();

        if data_points < MIN_TREND_POINTS + 1 {
            return Some(TrendSummary {
                direction: TrendDirection::Stable,
                magnitude: 0.0,
                confidence: 0.0,
                data_points,
                time_span_ms,
            });
        }

        let (historical, newest) = confidences.split_at(data_points - 1);
        let analysis = significance::analyze(newest[0], historical);
        Some(TrendSummary {
            direction: analysis.direction,
            magnitude: analysis.effect_size,
            confidence: (1.0 - analysis.p_value).clamp(0.0, 1.0),
            data_points,
            time_span_ms,
        })
    }

    /// Drop state for one pattern, or reset the whole engine when `None`
    /// (histories, cooldowns, and the alert log).
    pub fn clear_history(&self, pattern_id: Option<&PatternId>) {
        match pattern_id {
            Some(id) => {
                self.patterns
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .remove(id);
            }
            None => {
                self.patterns
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .clear();
                self.alert_log
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .clear();
            }
        }
        debug!(pattern = ?pattern_id.map(PatternId::as_str), "cleared history");
        self.dispatcher.emit_history_cleared(&HistoryClearedEvent {
            pattern_id: pattern_id.cloned(),
        });
    }

    /// Number of patterns with recorded history.
    pub fn tracked_patterns(&self) -> usize {
        self.patterns
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Stored history length for a pattern; 0 if untracked.
    pub fn history_len(&self, pattern_id: &PatternId) -> usize {
        let map = self.patterns.read().unwrap_or_else(PoisonError::into_inner);
        match map.get(pattern_id) {
            Some(state) => state
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .history
                .len(),
            None => 0,
        }
    }

    fn pattern_state(&self, pattern_id: &PatternId) -> Arc<Mutex<PatternState>> {
        {
            let map = self.patterns.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(state) = map.get(pattern_id) {
                return Arc::clone(state);
            }
        }
        let mut map = self.patterns.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(map.entry(pattern_id.clone()).or_default())
    }

    fn build_alert(
        &self,
        current: &PatternObservation,
        candidate: rules::CandidateAlert,
        now_ms: u64,
    ) -> AlertRecord {
        let seq = self.alert_seq.fetch_add(1, Ordering::Relaxed);
        AlertRecord {
            id: AlertId::new(format!(
                "{}-{}-{}",
                current.pattern_id,
                candidate.alert_type.name(),
                seq
            )),
            alert_type: candidate.alert_type,
            pattern_id: current.pattern_id.clone(),
            message: candidate.message,
            significance: candidate.significance,
            confidence: current.confidence_score,
            previous_confidence: candidate.previous_confidence,
            sample_size: current.sample_size,
            recommended_action: candidate.recommended_action,
            created_at_ms: now_ms,
        }
    }

    fn log_alerts(&self, alerts: &[AlertRecord]) {
        let mut log = self.alert_log.lock().unwrap_or_else(PoisonError::into_inner);
        for alert in alerts {
            if log.len() == ALERT_LOG_CAP {
                log.pop_front();
            }
            log.push_back(alert.clone());
        }
    }
}
