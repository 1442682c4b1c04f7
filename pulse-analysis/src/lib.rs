//! Statistical analysis and alerting over pattern observations.
//!
//! Two layers, evaluated bottom-up:
//! - [`stats`] — stateless trend regression, approximate slope
//!   significance, and z-score anomaly detection over short series.
//! - [`engine`] — the stateful [`engine::AlertEngine`]: per-pattern
//!   rolling history, rule evaluation, cooldown-filtered alert emission.

pub mod engine;
pub mod stats;

pub use engine::{AlertEngine, ObservationUpdate, TrendSummary};
pub use stats::{AnomalyReport, TrendAnalysis, TrendDirection, TrendLine};
