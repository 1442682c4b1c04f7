//! Trend & significance analyzer — pure functions over short series.
//!
//! Every routine here is stateless: callers pass the full series on each
//! call. The p-value math uses deliberately cheap closed-form
//! approximations (Φ via an erf polynomial, Student-t via a
//! moment-matching shrink toward the normal). These are known
//! limitations, kept on purpose: an exact statistical library would
//! shift the alert thresholds downstream consumers were tuned against.

pub mod anomaly;
pub mod regression;
pub mod significance;

pub use anomaly::{AnomalyReport, DEFAULT_ANOMALY_THRESHOLD, MIN_ANOMALY_POINTS};
pub use regression::TrendLine;
pub use significance::{
    SlopeSignificance, TrendAnalysis, TrendDirection, MIN_TREND_POINTS, SLOPE_FLOOR, TREND_ALPHA,
};
