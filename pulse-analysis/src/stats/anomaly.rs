//! Z-score anomaly detection for the newest observation.

use serde::{Deserialize, Serialize};

/// Minimum series length (baseline plus newest value) for detection.
pub const MIN_ANOMALY_POINTS: usize = 5;
/// Standard deviations beyond which the newest value is anomalous.
pub const DEFAULT_ANOMALY_THRESHOLD: f64 = 2.0;

/// Outcome of scoring the newest value against recent history.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnomalyReport {
    pub has_anomaly: bool,
    /// Absolute z-score of the newest value against the baseline.
    pub anomaly_score: f64,
    pub latest_value: f64,
    /// `[mean − k·σ, mean + k·σ]` of the baseline.
    pub expected_range: (f64, f64),
}

impl AnomalyReport {
    fn none(latest_value: f64, expected_range: (f64, f64)) -> Self {
        Self {
            has_anomaly: false,
            anomaly_score: 0.0,
            latest_value,
            expected_range,
        }
    }
}

/// Score the final entry of `series` against the distribution of the rest.
///
/// Mean and standard deviation come from all-but-the-last entries
/// (population σ: the baseline is the whole recent window, not a
/// sample). Fewer than [`MIN_ANOMALY_POINTS`] entries reports no anomaly
/// over the full-range window [0, 1]; a zero-variance baseline
/// short-circuits to no anomaly rather than dividing by zero.
pub fn detect(series: &[f64], threshold_std_devs: f64) -> AnomalyReport {
    let latest = series.last().copied().unwrap_or(0.0);
    if series.len() < MIN_ANOMALY_POINTS {
        return AnomalyReport::none(latest, (0.0, 1.0));
    }

    let baseline = &series[..series.len() - 1];
    let n = baseline.len() as f64;
    let mean = baseline.iter().sum::<f64>() / n;
    let variance = baseline.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let stddev = variance.sqrt();

    let expected_range = (
        mean - threshold_std_devs * stddev,
        mean + threshold_std_devs * stddev,
    );

    if stddev <= 0.0 || !stddev.is_finite() {
        // Constant baseline — no meaningful z-score.
        return AnomalyReport::none(latest, expected_range);
    }

    let z = ((latest - mean) / stddev).abs();
    AnomalyReport {
        has_anomaly: z > threshold_std_devs,
        anomaly_score: z,
        latest_value: latest,
        expected_range,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undersized_series_reports_nothing() {
        let report = detect(&[0.5, 0.6, 0.9], DEFAULT_ANOMALY_THRESHOLD);
        assert!(!report.has_anomaly);
        assert_eq!(report.expected_range, (0.0, 1.0));
        assert!((report.latest_value - 0.9).abs() < 1e-12);
    }

    #[test]
    fn constant_series_never_anomalous() {
        let report = detect(&[0.5, 0.5, 0.5, 0.5, 0.5, 0.99], DEFAULT_ANOMALY_THRESHOLD);
        assert!(!report.has_anomaly);
        assert_eq!(report.anomaly_score, 0.0);
    }

    #[test]
    fn spike_is_detected() {
        let report = detect(
            &[0.50, 0.55, 0.45, 0.52, 0.48, 0.51, 0.95],
            DEFAULT_ANOMALY_THRESHOLD,
        );
        assert!(report.has_anomaly);
        assert!(report.anomaly_score > 2.5);
        assert!(report.latest_value > report.expected_range.1);
    }

    #[test]
    fn drop_is_detected_below_range() {
        let report = detect(
            &[0.50, 0.55, 0.45, 0.52, 0.48, 0.51, 0.05],
            DEFAULT_ANOMALY_THRESHOLD,
        );
        assert!(report.has_anomaly);
        assert!(report.latest_value < report.expected_range.0);
    }

    #[test]
    fn value_inside_range_is_not_anomalous() {
        let report = detect(
            &[0.50, 0.55, 0.45, 0.52, 0.48, 0.51],
            DEFAULT_ANOMALY_THRESHOLD,
        );
        assert!(!report.has_anomaly);
    }

    #[test]
    fn expected_range_brackets_the_mean() {
        let report = detect(&[0.4, 0.5, 0.6, 0.5, 0.4, 0.6, 0.5], 2.0);
        let (low, high) = report.expected_range;
        assert!(low < 0.5 && 0.5 < high);
    }
}
