//! Shared numeric helpers for the pattern-analysis panels.

use serde::{Deserialize, Serialize};

/// Slope magnitude below which a series counts as flat.
const SLOPE_THRESHOLD: f64 = 0.1;

/// Direction of a value series over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

/// Arithmetic mean; 0 for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation; 0 for an empty slice.
#[must_use]
pub fn stddev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Ordinary least-squares slope of value-vs-index; 0 when fewer than two
/// points.
#[must_use]
pub fn ols_slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }

    let n_f = n as f64;
    let mean_x = (n_f - 1.0) / 2.0;
    let mean_y = mean(values);

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, value) in values.iter().enumerate() {
        let dx = i as f64 - mean_x;
        numerator += dx * (value - mean_y);
        denominator += dx * dx;
    }

    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Classify a series by its OLS slope: above +0.1 increasing, below −0.1
/// decreasing, otherwise stable.
#[must_use]
pub fn linear_trend(values: &[f64]) -> TrendDirection {
    let slope = ols_slope(values);
    if slope > SLOPE_THRESHOLD {
        TrendDirection::Increasing
    } else if slope < -SLOPE_THRESHOLD {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    }
}

/// Consistency score in `[0, 100]`: `100 − (stddev/mean)·100`, clamped;
/// 0 when the mean is 0.
#[must_use]
pub fn consistency_score(values: &[f64]) -> f64 {
    let m = mean(values);
    if m == 0.0 {
        return 0.0;
    }
    (100.0 - (stddev(values) / m) * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_stddev() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[2.0, 4.0, 6.0]), 4.0);

        assert_eq!(stddev(&[]), 0.0);
        assert_eq!(stddev(&[5.0, 5.0, 5.0]), 0.0);
        assert!((stddev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_ols_slope() {
        assert_eq!(ols_slope(&[]), 0.0);
        assert_eq!(ols_slope(&[3.0]), 0.0);
        assert!((ols_slope(&[1.0, 2.0, 3.0, 4.0]) - 1.0).abs() < 1e-9);
        assert!((ols_slope(&[4.0, 3.0, 2.0, 1.0]) + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_linear_trend_thresholds() {
        assert_eq!(linear_trend(&[1.0, 2.0, 3.0]), TrendDirection::Increasing);
        assert_eq!(linear_trend(&[3.0, 2.0, 1.0]), TrendDirection::Decreasing);
        assert_eq!(linear_trend(&[2.0, 2.0, 2.0]), TrendDirection::Stable);
        // Slope of exactly 0.1 is not strictly above the threshold
        assert_eq!(linear_trend(&[1.0, 1.1]), TrendDirection::Stable);
    }

    #[test]
    fn test_consistency_score() {
        assert_eq!(consistency_score(&[]), 0.0);
        assert_eq!(consistency_score(&[0.0, 0.0]), 0.0);
        assert_eq!(consistency_score(&[4.0, 4.0, 4.0]), 100.0);

        let score = consistency_score(&[1.0, 9.0]);
        assert!((0.0..=100.0).contains(&score));
        assert!(score < 100.0);
    }
}
