//! Autocorrelation significance analysis.
//!
//! Computes the ACF and PACF with confidence bounds, flags significant lags
//! and proposes candidate seasonal periods.

use crate::error::{LandmarkError, Result};
use crate::utils::stats::{mean, normal_critical_value};

/// Correlation estimate at one lag with its confidence bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LagCorrelation {
    pub lag: usize,
    pub value: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Result of [`analyze`].
#[derive(Debug, Clone)]
pub struct AcfResult {
    /// Autocorrelation for lags `1..=n_lags` (Bartlett bounds).
    pub acf: Vec<LagCorrelation>,
    /// Partial autocorrelation for lags `1..=n_lags` (bounds `±z/√n`).
    pub pacf: Vec<LagCorrelation>,
    /// Significance threshold `z/√n` applied to `|value|`.
    pub threshold: f64,
    /// ACF lags whose magnitude exceeds the threshold.
    pub significant_lags: Vec<usize>,
    /// PACF lags whose magnitude exceeds the threshold.
    pub significant_partial_lags: Vec<usize>,
    /// Minimal set of proposed seasonal periods, ascending.
    pub candidate_periods: Vec<usize>,
}

impl AcfResult {
    /// ACF estimate at a lag, if computed.
    pub fn acf_at(&self, lag: usize) -> Option<&LagCorrelation> {
        self.acf.iter().find(|c| c.lag == lag)
    }

    /// Whether `lag` is among the significant ACF lags.
    pub fn is_significant(&self, lag: usize) -> bool {
        self.significant_lags.contains(&lag)
    }
}

/// Analyze autocorrelation structure for lags `1..=n_lags`.
///
/// Lag 0 is never reported. Candidate periods are taken from ACF peaks
/// (lag >= 2, local maximum) whose lower confidence bound is non-negative,
/// then reduced with [`non_redundant_periods`].
///
/// # Example
/// ```
/// use ts_landmarks::detection::analyze;
///
/// let series: Vec<f64> = (0..120)
///     .map(|i| (2.0 * std::f64::consts::PI * i as f64 / 12.0).sin())
///     .collect();
/// let result = analyze(&series, 30, 0.05).unwrap();
///
/// assert!(result.is_significant(12));
/// assert_eq!(result.candidate_periods, vec![12]);
/// ```
pub fn analyze(series: &[f64], n_lags: usize, alpha: f64) -> Result<AcfResult> {
    let n = series.len();
    if n_lags == 0 {
        return Err(LandmarkError::InvalidParameter(
            "n_lags must be at least 1".to_string(),
        ));
    }
    if n <= n_lags + 1 {
        return Err(LandmarkError::InsufficientHistory {
            needed: n_lags + 2,
            got: n,
        });
    }

    let z = normal_critical_value(alpha)?;
    let sqrt_n = (n as f64).sqrt();
    let threshold = z / sqrt_n;

    let acf_values = autocorrelations(series, n_lags);
    let pacf_values = partial_autocorrelations(&acf_values);

    // Bartlett: var(r_k) = (1 + 2 * sum_{j<k} r_j^2) / n
    let mut cumulative = 0.0;
    let mut acf = Vec::with_capacity(n_lags);
    for lag in 1..=n_lags {
        let value = acf_values[lag];
        let se = ((1.0 + 2.0 * cumulative) / n as f64).sqrt();
        acf.push(LagCorrelation {
            lag,
            value,
            lower: value - z * se,
            upper: value + z * se,
        });
        cumulative += value * value;
    }

    let pacf: Vec<LagCorrelation> = (1..=n_lags)
        .map(|lag| {
            let value = pacf_values[lag];
            LagCorrelation {
                lag,
                value,
                lower: value - threshold,
                upper: value + threshold,
            }
        })
        .collect();

    let significant = |c: &&LagCorrelation| c.value.is_finite() && c.value.abs() > threshold;
    let significant_lags = acf.iter().filter(significant).map(|c| c.lag).collect();
    let significant_partial_lags = pacf.iter().filter(significant).map(|c| c.lag).collect();

    let peaks: Vec<usize> = acf
        .iter()
        .filter(|c| c.lag >= 2 && c.lower >= 0.0)
        .filter(|c| {
            let prev = acf_values[c.lag - 1];
            let next = acf_values.get(c.lag + 1).copied().unwrap_or(f64::NEG_INFINITY);
            c.value >= prev && c.value >= next
        })
        .map(|c| c.lag)
        .collect();

    Ok(AcfResult {
        acf,
        pacf,
        threshold,
        significant_lags,
        significant_partial_lags,
        candidate_periods: non_redundant_periods(&peaks),
    })
}

/// Reduce a set of lags to a minimal, non-redundant set of periods.
///
/// Repeatedly keeps the smallest remaining lag and discards every other lag
/// that is an integer multiple of it.
///
/// # Example
/// ```
/// use ts_landmarks::detection::non_redundant_periods;
///
/// assert_eq!(non_redundant_periods(&[12, 24, 36, 7]), vec![7, 12]);
/// ```
pub fn non_redundant_periods(lags: &[usize]) -> Vec<usize> {
    let mut remaining: Vec<usize> = lags.iter().copied().filter(|&l| l > 0).collect();
    remaining.sort_unstable();
    remaining.dedup();

    let mut kept = Vec::new();
    while let Some(&smallest) = remaining.first() {
        kept.push(smallest);
        remaining.retain(|&l| l % smallest != 0);
    }
    kept
}

/// Sample autocorrelation for lags `0..=max_lag`.
///
/// A constant series has zero autocorrelation at every positive lag.
pub fn autocorrelations(series: &[f64], max_lag: usize) -> Vec<f64> {
    let n = series.len();
    if n == 0 {
        return vec![f64::NAN; max_lag + 1];
    }
    let m = mean(series);
    let denominator: f64 = series.iter().map(|x| (x - m).powi(2)).sum();

    (0..=max_lag)
        .map(|lag| {
            if lag == 0 {
                return 1.0;
            }
            if lag >= n {
                return f64::NAN;
            }
            if denominator < 1e-10 {
                return 0.0;
            }
            let numerator: f64 = (lag..n)
                .map(|i| (series[i] - m) * (series[i - lag] - m))
                .sum();
            numerator / denominator
        })
        .collect()
}

/// Partial autocorrelations from an ACF vector (Durbin-Levinson).
///
/// `acf[0]` must be 1. Lags past a numerically singular step are NaN.
pub fn partial_autocorrelations(acf: &[f64]) -> Vec<f64> {
    let max_lag = acf.len().saturating_sub(1);
    let mut pacf = vec![f64::NAN; max_lag + 1];
    if acf.is_empty() {
        return pacf;
    }
    pacf[0] = 1.0;
    if max_lag == 0 {
        return pacf;
    }

    let mut phi_prev = vec![0.0; max_lag + 1];
    let mut phi = vec![0.0; max_lag + 1];
    phi_prev[1] = acf[1];
    pacf[1] = acf[1];

    for k in 2..=max_lag {
        let mut num = acf[k];
        let mut denom = 1.0;
        for j in 1..k {
            num -= phi_prev[j] * acf[k - j];
            denom -= phi_prev[j] * acf[j];
        }
        if denom.abs() < 1e-10 || !num.is_finite() {
            break;
        }

        phi[k] = num / denom;
        for j in 1..k {
            phi[j] = phi_prev[j] - phi[k] * phi_prev[k - j];
        }
        pacf[k] = phi[k];
        phi_prev[..=k].copy_from_slice(&phi[..=k]);
    }

    pacf
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn sine(n: usize, period: usize) -> Vec<f64> {
        (0..n)
            .map(|i| (2.0 * PI * i as f64 / period as f64).sin())
            .collect()
    }

    #[test]
    fn non_redundant_periods_drops_multiples() {
        assert_eq!(non_redundant_periods(&[12, 24, 36, 7]), vec![7, 12]);
        assert_eq!(non_redundant_periods(&[4, 6, 8, 12]), vec![4, 6]);
        assert_eq!(non_redundant_periods(&[5, 5, 10]), vec![5]);
        assert!(non_redundant_periods(&[]).is_empty());
        assert!(non_redundant_periods(&[0]).is_empty());
    }

    #[test]
    fn autocorrelation_lag_0_is_1() {
        let acf = autocorrelations(&[1.0, 2.0, 3.0, 4.0, 5.0], 2);
        assert_relative_eq!(acf[0], 1.0, epsilon = 1e-10);
    }

    #[test]
    fn autocorrelation_linear_trend() {
        let series: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let acf = autocorrelations(&series, 1);
        assert!(acf[1] > 0.8, "Expected high ACF(1) for linear trend, got {}", acf[1]);
    }

    #[test]
    fn autocorrelation_alternating() {
        let series: Vec<f64> = (0..20).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let acf = autocorrelations(&series, 1);
        assert!(acf[1] < -0.5);
    }

    #[test]
    fn autocorrelation_constant() {
        let acf = autocorrelations(&[5.0; 10], 3);
        assert_relative_eq!(acf[1], 0.0, epsilon = 1e-10);
    }

    #[test]
    fn pacf_ar1_cuts_off() {
        let mut series = vec![0.0; 100];
        series[0] = 1.0;
        for i in 1..100 {
            series[i] = 0.8 * series[i - 1];
        }
        let pacf = partial_autocorrelations(&autocorrelations(&series, 3));
        assert!(pacf[1] > 0.5, "Expected high PACF(1), got {}", pacf[1]);
        assert!(pacf[2].abs() < pacf[1].abs());
    }

    #[test]
    fn analyze_seasonal_sine() {
        let result = analyze(&sine(144, 12), 40, 0.05).unwrap();
        assert!(result.is_significant(12));
        assert!(result.is_significant(24));
        assert_eq!(result.candidate_periods, vec![12]);
        assert_eq!(result.acf.len(), 40);
        assert_eq!(result.acf[0].lag, 1);

        let at_period = result.acf_at(12).unwrap();
        assert_eq!(at_period.lag, 12);
        assert!(at_period.lower >= 0.0);
        assert!(at_period.value > 0.9);
        assert!(result.acf_at(0).is_none());
        assert!(result.acf_at(41).is_none());
    }

    #[test]
    fn analyze_excludes_lag_zero() {
        let result = analyze(&sine(60, 6), 10, 0.05).unwrap();
        assert!(result.acf.iter().all(|c| c.lag >= 1));
        assert!(!result.significant_lags.contains(&0));
    }

    #[test]
    fn analyze_threshold_is_two_over_root_n() {
        let result = analyze(&sine(100, 10), 5, 0.05).unwrap();
        assert_relative_eq!(result.threshold, 1.959964 / 10.0, epsilon = 1e-5);
    }

    #[test]
    fn analyze_bounds_widen_with_lag() {
        let result = analyze(&sine(120, 12), 20, 0.05).unwrap();
        let width = |c: &LagCorrelation| c.upper - c.lower;
        assert!(width(&result.acf[5]) > width(&result.acf[0]));
        let first = &result.acf[0];
        assert_relative_eq!(
            width(first),
            2.0 * 1.959964 / (120.0_f64).sqrt(),
            epsilon = 1e-5
        );
    }

    #[test]
    fn analyze_constant_series_has_no_significance() {
        let result = analyze(&[3.0; 50], 10, 0.05).unwrap();
        assert!(result.significant_lags.is_empty());
        assert!(result.candidate_periods.is_empty());
    }

    #[test]
    fn analyze_trend_proposes_no_period() {
        let series: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let result = analyze(&series, 20, 0.05).unwrap();
        assert!(result.is_significant(1));
        assert!(result.candidate_periods.is_empty());
    }

    #[test]
    fn analyze_short_series() {
        assert!(matches!(
            analyze(&[1.0, 2.0, 3.0], 5, 0.05),
            Err(LandmarkError::InsufficientHistory { .. })
        ));
        assert!(analyze(&[1.0, 2.0, 3.0], 0, 0.05).is_err());
        assert!(analyze(&sine(50, 5), 5, 1.5).is_err());
    }
}
