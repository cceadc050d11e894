//! Regime segmentation with distribution-shift testing.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::cost::CostFunction;
use super::pelt::{pelt_detect, PeltConfig};
use crate::core::TimeSeries;
use crate::error::{LandmarkError, Result};
use crate::utils::stats::{difference_noise_scale, mean, std_dev};
use crate::validation::ks_two_sample;

/// Penalty added per breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Penalty {
    /// Fixed penalty in cost units.
    Manual(f64),
    /// `3·σ̂²·ln n` for L2 cost (σ̂ is the robust noise scale of first
    /// differences), `3·ln n` for the scale-free Normal cost.
    #[default]
    Bic,
}

impl Penalty {
    /// Resolve the penalty for a concrete series.
    pub fn value(&self, series: &[f64], cost_fn: CostFunction) -> Result<f64> {
        match *self {
            Penalty::Manual(p) => {
                if p.is_finite() && p >= 0.0 {
                    Ok(p)
                } else {
                    Err(LandmarkError::InvalidParameter(format!(
                        "penalty must be finite and non-negative, got {}",
                        p
                    )))
                }
            }
            Penalty::Bic => {
                let log_n = (series.len().max(2) as f64).ln();
                match cost_fn {
                    CostFunction::Normal => Ok(3.0 * log_n),
                    CostFunction::L2 => {
                        let mut sigma = difference_noise_scale(series);
                        if sigma < 1e-12 && series.len() > 2 {
                            let diffs: Vec<f64> =
                                series.windows(2).map(|w| w[1] - w[0]).collect();
                            sigma = std_dev(&diffs) / std::f64::consts::SQRT_2;
                        }
                        if !sigma.is_finite() || sigma < 1e-12 {
                            sigma = 1e-6;
                        }
                        Ok(3.0 * sigma * sigma * log_n)
                    }
                }
            }
        }
    }
}

/// Configuration for [`detect`].
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    pub penalty: Penalty,
    pub cost_fn: CostFunction,
    pub min_segment_length: usize,
    /// Significance level of the two-sample test.
    pub alpha: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            penalty: Penalty::Bic,
            cost_fn: CostFunction::L2,
            min_segment_length: 5,
            alpha: 0.05,
        }
    }
}

impl DetectorConfig {
    pub fn penalty(mut self, penalty: Penalty) -> Self {
        self.penalty = penalty;
        self
    }

    pub fn cost_function(mut self, cost_fn: CostFunction) -> Self {
        self.cost_fn = cost_fn;
        self
    }

    pub fn min_segment_length(mut self, min_len: usize) -> Self {
        self.min_segment_length = min_len.max(1);
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }
}

/// Boundary between two regimes.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangePoint {
    /// First index of the new regime.
    pub location_index: usize,
    pub timestamp: DateTime<Utc>,
    pub level_increased: bool,
    pub mean_before: f64,
    pub mean_after: f64,
    pub p_value: f64,
    pub distribution_shift_significant: bool,
}

/// Two-sample comparison of the data before and after a breakpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftSignificance {
    pub mean_before: f64,
    pub mean_after: f64,
    pub level_increased: bool,
    pub p_value: f64,
    pub significant: bool,
}

/// Breakpoint indices of `values`, final index excluded.
pub fn breakpoints(values: &[f64], config: &DetectorConfig) -> Result<Vec<usize>> {
    if values.is_empty() {
        return Err(LandmarkError::EmptyData);
    }
    let pelt = PeltConfig::default()
        .cost_function(config.cost_fn)
        .penalty(config.penalty.value(values, config.cost_fn)?)
        .min_segment_length(config.min_segment_length);
    let result = pelt_detect(values, &pelt);
    Ok(discard_terminal(result.changepoints, values.len()))
}

/// Drop breakpoints at or beyond the final index of a series of length `n`.
pub fn discard_terminal(mut breakpoints: Vec<usize>, n: usize) -> Vec<usize> {
    breakpoints.retain(|&cp| cp + 1 < n);
    breakpoints
}

/// Split `values` at `cp` and test whether the two sides share a distribution.
pub fn significance(values: &[f64], cp: usize, alpha: f64) -> Result<ShiftSignificance> {
    if cp == 0 || cp >= values.len() {
        return Err(LandmarkError::InvalidParameter(format!(
            "breakpoint {} outside 1..{}",
            cp,
            values.len()
        )));
    }
    let (before, after) = values.split_at(cp);
    let test = ks_two_sample(before, after)?;
    let mean_before = mean(before);
    let mean_after = mean(after);

    Ok(ShiftSignificance {
        mean_before,
        mean_after,
        level_increased: mean_after > mean_before,
        p_value: test.p_value,
        significant: test.rejects(alpha),
    })
}

/// Detect regime changes in `series`.
///
/// An empty result means no structural change was found.
///
/// # Example
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use ts_landmarks::changepoint::{detect, DetectorConfig};
/// use ts_landmarks::core::TimeSeries;
///
/// let values: Vec<f64> = (0..80).map(|i| if i < 40 { 1.0 } else { 6.0 }).collect();
/// let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let series = TimeSeries::regular(start, Duration::days(1), values).unwrap();
///
/// let changes = detect(&series, &DetectorConfig::default()).unwrap();
/// assert_eq!(changes.len(), 1);
/// assert_eq!(changes[0].location_index, 40);
/// assert!(changes[0].level_increased);
/// ```
#[tracing::instrument(skip_all, fields(n = series.len()))]
pub fn detect(series: &TimeSeries, config: &DetectorConfig) -> Result<Vec<ChangePoint>> {
    let values = series.values();
    let found = breakpoints(values, config)?;
    debug!(count = found.len(), "breakpoints found");

    found
        .into_iter()
        .map(|cp| {
            let shift = significance(values, cp, config.alpha)?;
            Ok(ChangePoint {
                location_index: cp,
                timestamp: series.timestamp(cp)?,
                level_increased: shift.level_increased,
                mean_before: shift.mean_before,
                mean_after: shift.mean_after,
                p_value: shift.p_value,
                distribution_shift_significant: shift.significant,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, TimeZone};

    fn series(values: Vec<f64>) -> TimeSeries {
        let start = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        TimeSeries::regular(start, Duration::days(1), values).unwrap()
    }

    fn wiggle(i: usize) -> f64 {
        ((i * 37) % 11) as f64 * 0.02 - 0.1
    }

    #[test]
    fn discard_terminal_removes_final_index() {
        assert_eq!(discard_terminal(vec![10, 19], 20), vec![10]);
        assert_eq!(discard_terminal(vec![10, 20, 25], 20), vec![10]);
        assert!(discard_terminal(vec![], 20).is_empty());
    }

    #[test]
    fn trailing_outlier_is_not_reported() {
        let mut values = vec![0.0; 40];
        values[39] = 100.0;
        let config = DetectorConfig::default()
            .penalty(Penalty::Manual(0.5))
            .min_segment_length(1);
        assert!(breakpoints(&values, &config).unwrap().is_empty());
    }

    #[test]
    fn detects_level_shift_with_timestamp() {
        let values: Vec<f64> = (0..120)
            .map(|i| if i < 60 { 0.0 } else { 10.0 } + wiggle(i))
            .collect();
        let s = series(values);
        let changes = detect(&s, &DetectorConfig::default()).unwrap();

        assert_eq!(changes.len(), 1);
        let cp = &changes[0];
        assert_eq!(cp.location_index, 60);
        assert_eq!(cp.timestamp, s.timestamp(60).unwrap());
        assert!(cp.level_increased);
        assert!(cp.distribution_shift_significant);
        assert!(cp.mean_after > cp.mean_before);
    }

    #[test]
    fn detects_decrease() {
        let values: Vec<f64> = (0..80)
            .map(|i| if i < 30 { 5.0 } else { -5.0 } + wiggle(i))
            .collect();
        let changes = detect(&series(values), &DetectorConfig::default()).unwrap();
        assert_eq!(changes.len(), 1);
        assert!(!changes[0].level_increased);
    }

    #[test]
    fn constant_series_has_no_change() {
        let changes = detect(&series(vec![3.0; 50]), &DetectorConfig::default()).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn significance_reports_direction_and_means() {
        let values: Vec<f64> = (0..40).map(|i| if i < 20 { 1.0 } else { 3.0 }).collect();
        let shift = significance(&values, 20, 0.05).unwrap();
        assert_relative_eq!(shift.mean_before, 1.0);
        assert_relative_eq!(shift.mean_after, 3.0);
        assert!(shift.level_increased);
        assert!(shift.significant);
        assert!(significance(&values, 0, 0.05).is_err());
        assert!(significance(&values, 40, 0.05).is_err());
    }

    #[test]
    fn bic_penalty_scales_with_noise() {
        let quiet: Vec<f64> = (0..100).map(|i| wiggle(i) * 0.1).collect();
        let loud: Vec<f64> = (0..100).map(|i| wiggle(i) * 10.0).collect();
        let p_quiet = Penalty::Bic.value(&quiet, CostFunction::L2).unwrap();
        let p_loud = Penalty::Bic.value(&loud, CostFunction::L2).unwrap();
        assert!(p_loud > p_quiet);
        assert_relative_eq!(p_loud / p_quiet, 10_000.0, max_relative = 1e-6);

        let normal = Penalty::Bic.value(&loud, CostFunction::Normal).unwrap();
        assert_relative_eq!(normal, 3.0 * 100.0_f64.ln(), epsilon = 1e-10);
    }

    #[test]
    fn manual_penalty_validation() {
        assert!(Penalty::Manual(-1.0).value(&[1.0], CostFunction::L2).is_err());
        assert!(Penalty::Manual(f64::NAN).value(&[1.0], CostFunction::L2).is_err());
        assert_relative_eq!(Penalty::Manual(4.0).value(&[1.0], CostFunction::L2).unwrap(), 4.0);
    }

    #[test]
    fn empty_series_is_error() {
        assert!(matches!(
            breakpoints(&[], &DetectorConfig::default()),
            Err(LandmarkError::EmptyData)
        ));
    }
}
