//! Invertible transforms applied by landmark experiments.
//!
//! Every transform is a forward/inverse pair: `forward` returns the
//! transformed sequence together with the state needed to undo it, and the
//! state's `inverse` reconstructs the input to floating-point tolerance.
//!
//! # Example
//!
//! ```
//! use ts_landmarks::transform::TransformKind;
//!
//! let series = vec![3.0, 5.0, 4.0, 8.0, 9.0];
//! let (diffs, state) = TransformKind::FirstDifference.forward(&series).unwrap();
//! assert_eq!(diffs, vec![2.0, -1.0, 4.0, 1.0]);
//!
//! let rebuilt = state.inverse(&diffs).unwrap();
//! assert_eq!(rebuilt, series);
//! ```

pub mod boxcox;
pub mod diff;
pub mod log;

pub use boxcox::{boxcox, boxcox_lambda, inv_boxcox, is_boxcox_suitable};
pub use diff::{difference, undifference};
pub use log::{inv_signed_log1p, signed_log1p};

use crate::error::{LandmarkError, Result};
use std::fmt;

/// Transform applied to the raw series before embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    /// `x[t] - x[t-1]`.
    FirstDifference,
    /// `x[t] - x[t-period]`.
    SeasonalDifference(usize),
    /// Signed `log1p`, safe for zero and negative values.
    Log,
    /// Box-Cox with lambda estimated from training data.
    BoxCox,
}

/// Everything needed to map transformed values back to the original scale.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformState {
    /// Differencing with the dropped leading observations.
    Difference { lag: usize, initial: Vec<f64> },
    Log,
    BoxCox { lambda: f64 },
}

impl TransformKind {
    /// Number of leading observations the transform removes.
    pub fn dropped_observations(&self) -> usize {
        match self {
            TransformKind::FirstDifference => 1,
            TransformKind::SeasonalDifference(period) => *period,
            TransformKind::Log | TransformKind::BoxCox => 0,
        }
    }

    /// Transform `series`, estimating any parameter from `series` itself.
    pub fn forward(&self, series: &[f64]) -> Result<(Vec<f64>, TransformState)> {
        self.forward_fitted(series, series)
    }

    /// Transform `series`, estimating any parameter from `training` only.
    ///
    /// `training` must be a prefix of the data the caller is allowed to look
    /// at; the Box-Cox lambda never sees anything else.
    pub fn forward_fitted(
        &self,
        series: &[f64],
        training: &[f64],
    ) -> Result<(Vec<f64>, TransformState)> {
        if series.is_empty() {
            return Err(LandmarkError::EmptyData);
        }
        match *self {
            TransformKind::FirstDifference => difference_forward(series, 1),
            TransformKind::SeasonalDifference(period) => {
                if period == 0 {
                    return Err(LandmarkError::InvalidParameter(
                        "seasonal period must be at least 1".to_string(),
                    ));
                }
                difference_forward(series, period)
            }
            TransformKind::Log => Ok((signed_log1p(series), TransformState::Log)),
            TransformKind::BoxCox => {
                if !is_boxcox_suitable(series) {
                    return Err(LandmarkError::TransformDomain(
                        "Box-Cox requires strictly positive values".to_string(),
                    ));
                }
                if !is_boxcox_suitable(training) {
                    return Err(LandmarkError::TransformDomain(
                        "Box-Cox training data must be strictly positive".to_string(),
                    ));
                }
                let lambda = boxcox_lambda(training);
                Ok((boxcox(series, lambda), TransformState::BoxCox { lambda }))
            }
        }
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformKind::FirstDifference => write!(f, "first_difference"),
            TransformKind::SeasonalDifference(p) => write!(f, "seasonal_difference({})", p),
            TransformKind::Log => write!(f, "log"),
            TransformKind::BoxCox => write!(f, "box_cox"),
        }
    }
}

fn difference_forward(series: &[f64], lag: usize) -> Result<(Vec<f64>, TransformState)> {
    if series.len() <= lag {
        return Err(LandmarkError::InsufficientHistory {
            needed: lag + 1,
            got: series.len(),
        });
    }
    Ok((
        difference(series, lag),
        TransformState::Difference {
            lag,
            initial: series[..lag].to_vec(),
        },
    ))
}

impl TransformState {
    /// Reconstruct the original sequence from its transformed version.
    pub fn inverse(&self, transformed: &[f64]) -> Result<Vec<f64>> {
        let rebuilt = match self {
            TransformState::Difference { lag, initial } => {
                let mut out = initial.clone();
                out.extend(undifference(transformed, initial, *lag));
                out
            }
            TransformState::Log => inv_signed_log1p(transformed),
            TransformState::BoxCox { lambda } => inv_boxcox(transformed, *lambda),
        };
        ensure_finite(rebuilt)
    }

    /// Map a multi-horizon prediction matrix back to the original scale.
    ///
    /// Row `i` forecasts offsets `1..=horizon` after `origins[i]`, an index
    /// into `observed` (the untransformed series). Differenced predictions are
    /// cumulated from the observations up to and including the origin, which
    /// are known at forecast time.
    pub fn inverse_rows(
        &self,
        predictions: &[Vec<f64>],
        origins: &[usize],
        observed: &[f64],
    ) -> Result<Vec<Vec<f64>>> {
        if predictions.len() != origins.len() {
            return Err(LandmarkError::DimensionMismatch {
                expected: origins.len(),
                got: predictions.len(),
            });
        }

        predictions
            .iter()
            .zip(origins)
            .map(|(row, &origin)| match self {
                TransformState::Difference { lag, .. } => {
                    if origin + 1 < *lag || origin >= observed.len() {
                        return Err(LandmarkError::InsufficientHistory {
                            needed: *lag,
                            got: origin + 1,
                        });
                    }
                    let seed = &observed[origin + 1 - lag..=origin];
                    ensure_finite(undifference(row, seed, *lag))
                }
                _ => self.inverse(row),
            })
            .collect()
    }
}

fn ensure_finite(values: Vec<f64>) -> Result<Vec<f64>> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(values)
    } else {
        Err(LandmarkError::Computation(
            "inverse transform produced non-finite values".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_roundtrip(kind: TransformKind, series: &[f64]) {
        let (transformed, state) = kind.forward(series).unwrap();
        let rebuilt = state.inverse(&transformed).unwrap();
        assert_eq!(rebuilt.len(), series.len());
        for (a, b) in series.iter().zip(rebuilt.iter()) {
            assert_relative_eq!(a, b, max_relative = 1e-9, epsilon = 1e-12);
        }
    }

    #[test]
    fn roundtrip_all_kinds() {
        let increasing: Vec<f64> = (1..=40).map(|i| i as f64 * 1.5).collect();
        let constant = vec![7.0; 40];
        let noisy: Vec<f64> = (0..40)
            .map(|i| 20.0 + (i as f64 * 1.3).sin() * 4.0 + ((i * 7) % 5) as f64)
            .collect();

        for kind in [
            TransformKind::FirstDifference,
            TransformKind::SeasonalDifference(7),
            TransformKind::Log,
            TransformKind::BoxCox,
        ] {
            assert_roundtrip(kind, &increasing);
            assert_roundtrip(kind, &constant);
            assert_roundtrip(kind, &noisy);
        }
    }

    #[test]
    fn dropped_observations() {
        assert_eq!(TransformKind::FirstDifference.dropped_observations(), 1);
        assert_eq!(TransformKind::SeasonalDifference(12).dropped_observations(), 12);
        assert_eq!(TransformKind::Log.dropped_observations(), 0);
    }

    #[test]
    fn boxcox_rejects_non_positive() {
        let result = TransformKind::BoxCox.forward(&[1.0, 0.0, 2.0]);
        assert!(matches!(result, Err(LandmarkError::TransformDomain(_))));
    }

    #[test]
    fn boxcox_lambda_from_training_only() {
        let train: Vec<f64> = (1..=20).map(|i| (i as f64 * 0.3).exp()).collect();
        let mut full = train.clone();
        full.extend((0..20).map(|i| 1000.0 + i as f64));

        let (_, state) = TransformKind::BoxCox.forward_fitted(&full, &train).unwrap();
        let TransformState::BoxCox { lambda } = state else {
            panic!("expected Box-Cox state");
        };
        assert_relative_eq!(lambda, boxcox_lambda(&train));
    }

    #[test]
    fn log_accepts_negative_values() {
        assert_roundtrip(TransformKind::Log, &[-5.0, 0.0, 3.0, -0.25]);
    }

    #[test]
    fn difference_too_short() {
        assert!(matches!(
            TransformKind::SeasonalDifference(4).forward(&[1.0, 2.0, 3.0]),
            Err(LandmarkError::InsufficientHistory { .. })
        ));
        assert!(TransformKind::SeasonalDifference(0).forward(&[1.0, 2.0]).is_err());
    }

    #[test]
    fn inverse_rows_first_difference() {
        let observed = vec![10.0, 11.0, 13.0, 16.0];
        let state = TransformState::Difference {
            lag: 1,
            initial: vec![10.0],
        };
        let preds = vec![vec![1.0, 1.0], vec![2.0, 2.0]];
        let rebuilt = state.inverse_rows(&preds, &[1, 3], &observed).unwrap();
        assert_eq!(rebuilt[0], vec![12.0, 13.0]);
        assert_eq!(rebuilt[1], vec![18.0, 20.0]);
    }

    #[test]
    fn inverse_rows_seasonal_difference() {
        let observed = vec![1.0, 2.0, 3.0, 4.0];
        let state = TransformState::Difference {
            lag: 2,
            initial: vec![1.0, 2.0],
        };
        let rebuilt = state
            .inverse_rows(&[vec![5.0, 5.0, 5.0]], &[3], &observed)
            .unwrap();
        // seed = [3, 4] -> 8, 9, 13
        assert_eq!(rebuilt[0], vec![8.0, 9.0, 13.0]);
    }

    #[test]
    fn inverse_rows_elementwise() {
        let (_, state) = TransformKind::Log.forward(&[1.0, 2.0]).unwrap();
        let preds = vec![signed_log1p(&[4.0, 5.0])];
        let rebuilt = state.inverse_rows(&preds, &[0], &[]).unwrap();
        assert_relative_eq!(rebuilt[0][0], 4.0, epsilon = 1e-12);
        assert_relative_eq!(rebuilt[0][1], 5.0, epsilon = 1e-12);
    }

    #[test]
    fn inverse_rows_shape_mismatch() {
        let state = TransformState::Log;
        assert!(state.inverse_rows(&[vec![1.0]], &[0, 1], &[]).is_err());
    }

    #[test]
    fn inverse_non_finite_is_computation_error() {
        let state = TransformState::BoxCox { lambda: 0.5 };
        assert!(matches!(
            state.inverse(&[-10.0]),
            Err(LandmarkError::Computation(_))
        ));
    }
}
