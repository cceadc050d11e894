//! K-nearest-neighbor regressor.
//!
//! Predicts the average target row of the `k` training rows closest to the
//! query in (optionally standardized) feature space. Ties in distance go to
//! the earlier training row, so results do not depend on sort stability.

use std::cmp::Ordering;

use super::traits::{check_training, matrix_width, Learner};
use crate::error::{LandmarkError, Result};
use crate::utils::stats::{mean, std_dev};

/// Nearest-neighbor multi-output regressor.
#[derive(Debug, Clone)]
pub struct KnnRegressor {
    k: usize,
    standardize: bool,
    fitted: Option<KnnFit>,
}

#[derive(Debug, Clone)]
struct KnnFit {
    center: Vec<f64>,
    scale: Vec<f64>,
    features: Vec<Vec<f64>>,
    targets: Vec<Vec<f64>>,
}

impl Default for KnnRegressor {
    fn default() -> Self {
        Self::new(5)
    }
}

impl KnnRegressor {
    /// Create a regressor averaging `k` neighbors (at least 1).
    pub fn new(k: usize) -> Self {
        Self {
            k: k.max(1),
            standardize: true,
            fitted: None,
        }
    }

    /// Standardize features with training mean and standard deviation.
    pub fn with_standardize(mut self, standardize: bool) -> Self {
        self.standardize = standardize;
        self
    }

    pub fn k(&self) -> usize {
        self.k
    }

    fn scaled(fit: &KnnFit, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(fit.center.iter().zip(fit.scale.iter()))
            .map(|(x, (c, s))| (x - c) / s)
            .collect()
    }
}

impl Learner for KnnRegressor {
    fn fit(&mut self, features: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<()> {
        let (width, _) = check_training(features, targets)?;

        let (center, scale) = if self.standardize {
            (0..width)
                .map(|j| {
                    let column: Vec<f64> = features.iter().map(|r| r[j]).collect();
                    let m = mean(&column);
                    let s = if column.len() > 1 { std_dev(&column) } else { 0.0 };
                    // Near-constant columns keep their raw spread
                    let s = if s.is_finite() && s > 1e-8 * m.abs().max(1.0) {
                        s
                    } else {
                        1.0
                    };
                    (m, s)
                })
                .unzip()
        } else {
            (vec![0.0; width], vec![1.0; width])
        };

        let mut fit = KnnFit {
            center,
            scale,
            features: Vec::with_capacity(features.len()),
            targets: targets.to_vec(),
        };
        fit.features = features.iter().map(|r| Self::scaled(&fit, r)).collect();
        self.fitted = Some(fit);
        Ok(())
    }

    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        let fit = self
            .fitted
            .as_ref()
            .ok_or_else(|| LandmarkError::Computation("KNN predict before fit".to_string()))?;
        let width = matrix_width(features)?;
        if width != fit.center.len() {
            return Err(LandmarkError::DimensionMismatch {
                expected: fit.center.len(),
                got: width,
            });
        }

        let k = self.k.min(fit.features.len());
        let n_out = fit.targets[0].len();
        let mut pairs: Vec<(f64, usize)> = Vec::with_capacity(fit.features.len());

        let predictions = features
            .iter()
            .map(|row| {
                let query = Self::scaled(fit, row);
                pairs.clear();
                pairs.extend(fit.features.iter().enumerate().map(|(i, cand)| {
                    let d2: f64 = cand
                        .iter()
                        .zip(query.iter())
                        .map(|(a, b)| (a - b) * (a - b))
                        .sum();
                    (d2, i)
                }));
                pairs.sort_by(|a, b| match a.0.total_cmp(&b.0) {
                    Ordering::Equal => a.1.cmp(&b.1),
                    other => other,
                });

                let mut out = vec![0.0; n_out];
                for &(_, idx) in pairs.iter().take(k) {
                    for (o, t) in out.iter_mut().zip(fit.targets[idx].iter()) {
                        *o += t;
                    }
                }
                out.iter_mut().for_each(|o| *o /= k as f64);
                out
            })
            .collect();

        Ok(predictions)
    }

    fn name(&self) -> &str {
        "KNN"
    }

    fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }
}
