//! Ridge regression with an unpenalized intercept.
//!
//! Features and targets are centered on their training means, then the
//! regularized normal equations are factored once and solved for every
//! output column.

use super::traits::{check_training, matrix_width, Learner};
use crate::error::{LandmarkError, Result};
use crate::utils::linalg::Cholesky;

/// Multi-output ridge regressor.
#[derive(Debug, Clone)]
pub struct RidgeRegressor {
    alpha: f64,
    fitted: Option<RidgeFit>,
}

#[derive(Debug, Clone)]
struct RidgeFit {
    feature_means: Vec<f64>,
    intercepts: Vec<f64>,
    /// coefficients[output][feature]
    coefficients: Vec<Vec<f64>>,
}

impl Default for RidgeRegressor {
    fn default() -> Self {
        Self::new(1e-3)
    }
}

impl RidgeRegressor {
    /// Create a regressor with L2 penalty `alpha` (clamped to be non-negative).
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha: if alpha.is_finite() { alpha.max(0.0) } else { 0.0 },
            fitted: None,
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Fitted coefficients, one vector per output column.
    pub fn coefficients(&self) -> Option<&[Vec<f64>]> {
        self.fitted.as_ref().map(|f| f.coefficients.as_slice())
    }

    pub fn intercepts(&self) -> Option<&[f64]> {
        self.fitted.as_ref().map(|f| f.intercepts.as_slice())
    }
}

fn column_means(rows: &[Vec<f64>], width: usize) -> Vec<f64> {
    let mut means = vec![0.0; width];
    for row in rows {
        for (m, v) in means.iter_mut().zip(row.iter()) {
            *m += v;
        }
    }
    let n = rows.len() as f64;
    means.iter_mut().for_each(|m| *m /= n);
    means
}

impl Learner for RidgeRegressor {
    fn fit(&mut self, features: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<()> {
        let (p, q) = check_training(features, targets)?;
        let x_mean = column_means(features, p);
        let y_mean = column_means(targets, q);

        let mut xtx = vec![vec![0.0; p]; p];
        let mut xty = vec![vec![0.0; p]; q];
        for (x_row, y_row) in features.iter().zip(targets.iter()) {
            let xc: Vec<f64> = x_row.iter().zip(&x_mean).map(|(x, m)| x - m).collect();
            for i in 0..p {
                for j in 0..=i {
                    xtx[i][j] += xc[i] * xc[j];
                }
            }
            for (out, (y, ym)) in y_row.iter().zip(&y_mean).enumerate() {
                let yc = y - ym;
                for i in 0..p {
                    xty[out][i] += xc[i] * yc;
                }
            }
        }
        for i in 0..p {
            for j in 0..i {
                xtx[j][i] = xtx[i][j];
            }
            // A tiny ridge keeps constant columns solvable when alpha is 0
            xtx[i][i] += self.alpha + 1e-10;
        }

        let chol = Cholesky::factor(&xtx).map_err(|e| match e {
            LandmarkError::Computation(msg) => {
                LandmarkError::Computation(format!("ridge fit failed: {}", msg))
            }
            other => other,
        })?;

        let coefficients = xty
            .iter()
            .map(|rhs| chol.solve(rhs))
            .collect::<Result<Vec<Vec<f64>>>>()?;
        let intercepts = coefficients
            .iter()
            .zip(&y_mean)
            .map(|(beta, ym)| ym - beta.iter().zip(&x_mean).map(|(b, m)| b * m).sum::<f64>())
            .collect();

        self.fitted = Some(RidgeFit {
            feature_means: x_mean,
            intercepts,
            coefficients,
        });
        Ok(())
    }

    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        let fit = self
            .fitted
            .as_ref()
            .ok_or_else(|| LandmarkError::Computation("ridge predict before fit".to_string()))?;
        let width = matrix_width(features)?;
        if width != fit.feature_means.len() {
            return Err(LandmarkError::DimensionMismatch {
                expected: fit.feature_means.len(),
                got: width,
            });
        }

        Ok(features
            .iter()
            .map(|row| {
                fit.coefficients
                    .iter()
                    .zip(&fit.intercepts)
                    .map(|(beta, b0)| b0 + beta.iter().zip(row).map(|(b, x)| b * x).sum::<f64>())
                    .collect()
            })
            .collect())
    }

    fn name(&self) -> &str {
        "Ridge"
    }

    fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }
}
