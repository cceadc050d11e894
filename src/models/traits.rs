//! Learner trait defining the common interface for landmark models.

use crate::error::{LandmarkError, Result};

/// Multi-output regressor mapping lag features to a vector of future values.
///
/// This trait is object-safe and can be used with `Box<dyn Learner>`.
pub trait Learner {
    /// Fit on row-major features and targets (one target column per horizon step).
    fn fit(&mut self, features: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<()>;

    /// Predict one target row per feature row.
    fn predict(&self, features: &[Vec<f64>]) -> Result<Vec<Vec<f64>>>;

    /// Get the model name.
    fn name(&self) -> &str;

    /// Check if the model has been fitted.
    fn is_fitted(&self) -> bool;
}

/// Type alias for boxed learner trait objects.
pub type BoxedLearner = Box<dyn Learner>;

/// Width of a rectangular matrix after checking every row.
pub(crate) fn matrix_width(rows: &[Vec<f64>]) -> Result<usize> {
    let width = rows.first().map(|r| r.len()).ok_or(LandmarkError::EmptyData)?;
    for row in rows {
        if row.len() != width {
            return Err(LandmarkError::DimensionMismatch {
                expected: width,
                got: row.len(),
            });
        }
        if row.iter().any(|v| !v.is_finite()) {
            return Err(LandmarkError::Computation(
                "non-finite value in learner input".to_string(),
            ));
        }
    }
    Ok(width)
}

/// Validate a training pair and return `(n_features, n_outputs)`.
pub(crate) fn check_training(features: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<(usize, usize)> {
    if features.len() != targets.len() {
        return Err(LandmarkError::DimensionMismatch {
            expected: features.len(),
            got: targets.len(),
        });
    }
    Ok((matrix_width(features)?, matrix_width(targets)?))
}
