//! Accuracy metrics for forecast evaluation.

use crate::error::{LandmarkError, Result};

fn check_pair(actual: &[f64], predicted: &[f64]) -> Result<()> {
    if actual.is_empty() || predicted.is_empty() {
        return Err(LandmarkError::EmptyData);
    }
    if actual.len() != predicted.len() {
        return Err(LandmarkError::DimensionMismatch {
            expected: actual.len(),
            got: predicted.len(),
        });
    }
    Ok(())
}

/// Symmetric Mean Absolute Percentage Error, in percent (0..=200).
///
/// Pairs where both values are zero contribute zero error.
///
/// # Example
/// ```
/// use ts_landmarks::utils::smape;
///
/// let error = smape(&[100.0, 200.0], &[110.0, 200.0]).unwrap();
/// assert!((error - 4.7619).abs() < 1e-3);
/// ```
pub fn smape(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    check_pair(actual, predicted)?;
    let total: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| {
            let denom = a.abs() + p.abs();
            if denom == 0.0 {
                0.0
            } else {
                2.0 * (a - p).abs() / denom
            }
        })
        .sum();
    Ok(total * 100.0 / actual.len() as f64)
}

/// Mean Absolute Error.
pub fn mae(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    check_pair(actual, predicted)?;
    let total: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum();
    Ok(total / actual.len() as f64)
}

/// SMAPE averaged over every cell of a multi-horizon forecast matrix.
pub fn smape_rows(actual: &[Vec<f64>], predicted: &[Vec<f64>]) -> Result<f64> {
    if actual.len() != predicted.len() {
        return Err(LandmarkError::DimensionMismatch {
            expected: actual.len(),
            got: predicted.len(),
        });
    }
    if actual.is_empty() {
        return Err(LandmarkError::EmptyData);
    }
    let per_row = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| smape(a, p))
        .collect::<Result<Vec<f64>>>()?;
    Ok(per_row.iter().sum::<f64>() / per_row.len() as f64)
}
