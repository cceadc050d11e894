//! Rolling-origin evaluation folds.
//!
//! Folds are expressed in the index space of the raw series so that every
//! configuration of a dimension is scored on the same target values, whatever
//! its transform does to the series length.

use super::delay::validate_fraction;
use crate::error::{LandmarkError, Result};
use std::ops::Range;

/// One rolling-origin split.
///
/// `train` and `test` are ranges of row origins. Every training target index
/// (`origin + horizon` at most) is `<= test.start`, so training never sees a
/// value the test rows are asked to predict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationFold {
    pub train: Range<usize>,
    pub test: Range<usize>,
}

impl EvaluationFold {
    /// Number of test rows.
    pub fn n_test(&self) -> usize {
        self.test.len()
    }

    /// Last observed index before the first test target.
    pub fn cutoff(&self) -> usize {
        self.test.start
    }

    /// Range of target indices predicted by this fold.
    pub fn target_span(&self, horizon: usize) -> Range<usize> {
        self.test.start + 1..self.test.end + horizon
    }
}

/// Build rolling-origin folds for a series of length `n`.
///
/// Fold 0 holds out the last `ceil(rows * test_fraction)` embeddable origins.
/// Each further fold moves the cutoff back by `n_test + horizon - 1` origins,
/// so test targets of different folds never overlap. Windows that no longer
/// leave a training row are not produced.
///
/// # Example
/// ```
/// use ts_landmarks::embedding::rolling_origin_folds;
///
/// let folds = rolling_origin_folds(100, 5, 3, 0.2, 2).unwrap();
/// assert_eq!(folds.len(), 2);
/// assert!(folds[1].target_span(3).end <= folds[0].target_span(3).start);
/// ```
pub fn rolling_origin_folds(
    n: usize,
    lag_count: usize,
    horizon: usize,
    test_fraction: f64,
    n_windows: usize,
) -> Result<Vec<EvaluationFold>> {
    validate_fraction(test_fraction)?;
    if lag_count == 0 || horizon == 0 || n_windows == 0 {
        return Err(LandmarkError::InvalidParameter(
            "lag_count, horizon and n_windows must be at least 1".to_string(),
        ));
    }
    if n < lag_count + horizon {
        return Err(LandmarkError::InsufficientHistory {
            needed: lag_count + horizon,
            got: n,
        });
    }

    let first_origin = lag_count - 1;
    let end_origin = n - horizon; // exclusive
    let n_rows = end_origin - first_origin;
    let n_test = ((n_rows as f64 * test_fraction).ceil() as usize).max(1);
    let stride = n_test + horizon - 1;

    let mut folds = Vec::with_capacity(n_windows);
    for w in 0..n_windows {
        let Some(test_end) = end_origin.checked_sub(w * stride) else {
            break;
        };
        let Some(test_start) = test_end.checked_sub(n_test) else {
            break;
        };
        // Training origins t need t + horizon <= test_start.
        let train_end = (test_start + 1).saturating_sub(horizon);
        if train_end <= first_origin {
            break;
        }
        folds.push(EvaluationFold {
            train: first_origin..train_end,
            test: test_start..test_end,
        });
    }

    if folds.is_empty() {
        return Err(LandmarkError::InsufficientHistory {
            needed: lag_count + 2 * horizon + n_test - 1,
            got: n,
        });
    }

    Ok(folds)
}
