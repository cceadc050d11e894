//! Time-delay embedding of a scalar sequence.
//!
//! Each row of an [`EmbeddedDataset`] is anchored at an origin index `t`:
//! the features are the values at offsets `-(n_lags-1)..=0` and the targets
//! are the values at offsets `1..=horizon`.

use crate::error::{LandmarkError, Result};

/// Lag-feature / future-target matrices built from a series.
#[derive(Debug, Clone)]
pub struct EmbeddedDataset {
    features: Vec<Vec<f64>>,
    targets: Vec<Vec<f64>>,
    origins: Vec<usize>,
    n_lags: usize,
    horizon: usize,
    index_offset: usize,
    derived_columns: Vec<String>,
}

impl EmbeddedDataset {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.origins.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    /// Feature matrix, one row per origin.
    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    /// Target matrix, columns are offsets `1..=horizon`.
    pub fn targets(&self) -> &[Vec<f64>] {
        &self.targets
    }

    /// Origin index of each row, in the coordinates of the source series.
    pub fn origins(&self) -> &[usize] {
        &self.origins
    }

    pub fn n_lags(&self) -> usize {
        self.n_lags
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Time offsets of the lag columns, oldest first. All are `<= 0`.
    pub fn feature_offsets(&self) -> Vec<i64> {
        (0..self.n_lags as i64).map(|k| k - (self.n_lags as i64 - 1)).collect()
    }

    /// Time offsets of the target columns. All are `> 0`.
    pub fn target_offsets(&self) -> Vec<i64> {
        (1..=self.horizon as i64).collect()
    }

    /// Column names: lag columns, then derived columns.
    pub fn feature_names(&self) -> Vec<String> {
        self.feature_offsets()
            .into_iter()
            .map(offset_name)
            .chain(self.derived_columns.iter().cloned())
            .collect()
    }

    /// Target column names.
    pub fn target_names(&self) -> Vec<String> {
        self.target_offsets().into_iter().map(offset_name).collect()
    }

    /// Shift origins so they refer to another series' coordinates.
    ///
    /// Used when the embedded sequence was obtained by dropping leading
    /// observations (e.g. after differencing).
    pub fn with_index_offset(mut self, offset: usize) -> Self {
        for origin in &mut self.origins {
            *origin = *origin - self.index_offset + offset;
        }
        self.index_offset = offset;
        self
    }

    /// Source indices read by the lag columns of `row` (in-bounds only).
    pub fn feature_indices(&self, row: usize) -> Vec<usize> {
        let origin = self.origins[row] as i64;
        let lower = self.index_offset as i64;
        self.feature_offsets()
            .into_iter()
            .map(|o| origin + o)
            .filter(|&i| i >= lower)
            .map(|i| i as usize)
            .collect()
    }

    /// Source indices of the targets of `row`.
    pub fn target_indices(&self, row: usize) -> Vec<usize> {
        let origin = self.origins[row];
        (1..=self.horizon).map(|h| origin + h).collect()
    }

    /// Append a derived feature column. Derived columns are never transformed.
    pub fn append_feature(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        if values.len() != self.len() {
            return Err(LandmarkError::DimensionMismatch {
                expected: self.len(),
                got: values.len(),
            });
        }
        for (row, v) in self.features.iter_mut().zip(values) {
            row.push(v);
        }
        self.derived_columns.push(name.into());
        Ok(())
    }

    /// Keep only the rows whose origin satisfies `keep`.
    pub fn filter_origins<F>(&self, keep: F) -> EmbeddedDataset
    where
        F: Fn(usize) -> bool,
    {
        let rows: Vec<usize> = (0..self.len()).filter(|&r| keep(self.origins[r])).collect();
        self.select_rows(&rows)
    }

    /// Build a dataset from a subset of rows.
    pub fn select_rows(&self, rows: &[usize]) -> EmbeddedDataset {
        EmbeddedDataset {
            features: rows.iter().map(|&r| self.features[r].clone()).collect(),
            targets: rows.iter().map(|&r| self.targets[r].clone()).collect(),
            origins: rows.iter().map(|&r| self.origins[r]).collect(),
            n_lags: self.n_lags,
            horizon: self.horizon,
            index_offset: self.index_offset,
            derived_columns: self.derived_columns.clone(),
        }
    }

    /// Chronological train/test partition.
    ///
    /// The last `ceil(len * test_fraction)` rows form the test partition.
    /// Rows are never shuffled: training keeps only rows whose targets are
    /// observed by the first test origin, so no training target overlaps a
    /// test target.
    pub fn split(&self, test_fraction: f64) -> Result<(EmbeddedDataset, EmbeddedDataset)> {
        validate_fraction(test_fraction)?;

        let n = self.len();
        let n_test = ((n as f64 * test_fraction).ceil() as usize).max(1);
        let needed = n_test + self.horizon + 1;
        if n < needed {
            return Err(LandmarkError::InsufficientHistory { needed, got: n });
        }

        let test_rows: Vec<usize> = (n - n_test..n).collect();
        let first_test_origin = self.origins[n - n_test];
        let train_rows: Vec<usize> = (0..n - n_test)
            .filter(|&r| self.origins[r] + self.horizon <= first_test_origin)
            .collect();

        if train_rows.is_empty() {
            return Err(LandmarkError::InsufficientHistory { needed, got: n });
        }

        Ok((self.select_rows(&train_rows), self.select_rows(&test_rows)))
    }
}

/// Build the lag-feature / future-target matrices for a sequence.
///
/// When `drop_incomplete` is set, only origins whose whole window lies inside
/// the sequence are kept; otherwise every index is an origin and missing
/// positions are filled with NaN.
///
/// # Example
/// ```
/// use ts_landmarks::embedding::embed;
///
/// let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
/// let ds = embed(&values, 2, 2, true).unwrap();
///
/// assert_eq!(ds.len(), 2);
/// assert_eq!(ds.features()[0], vec![1.0, 2.0]);
/// assert_eq!(ds.targets()[0], vec![3.0, 4.0]);
/// ```
pub fn embed(
    values: &[f64],
    n_lags: usize,
    horizon: usize,
    drop_incomplete: bool,
) -> Result<EmbeddedDataset> {
    if n_lags == 0 || horizon == 0 {
        return Err(LandmarkError::InvalidParameter(
            "n_lags and horizon must be at least 1".to_string(),
        ));
    }

    let n = values.len();
    let origins: Vec<usize> = if drop_incomplete {
        if n < n_lags + horizon {
            return Err(LandmarkError::InsufficientHistory {
                needed: n_lags + horizon,
                got: n,
            });
        }
        (n_lags - 1..n - horizon).collect()
    } else {
        if n == 0 {
            return Err(LandmarkError::EmptyData);
        }
        (0..n).collect()
    };

    let value_at = |i: i64| -> f64 {
        if i >= 0 && (i as usize) < n {
            values[i as usize]
        } else {
            f64::NAN
        }
    };

    let mut features = Vec::with_capacity(origins.len());
    let mut targets = Vec::with_capacity(origins.len());
    for &t in &origins {
        let t = t as i64;
        features.push(
            (0..n_lags as i64)
                .map(|k| value_at(t - (n_lags as i64 - 1) + k))
                .collect(),
        );
        targets.push((1..=horizon as i64).map(|h| value_at(t + h)).collect());
    }

    Ok(EmbeddedDataset {
        features,
        targets,
        origins,
        n_lags,
        horizon,
        index_offset: 0,
        derived_columns: Vec::new(),
    })
}

fn offset_name(offset: i64) -> String {
    match offset {
        0 => "t".to_string(),
        o if o < 0 => format!("t-{}", -o),
        o => format!("t+{}", o),
    }
}

pub(crate) fn validate_fraction(test_fraction: f64) -> Result<()> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(LandmarkError::InvalidParameter(format!(
            "test_fraction must be in (0, 1), got {}",
            test_fraction
        )));
    }
    Ok(())
}
