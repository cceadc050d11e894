//! TimeSeries data structure for a univariate, time-ordered sequence.

use crate::error::{LandmarkError, Result};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

/// An immutable univariate time series.
///
/// Timestamps are strictly increasing and every value is finite.
#[derive(Debug, Clone)]
pub struct TimeSeries {
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Create a new series, validating ordering and values.
    pub fn new(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(LandmarkError::DimensionMismatch {
                expected: timestamps.len(),
                got: values.len(),
            });
        }

        for i in 1..timestamps.len() {
            if timestamps[i] <= timestamps[i - 1] {
                return Err(LandmarkError::TimestampError(
                    "timestamps must be strictly increasing".to_string(),
                ));
            }
        }

        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(LandmarkError::InvalidParameter(format!(
                "non-finite value at index {}",
                pos
            )));
        }

        Ok(Self { timestamps, values })
    }

    /// Create a series with regularly spaced timestamps starting at `start`.
    pub fn regular(start: DateTime<Utc>, step: Duration, values: Vec<f64>) -> Result<Self> {
        if step <= Duration::zero() {
            return Err(LandmarkError::InvalidParameter(
                "step must be positive".to_string(),
            ));
        }
        let overflow = |i: usize| {
            LandmarkError::TimestampError(format!("timestamp overflow at index {}", i))
        };
        let timestamps = (0..values.len())
            .map(|i| {
                let k = i32::try_from(i).map_err(|_| overflow(i))?;
                let offset = step.checked_mul(k).ok_or_else(|| overflow(i))?;
                start.checked_add_signed(offset).ok_or_else(|| overflow(i))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(timestamps, values)
    }

    /// Get the number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get timestamps.
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Get values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Timestamp of a single observation.
    pub fn timestamp(&self, index: usize) -> Result<DateTime<Utc>> {
        self.timestamps
            .get(index)
            .copied()
            .ok_or(LandmarkError::InvalidParameter(format!(
                "index {} out of bounds for series of length {}",
                index,
                self.len()
            )))
    }

    /// Extract a slice of the time series.
    pub fn slice(&self, start: usize, end: usize) -> Result<TimeSeries> {
        if start > end {
            return Err(LandmarkError::InvalidParameter(
                "start must be <= end".to_string(),
            ));
        }
        if end > self.len() {
            return Err(LandmarkError::InsufficientHistory {
                needed: end,
                got: self.len(),
            });
        }

        Ok(TimeSeries {
            timestamps: self.timestamps[start..end].to_vec(),
            values: self.values[start..end].to_vec(),
        })
    }

    /// Infer the sampling interval as the modal spacing between timestamps.
    ///
    /// Fails if fewer than `tolerance` (fraction) of the spacings agree.
    pub fn infer_spacing(&self, tolerance: f64) -> Result<Duration> {
        if self.len() < 2 {
            return Err(LandmarkError::InsufficientHistory {
                needed: 2,
                got: self.len(),
            });
        }

        let mut counts: HashMap<i64, usize> = HashMap::new();
        for w in self.timestamps.windows(2) {
            *counts.entry((w[1] - w[0]).num_seconds()).or_insert(0) += 1;
        }

        // Smallest spacing wins ties so the result is deterministic.
        let (modal_diff, modal_count) = counts
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
            .map(|(&diff, &count)| (diff, count))
            .ok_or(LandmarkError::EmptyData)?;

        let total: usize = counts.values().sum();
        if (modal_count as f64 / total as f64) < tolerance {
            return Err(LandmarkError::TimestampError(
                "no unique modal spacing found".to_string(),
            ));
        }

        Ok(Duration::seconds(modal_diff))
    }
}
