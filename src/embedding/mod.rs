//! Time-delay embedding and chronological partitioning.
//!
//! Turns a scalar sequence into lag-feature / future-target matrices and
//! provides train/test partitions that never shuffle across time.
//!
//! # Example
//!
//! ```
//! use ts_landmarks::embedding::{embed, rolling_origin_folds};
//!
//! let values: Vec<f64> = (0..60).map(|i| i as f64).collect();
//! let ds = embed(&values, 6, 3, true).unwrap();
//! let (train, test) = ds.split(0.2).unwrap();
//! assert!(train.origins().last() < test.origins().first());
//!
//! let folds = rolling_origin_folds(values.len(), 6, 3, 0.2, 1).unwrap();
//! assert_eq!(folds.len(), 1);
//! ```

mod delay;
mod folds;

pub(crate) use delay::validate_fraction;
pub use delay::{embed, EmbeddedDataset};
pub use folds::{rolling_origin_folds, EvaluationFold};
