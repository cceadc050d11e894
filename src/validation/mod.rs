//! Statistical tests used to qualify detected structure.
//!
//! # Example
//!
//! ```
//! use ts_landmarks::validation::ks_two_sample;
//!
//! let before = vec![0.1, -0.2, 0.15, -0.1, 0.05, -0.08, 0.12, -0.15];
//! let after = vec![5.1, 4.8, 5.15, 4.9, 5.05, 4.92, 5.12, 4.85];
//! let result = ks_two_sample(&before, &after).unwrap();
//! assert!(result.rejects(0.05));
//! ```

pub mod two_sample;

pub use two_sample::{ks_two_sample, TwoSampleResult};
