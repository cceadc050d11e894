//! Change-point detection.
//!
//! Regimes are found with an exact PELT search over a penalized segment
//! cost. Each reported breakpoint is checked with a two-sample
//! Kolmogorov-Smirnov test on the data before and after it.
//!
//! # Cost Functions
//!
//! - **L2**: squared deviations from the segment mean (default)
//! - **Normal**: Gaussian log-likelihood, sensitive to variance changes
//!
//! # Example
//!
//! ```
//! use ts_landmarks::changepoint::{pelt_detect, PeltConfig};
//!
//! let mut series = vec![0.0; 50];
//! series.extend(vec![10.0; 50]);
//!
//! let result = pelt_detect(&series, &PeltConfig::default().penalty(5.0));
//! assert_eq!(result.changepoints, vec![50]);
//! ```

pub mod cost;
mod detector;
pub mod pelt;

pub use cost::{l2_cost, normal_cost, segment_cost, total_cost, CostFunction, CumulativeCost};
pub use detector::{
    breakpoints, detect, discard_terminal, significance, ChangePoint, DetectorConfig, Penalty,
    ShiftSignificance,
};
pub use pelt::{pelt_detect, PeltConfig, PeltResult};
