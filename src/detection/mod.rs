//! Autocorrelation-based structure detection.
//!
//! Significant lags and candidate seasonal periods seed the seasonality
//! landmark grid.
//!
//! # Example
//!
//! ```
//! use ts_landmarks::detection::analyze;
//!
//! let series: Vec<f64> = (0..96)
//!     .map(|i| ((i % 8) as f64 - 3.5).abs())
//!     .collect();
//! let result = analyze(&series, 24, 0.05).unwrap();
//! assert!(result.candidate_periods.contains(&8));
//! ```

mod acf;

pub use acf::{
    analyze, autocorrelations, non_redundant_periods, partial_autocorrelations, AcfResult,
    LagCorrelation,
};
