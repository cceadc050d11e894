//! Landmark evaluation framework.
//!
//! Each structural dimension (trend, seasonality, variance, change) has a
//! small grid of named configurations that always includes `base`. Every
//! configuration is scored with the same learner family on the same
//! rolling-origin folds, so its error relative to `base` measures the effect
//! of the transform alone.
//!
//! # Example
//!
//! ```
//! use ts_landmarks::core::FrequencyProfile;
//! use ts_landmarks::landmark::{run, ConfigurationGrid, LandmarkConfig};
//!
//! let series: Vec<f64> = (0..240)
//!     .map(|i| 50.0 + 10.0 * (2.0 * std::f64::consts::PI * i as f64 / 12.0).sin())
//!     .collect();
//! let profile = FrequencyProfile::from_code("M").unwrap();
//!
//! let grid = ConfigurationGrid::seasonality(&[12]);
//! let outcome = run(&grid, &series, &profile, &LandmarkConfig::default()).unwrap();
//! let errors = outcome.to_map();
//! assert!(errors["seasonal_differences"] <= errors["base"] + 1e-9);
//! ```

mod config;
mod framework;
mod results;

pub use config::{Configuration, ConfigurationGrid, Dimension, LandmarkConfig};
pub use framework::{evaluate_configuration, run};
pub use results::{ExperimentResult, LandmarkOutcome, LandmarkResults};
