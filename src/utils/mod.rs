//! Numeric helpers shared across the crate.

pub mod linalg;
pub mod metrics;
pub mod stats;

pub use linalg::{solve_symmetric, Cholesky};
pub use metrics::{mae, smape, smape_rows};
pub use stats::{difference_noise_scale, mean, median, normal_critical_value, std_dev, variance};
