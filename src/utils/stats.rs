//! Statistical utility functions.

use crate::error::{LandmarkError, Result};
use statrs::distribution::{ContinuousCDF, Normal};

/// Two-sided standard normal critical value `Φ⁻¹(1 - alpha/2)`.
///
/// # Example
/// ```
/// use ts_landmarks::utils::normal_critical_value;
///
/// let z = normal_critical_value(0.05).unwrap();
/// assert!((z - 1.96).abs() < 0.01);
/// ```
pub fn normal_critical_value(alpha: f64) -> Result<f64> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(LandmarkError::InvalidParameter(format!(
            "alpha must be in (0, 1), got {}",
            alpha
        )));
    }
    let normal =
        Normal::new(0.0, 1.0).map_err(|e| LandmarkError::Computation(e.to_string()))?;
    Ok(normal.inverse_cdf(1.0 - alpha / 2.0))
}

/// Calculate the mean of a slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Calculate the variance of a slice (sample variance with n-1 denominator).
pub fn variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|x| (x - m).powi(2)).sum();
    sum_sq / (values.len() - 1) as f64
}

/// Calculate the standard deviation of a slice.
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Calculate the median of a slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Robust noise scale: MAD of first differences, rescaled to a normal
/// standard deviation of the underlying observations.
///
/// Level shifts only touch a handful of differences, so the estimate stays
/// close to the within-regime noise.
pub fn difference_noise_scale(values: &[f64]) -> f64 {
    if values.len() < 3 {
        return 0.0;
    }
    let diffs: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
    let med = median(&diffs);
    let deviations: Vec<f64> = diffs.iter().map(|d| (d - med).abs()).collect();
    1.4826 * median(&deviations) / std::f64::consts::SQRT_2
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn critical_value_known_levels() {
        assert_relative_eq!(normal_critical_value(0.05).unwrap(), 1.959964, epsilon = 1e-5);
        assert_relative_eq!(normal_critical_value(0.01).unwrap(), 2.575829, epsilon = 1e-5);
    }

    #[test]
    fn critical_value_rejects_bad_alpha() {
        assert!(normal_critical_value(0.0).is_err());
        assert!(normal_critical_value(1.0).is_err());
        assert!(normal_critical_value(f64::NAN).is_err());
    }

    #[test]
    fn mean_calculates_correctly() {
        assert_relative_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]), 3.0, epsilon = 1e-10);
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn variance_calculates_correctly() {
        assert_relative_eq!(variance(&[1.0, 2.0, 3.0, 4.0, 5.0]), 2.5, epsilon = 1e-10);
        assert!(variance(&[1.0]).is_nan());
    }

    #[test]
    fn std_dev_calculates_correctly() {
        assert_relative_eq!(
            std_dev(&[1.0, 2.0, 3.0, 4.0, 5.0]),
            2.5_f64.sqrt(),
            epsilon = 1e-10
        );
    }

    #[test]
    fn median_calculates_correctly() {
        assert_relative_eq!(median(&[1.0, 2.0, 3.0, 4.0, 5.0]), 3.0, epsilon = 1e-10);
        assert_relative_eq!(median(&[1.0, 2.0, 3.0, 4.0]), 2.5, epsilon = 1e-10);
        assert_relative_eq!(median(&[5.0, 1.0, 3.0, 2.0, 4.0]), 3.0, epsilon = 1e-10);
        assert!(median(&[]).is_nan());
    }

    #[test]
    fn noise_scale_ignores_single_level_shift() {
        let mut values: Vec<f64> = (0..50).map(|i| if i % 2 == 0 { 0.1 } else { -0.1 }).collect();
        values.extend((0..50).map(|i| 10.0 + if i % 2 == 0 { 0.1 } else { -0.1 }));
        let scale = difference_noise_scale(&values);
        assert!(scale < 0.5, "got {}", scale);
    }

    #[test]
    fn noise_scale_constant_is_zero() {
        assert_relative_eq!(difference_noise_scale(&[3.0; 10]), 0.0);
    }
}
