//! Two-sample distributional equality test.
//!
//! Kolmogorov-Smirnov test with the asymptotic Kolmogorov distribution.

use crate::error::{LandmarkError, Result};

/// Result of a two-sample Kolmogorov-Smirnov test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoSampleResult {
    /// Maximum distance between the empirical CDFs.
    pub statistic: f64,
    /// Approximate p-value under the null of equal distributions.
    pub p_value: f64,
}

impl TwoSampleResult {
    /// Whether the null of equal distributions is rejected at `alpha`.
    pub fn rejects(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Two-sample Kolmogorov-Smirnov test.
///
/// # Example
/// ```
/// use ts_landmarks::validation::ks_two_sample;
///
/// let a: Vec<f64> = (0..50).map(|i| i as f64 * 0.01).collect();
/// let b: Vec<f64> = (0..50).map(|i| 10.0 + i as f64 * 0.01).collect();
/// let result = ks_two_sample(&a, &b).unwrap();
///
/// assert_eq!(result.statistic, 1.0);
/// assert!(result.rejects(0.05));
/// ```
pub fn ks_two_sample(a: &[f64], b: &[f64]) -> Result<TwoSampleResult> {
    if a.is_empty() || b.is_empty() {
        return Err(LandmarkError::EmptyData);
    }
    if a.iter().chain(b.iter()).any(|v| !v.is_finite()) {
        return Err(LandmarkError::InvalidParameter(
            "samples must be finite".to_string(),
        ));
    }

    let mut xs = a.to_vec();
    let mut ys = b.to_vec();
    xs.sort_by(|p, q| p.total_cmp(q));
    ys.sort_by(|p, q| p.total_cmp(q));

    let n1 = xs.len() as f64;
    let n2 = ys.len() as f64;
    let (mut i, mut j) = (0usize, 0usize);
    let mut d: f64 = 0.0;

    while i < xs.len() && j < ys.len() {
        let x = xs[i];
        let y = ys[j];
        // Step past every copy of the smaller value so ties move both CDFs.
        let v = x.min(y);
        while i < xs.len() && xs[i] == v {
            i += 1;
        }
        while j < ys.len() && ys[j] == v {
            j += 1;
        }
        d = d.max((i as f64 / n1 - j as f64 / n2).abs());
    }

    let en = (n1 * n2 / (n1 + n2)).sqrt();
    let lambda = (en + 0.12 + 0.11 / en) * d;

    Ok(TwoSampleResult {
        statistic: d,
        p_value: kolmogorov_sf(lambda),
    })
}

/// Survival function of the Kolmogorov distribution,
/// `Q(λ) = 2 Σ (-1)^(j-1) exp(-2 j² λ²)`.
fn kolmogorov_sf(lambda: f64) -> f64 {
    if lambda < 1e-3 {
        return 1.0;
    }
    let a2 = -2.0 * lambda * lambda;
    let mut sum = 0.0;
    let mut sign = 1.0;
    let mut prev = 0.0;

    for j in 1..=100 {
        let jf = j as f64;
        let term = sign * 2.0 * (a2 * jf * jf).exp();
        sum += term;
        if term.abs() <= 1e-3 * prev || term.abs() <= 1e-10 * sum.abs() {
            return sum.clamp(0.0, 1.0);
        }
        sign = -sign;
        prev = term.abs();
    }

    // Series did not converge: lambda is tiny, distributions are close.
    1.0
}
