//! Signed logarithm, defined on the whole real line.

/// `sign(x) * ln(1 + |x|)`.
///
/// Strictly monotonic, zero at zero, and finite for every finite input.
pub fn signed_log1p(series: &[f64]) -> Vec<f64> {
    series.iter().map(|&x| x.signum() * x.abs().ln_1p()).collect()
}

/// Exact inverse of [`signed_log1p`]: `sign(y) * (exp(|y|) - 1)`.
pub fn inv_signed_log1p(transformed: &[f64]) -> Vec<f64> {
    transformed
        .iter()
        .map(|&y| y.signum() * y.abs().exp_m1())
        .collect()
}
