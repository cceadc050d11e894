//! Lag differencing and its inverse.

/// Apply lag-`lag` differencing: `d[i] = x[i + lag] - x[i]`.
///
/// Returns an empty vector when the series is not longer than `lag`.
pub fn difference(series: &[f64], lag: usize) -> Vec<f64> {
    if lag == 0 {
        return series.to_vec();
    }
    if series.len() <= lag {
        return Vec::new();
    }
    series
        .iter()
        .skip(lag)
        .zip(series.iter())
        .map(|(curr, prev)| curr - prev)
        .collect()
}

/// Reverse lag-`lag` differencing.
///
/// `seed` holds the `lag` observations immediately preceding the first
/// difference, oldest first. Values are rebuilt recursively as
/// `x[j] = d[j] + x[j - lag]`, so horizons beyond `lag` reuse values
/// reconstructed earlier in the same call.
///
/// Returns only the reconstructed values (the seed is not repeated).
pub fn undifference(differenced: &[f64], seed: &[f64], lag: usize) -> Vec<f64> {
    if lag == 0 {
        return differenced.to_vec();
    }
    debug_assert_eq!(seed.len(), lag);

    let mut history: Vec<f64> = Vec::with_capacity(seed.len() + differenced.len());
    history.extend_from_slice(seed);
    for &d in differenced {
        let prev = history[history.len() - lag];
        history.push(prev + d);
    }
    history.split_off(lag)
}
