//! PELT (Pruned Exact Linear Time) optimal partitioning.
//!
//! Minimizes the sum of segment costs plus a constant penalty per
//! breakpoint. The pruning step keeps the search exact.

use super::cost::{segment_cost, CostFunction, CumulativeCost};

/// Configuration for the PELT search.
#[derive(Debug, Clone)]
pub struct PeltConfig {
    /// Cost function to use
    pub cost_fn: CostFunction,
    /// Penalty for each changepoint (controls number of changepoints)
    pub penalty: f64,
    /// Minimum segment length
    pub min_segment_length: usize,
}

impl Default for PeltConfig {
    fn default() -> Self {
        Self {
            cost_fn: CostFunction::L2,
            penalty: 1.0,
            min_segment_length: 2,
        }
    }
}

impl PeltConfig {
    /// Set the cost function.
    pub fn cost_function(mut self, cost_fn: CostFunction) -> Self {
        self.cost_fn = cost_fn;
        self
    }

    /// Set the penalty.
    pub fn penalty(mut self, penalty: f64) -> Self {
        self.penalty = penalty;
        self
    }

    /// Set minimum segment length.
    pub fn min_segment_length(mut self, min_len: usize) -> Self {
        self.min_segment_length = min_len.max(1);
        self
    }
}

/// Result of a PELT search.
#[derive(Debug, Clone)]
pub struct PeltResult {
    /// Start index of every segment after the first, ascending
    pub changepoints: Vec<usize>,
    /// Segment boundaries as half-open (start, end) pairs
    pub segments: Vec<(usize, usize)>,
    /// Total cost (excluding penalty)
    pub cost: f64,
}

impl PeltResult {
    pub fn n_changepoints(&self) -> usize {
        self.changepoints.len()
    }
}

/// Detect changepoints using the PELT algorithm.
pub fn pelt_detect(series: &[f64], config: &PeltConfig) -> PeltResult {
    let n = series.len();
    let min_len = config.min_segment_length.max(1);

    if n < 2 * min_len {
        return PeltResult {
            changepoints: Vec::new(),
            segments: vec![(0, n)],
            cost: segment_cost(series, config.cost_fn),
        };
    }

    let cumulative = CumulativeCost::new(series, config.cost_fn);

    // f[t]: optimal penalized cost of series[0..t]
    let mut f = vec![f64::INFINITY; n + 1];
    f[0] = -config.penalty;
    let mut last_cp: Vec<usize> = vec![0; n + 1];
    let mut candidates: Vec<usize> = vec![0];

    for t in min_len..=n {
        let mut best_cost = f64::INFINITY;
        let mut best_cp = 0;

        for &s in &candidates {
            if t - s >= min_len && f[s].is_finite() {
                let total = f[s] + cumulative.cost(s, t) + config.penalty;
                if total < best_cost {
                    best_cost = total;
                    best_cp = s;
                }
            }
        }

        f[t] = best_cost;
        last_cp[t] = best_cp;

        // Prune against the last end point every later segment may follow.
        let anchor = t + 1 - min_len;
        if f[anchor].is_finite() {
            candidates.retain(|&s| {
                if anchor < s + min_len {
                    return true;
                }
                f[s] + cumulative.cost(s, anchor) <= f[anchor]
            });
        }

        // t can start a segment only if the remainder fits one more segment
        if t + min_len <= n {
            candidates.push(t);
        }
    }

    let mut changepoints = Vec::new();
    let mut t = n;
    while t > 0 {
        let prev = last_cp[t];
        if prev > 0 {
            changepoints.push(prev);
        }
        t = prev;
    }
    changepoints.reverse();

    let mut segments = Vec::with_capacity(changepoints.len() + 1);
    let mut start = 0;
    for &cp in &changepoints {
        segments.push((start, cp));
        start = cp;
    }
    segments.push((start, n));

    let cost = segments
        .iter()
        .map(|&(s, e)| cumulative.cost(s, e))
        .sum();

    PeltResult {
        changepoints,
        segments,
        cost,
    }
}
