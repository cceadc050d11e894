//! Segment cost functions for penalized partitioning.
//!
//! Lower cost indicates a better fit of a single regime to the segment.

/// Cost function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CostFunction {
    /// Sum of squared deviations from the segment mean.
    #[default]
    L2,
    /// Gaussian negative log-likelihood with segment mean and variance.
    Normal,
}

/// Compute the cost of a segment using the specified cost function.
pub fn segment_cost(segment: &[f64], cost_fn: CostFunction) -> f64 {
    match cost_fn {
        CostFunction::L2 => l2_cost(segment),
        CostFunction::Normal => normal_cost(segment),
    }
}

/// L2 cost: residual sum of squares around the mean.
pub fn l2_cost(segment: &[f64]) -> f64 {
    if segment.is_empty() {
        return 0.0;
    }
    let mean = segment.iter().sum::<f64>() / segment.len() as f64;
    segment.iter().map(|x| (x - mean).powi(2)).sum()
}

/// Variance floor keeping the Normal cost finite on constant segments.
const VARIANCE_FLOOR: f64 = 1e-10;

/// Normal cost: `n * ln(variance + floor)`, constant terms dropped.
///
/// Splitting a segment never raises the total cost.
pub fn normal_cost(segment: &[f64]) -> f64 {
    let n = segment.len();
    if n == 0 {
        return 0.0;
    }
    gaussian_cost(l2_cost(segment), n)
}

fn gaussian_cost(l2: f64, n: usize) -> f64 {
    n as f64 * (l2 / n as f64 + VARIANCE_FLOOR).ln()
}

/// Total cost of a segmentation given its interior breakpoints.
pub fn total_cost(series: &[f64], changepoints: &[usize], cost_fn: CostFunction) -> f64 {
    let mut bounds = Vec::with_capacity(changepoints.len() + 2);
    bounds.push(0);
    bounds.extend(changepoints.iter().copied().filter(|&c| c > 0 && c < series.len()));
    bounds.push(series.len());

    bounds
        .windows(2)
        .map(|w| segment_cost(&series[w[0]..w[1]], cost_fn))
        .sum()
}

/// Prefix sums giving O(1) segment costs.
///
/// Sums are taken over the series centred on its mean so that
/// `sum_sq - sum^2 / n` keeps its precision far from zero.
#[derive(Debug, Clone)]
pub struct CumulativeCost {
    cost_fn: CostFunction,
    sum: Vec<f64>,
    sum_sq: Vec<f64>,
}

impl CumulativeCost {
    pub fn new(series: &[f64], cost_fn: CostFunction) -> Self {
        let center = if series.is_empty() {
            0.0
        } else {
            series.iter().sum::<f64>() / series.len() as f64
        };
        let mut sum = Vec::with_capacity(series.len() + 1);
        let mut sum_sq = Vec::with_capacity(series.len() + 1);
        sum.push(0.0);
        sum_sq.push(0.0);
        for &x in series {
            let d = x - center;
            sum.push(sum[sum.len() - 1] + d);
            sum_sq.push(sum_sq[sum_sq.len() - 1] + d * d);
        }
        Self {
            cost_fn,
            sum,
            sum_sq,
        }
    }

    /// Cost of `series[start..end]`.
    pub fn cost(&self, start: usize, end: usize) -> f64 {
        let n = end.saturating_sub(start);
        if n == 0 {
            return 0.0;
        }
        let s = self.sum[end] - self.sum[start];
        let sq = self.sum_sq[end] - self.sum_sq[start];
        let l2 = (sq - s * s / n as f64).max(0.0);

        match self.cost_fn {
            CostFunction::L2 => l2,
            CostFunction::Normal => gaussian_cost(l2, n),
        }
    }
}
