//! Landmark experiment results.

use std::collections::BTreeMap;

use super::config::Dimension;

/// Aggregated error of one configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentResult {
    pub dimension: Dimension,
    pub configuration: String,
    /// Mean SMAPE over folds (lower is better).
    pub error: f64,
    /// Number of folds that contributed.
    pub folds: usize,
}

/// Scored configurations of one dimension. Always contains `base`.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkResults {
    dimension: Dimension,
    results: Vec<ExperimentResult>,
}

impl LandmarkResults {
    /// Wrap scored results; `None` when `base` is absent.
    pub(crate) fn new(dimension: Dimension, results: Vec<ExperimentResult>) -> Option<Self> {
        if results.iter().any(|r| r.configuration == "base") {
            Some(Self { dimension, results })
        } else {
            None
        }
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn results(&self) -> &[ExperimentResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Error of a configuration, if it was scored.
    pub fn error(&self, configuration: &str) -> Option<f64> {
        self.results
            .iter()
            .find(|r| r.configuration == configuration)
            .map(|r| r.error)
    }

    pub fn base_error(&self) -> f64 {
        self.error("base").unwrap_or(f64::NAN)
    }

    /// Whether a configuration beats the baseline; `None` if it was not scored.
    pub fn improves(&self, configuration: &str) -> Option<bool> {
        self.error(configuration).map(|e| e < self.base_error())
    }

    /// Lowest-error configuration.
    pub fn best(&self) -> Option<&ExperimentResult> {
        self.results.iter().min_by(|a, b| a.error.total_cmp(&b.error))
    }

    /// `{configuration_name -> error}` map for reporting.
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.results
            .iter()
            .map(|r| (r.configuration.clone(), r.error))
            .collect()
    }
}

/// Outcome of evaluating one dimension.
#[derive(Debug, Clone, PartialEq)]
pub enum LandmarkOutcome {
    Scored(LandmarkResults),
    /// The baseline could not be scored, so nothing is reported.
    NoResults { dimension: Dimension },
}

impl LandmarkOutcome {
    pub fn dimension(&self) -> Dimension {
        match self {
            LandmarkOutcome::Scored(r) => r.dimension(),
            LandmarkOutcome::NoResults { dimension } => *dimension,
        }
    }

    pub fn results(&self) -> Option<&LandmarkResults> {
        match self {
            LandmarkOutcome::Scored(r) => Some(r),
            LandmarkOutcome::NoResults { .. } => None,
        }
    }

    pub fn is_scored(&self) -> bool {
        matches!(self, LandmarkOutcome::Scored(_))
    }

    /// Configuration-to-error map; empty when nothing was scored.
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.results().map(|r| r.to_map()).unwrap_or_default()
    }
}
