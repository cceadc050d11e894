//! Lightweight learners used inside landmark experiments.
//!
//! One [`LearnerKind`] is chosen per run and every configuration gets a fresh
//! instance of it, so comparisons isolate the effect of the transform.
//!
//! # Example
//!
//! ```
//! use ts_landmarks::models::{Learner, LearnerKind};
//!
//! let features: Vec<Vec<f64>> = (0..20).map(|i| vec![i as f64]).collect();
//! let targets: Vec<Vec<f64>> = (0..20).map(|i| vec![i as f64 + 1.0]).collect();
//!
//! let mut model = LearnerKind::default().build();
//! model.fit(&features, &targets).unwrap();
//! let pred = model.predict(&[vec![7.0]]).unwrap();
//! assert!((pred[0][0] - 8.0).abs() < 1e-9);
//! ```

mod traits;

pub mod knn;
pub mod ridge;

pub use knn::KnnRegressor;
pub use ridge::RidgeRegressor;
pub use traits::{BoxedLearner, Learner};

/// Learner family and hyperparameters shared by every configuration of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LearnerKind {
    /// Nearest-neighbor average on standardized lags.
    Knn { k: usize },
    /// Ridge regression with penalty `alpha`.
    Ridge { alpha: f64 },
}

impl Default for LearnerKind {
    fn default() -> Self {
        LearnerKind::Knn { k: 5 }
    }
}

impl LearnerKind {
    /// Fresh, unfitted learner.
    pub fn build(&self) -> BoxedLearner {
        match *self {
            LearnerKind::Knn { k } => Box::new(KnnRegressor::new(k)),
            LearnerKind::Ridge { alpha } => Box::new(RidgeRegressor::new(alpha)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LearnerKind::Knn { .. } => "KNN",
            LearnerKind::Ridge { .. } => "Ridge",
        }
    }
}
