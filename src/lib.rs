//! # ts-landmarks
//!
//! Structural profiling of univariate time series.
//!
//! Characterizes a series along four dimensions (trend, seasonality,
//! variance, structural change) and measures, per dimension, whether a
//! transform improves short-horizon forecast accuracy of a cheap baseline
//! learner. Built on time-delay embedding, invertible transforms,
//! autocorrelation significance analysis and PELT change-point detection.

// Allow some clippy warnings for cleaner code in specific cases
#![allow(clippy::too_many_arguments)]
#![allow(clippy::type_complexity)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::neg_cmp_op_on_partial_ord)]

pub mod analysis;
pub mod changepoint;
pub mod core;
pub mod detection;
pub mod embedding;
pub mod error;
pub mod landmark;
pub mod models;
pub mod transform;
pub mod utils;
pub mod validation;

pub use error::{LandmarkError, Result};

pub mod prelude {
    pub use crate::analysis::{profile, ProfileConfig, SeriesProfile};
    pub use crate::core::{Frequency, FrequencyProfile, TimeSeries};
    pub use crate::error::{LandmarkError, Result};
    pub use crate::landmark::{
        run, ConfigurationGrid, Dimension, LandmarkConfig, LandmarkOutcome, LandmarkResults,
    };
    pub use crate::models::{Learner, LearnerKind};
}
