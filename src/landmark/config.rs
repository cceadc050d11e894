//! Landmark configurations and per-dimension grids.

use std::f64::consts::PI;
use std::fmt;

use crate::embedding::validate_fraction;
use crate::error::{LandmarkError, Result};
use crate::models::LearnerKind;
use crate::transform::TransformKind;

/// Structural characteristic probed by a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    Trend,
    Seasonality,
    Variance,
    Change,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Trend,
        Dimension::Seasonality,
        Dimension::Variance,
        Dimension::Change,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Trend => "trend",
            Dimension::Seasonality => "seasonality",
            Dimension::Variance => "variance",
            Dimension::Change => "change",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One landmark experiment: a transform and/or derived feature columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Configuration {
    /// Raw lags, no transform.
    Base,
    /// First differencing; the oldest lag column is dropped.
    FirstDifferences,
    /// Raw lags plus the origin index as a feature.
    TimeIndex,
    /// Differencing at the seasonal period.
    SeasonalDifferences { period: usize },
    /// Raw lags plus `harmonics` sine/cosine pairs of the period.
    FourierTerms { period: usize, harmonics: usize },
    /// Signed `log1p` transform.
    Log,
    /// Box-Cox with lambda estimated on the training prefix.
    BoxCox,
    /// Raw lags plus a 0/1 indicator of being past the change point.
    LevelShiftIndicator { at: usize },
    /// Train only on rows whose lag window starts at or after the change point.
    PostChangeWindow { at: usize },
}

impl Configuration {
    /// Stable name used as the result key.
    pub fn name(&self) -> String {
        match self {
            Configuration::Base => "base".to_string(),
            Configuration::FirstDifferences => "first_differences".to_string(),
            Configuration::TimeIndex => "time_index".to_string(),
            Configuration::SeasonalDifferences { .. } => "seasonal_differences".to_string(),
            Configuration::FourierTerms { period, .. } => format!("fourier_{}", period),
            Configuration::Log => "log".to_string(),
            Configuration::BoxCox => "box_cox".to_string(),
            Configuration::LevelShiftIndicator { .. } => "level_shift_indicator".to_string(),
            Configuration::PostChangeWindow { .. } => "post_change_window".to_string(),
        }
    }

    pub fn is_base(&self) -> bool {
        matches!(self, Configuration::Base)
    }

    /// Transform applied to the raw series, if any.
    pub fn transform(&self) -> Option<TransformKind> {
        match *self {
            Configuration::FirstDifferences => Some(TransformKind::FirstDifference),
            Configuration::SeasonalDifferences { period } => {
                Some(TransformKind::SeasonalDifference(period))
            }
            Configuration::Log => Some(TransformKind::Log),
            Configuration::BoxCox => Some(TransformKind::BoxCox),
            _ => None,
        }
    }

    /// Lag columns used for a profile lag count.
    pub fn effective_lags(&self, lag_count: usize) -> usize {
        match self {
            Configuration::FirstDifferences => lag_count.saturating_sub(1).max(1),
            _ => lag_count,
        }
    }

    /// Names of the derived columns appended after the lags.
    pub fn derived_columns(&self) -> Vec<String> {
        match *self {
            Configuration::TimeIndex => vec!["time_index".to_string()],
            Configuration::FourierTerms { period, harmonics } => (1..=harmonics)
                .flat_map(|k| {
                    [
                        format!("sin_{}_{}", period, k),
                        format!("cos_{}_{}", period, k),
                    ]
                })
                .collect(),
            Configuration::LevelShiftIndicator { .. } => vec!["level_shift".to_string()],
            _ => Vec::new(),
        }
    }

    /// Derived feature values for a row anchored at `origin`.
    pub fn derived_values(&self, origin: usize) -> Vec<f64> {
        match *self {
            Configuration::TimeIndex => vec![origin as f64],
            Configuration::FourierTerms { period, harmonics } => (1..=harmonics)
                .flat_map(|k| {
                    let angle = 2.0 * PI * k as f64 * origin as f64 / period as f64;
                    [angle.sin(), angle.cos()]
                })
                .collect(),
            Configuration::LevelShiftIndicator { at } => {
                vec![if origin >= at { 1.0 } else { 0.0 }]
            }
            _ => Vec::new(),
        }
    }

    /// Whether a row at `origin` may be used for training.
    pub fn accepts_training_origin(&self, origin: usize, n_lags: usize) -> bool {
        match *self {
            Configuration::PostChangeWindow { at } => origin + 1 >= at + n_lags,
            _ => true,
        }
    }

    /// Reject parameters that cannot describe a valid experiment.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Configuration::SeasonalDifferences { period } if period < 2 => {
                Err(LandmarkError::InvalidParameter(format!(
                    "seasonal period must be at least 2, got {}",
                    period
                )))
            }
            Configuration::FourierTerms { period, harmonics } if period < 2 || harmonics == 0 => {
                Err(LandmarkError::InvalidParameter(format!(
                    "Fourier terms need period >= 2 and harmonics >= 1, got {} and {}",
                    period, harmonics
                )))
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Named configurations evaluated together for one dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationGrid {
    dimension: Dimension,
    configurations: Vec<Configuration>,
}

impl ConfigurationGrid {
    /// Grid for a dimension from explicit configurations.
    ///
    /// `base` is inserted first if missing; later duplicates of a name are
    /// dropped.
    pub fn custom(dimension: Dimension, configurations: Vec<Configuration>) -> Self {
        let mut unique: Vec<Configuration> = vec![Configuration::Base];
        for cfg in configurations {
            if !unique.iter().any(|u| u.name() == cfg.name()) {
                unique.push(cfg);
            }
        }
        Self {
            dimension,
            configurations: unique,
        }
    }

    /// base, first_differences, time_index.
    pub fn trend() -> Self {
        Self::custom(
            Dimension::Trend,
            vec![Configuration::FirstDifferences, Configuration::TimeIndex],
        )
    }

    /// base, seasonal differences at the first period, Fourier terms per period.
    ///
    /// Periods below 2 are ignored; with no usable period only `base` remains.
    ///
    /// # Example
    /// ```
    /// use ts_landmarks::landmark::ConfigurationGrid;
    ///
    /// let grid = ConfigurationGrid::seasonality(&[12, 6]);
    /// assert_eq!(
    ///     grid.names(),
    ///     vec!["base", "seasonal_differences", "fourier_12", "fourier_6"]
    /// );
    /// ```
    pub fn seasonality(periods: &[usize]) -> Self {
        let mut usable: Vec<usize> = Vec::new();
        for &p in periods {
            if p >= 2 && !usable.contains(&p) {
                usable.push(p);
            }
        }
        let mut configurations = Vec::new();
        if let Some(&primary) = usable.first() {
            configurations.push(Configuration::SeasonalDifferences { period: primary });
        }
        configurations.extend(usable.iter().map(|&period| Configuration::FourierTerms {
            period,
            harmonics: 2.min(period / 2).max(1),
        }));
        Self::custom(Dimension::Seasonality, configurations)
    }

    /// base, log, box_cox.
    pub fn variance() -> Self {
        Self::custom(
            Dimension::Variance,
            vec![Configuration::Log, Configuration::BoxCox],
        )
    }

    /// base plus indicator and post-change window at the first change point.
    pub fn change(change_points: &[usize]) -> Self {
        let configurations = match change_points.iter().copied().filter(|&c| c > 0).min() {
            Some(at) => vec![
                Configuration::LevelShiftIndicator { at },
                Configuration::PostChangeWindow { at },
            ],
            None => Vec::new(),
        };
        Self::custom(Dimension::Change, configurations)
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn configurations(&self) -> &[Configuration] {
        &self.configurations
    }

    pub fn names(&self) -> Vec<String> {
        self.configurations.iter().map(|c| c.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }
}

/// Evaluation settings shared by every dimension of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkConfig {
    /// Fraction of embeddable origins held out per window.
    pub test_fraction: f64,
    /// Number of rolling-origin windows.
    pub n_windows: usize,
    pub learner: LearnerKind,
}

impl Default for LandmarkConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            n_windows: 1,
            learner: LearnerKind::default(),
        }
    }
}

impl LandmarkConfig {
    pub fn test_fraction(mut self, fraction: f64) -> Self {
        self.test_fraction = fraction;
        self
    }

    pub fn n_windows(mut self, n: usize) -> Self {
        self.n_windows = n;
        self
    }

    pub fn learner(mut self, learner: LearnerKind) -> Self {
        self.learner = learner;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_fraction(self.test_fraction)?;
        if self.n_windows == 0 {
            return Err(LandmarkError::InvalidParameter(
                "n_windows must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
