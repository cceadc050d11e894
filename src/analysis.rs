//! One-call profiling of a series across all landmark dimensions.
//!
//! Runs the frequency lookup, autocorrelation analysis, change detection and
//! the four landmark grids. Data-shape problems degrade to empty results;
//! only an unknown frequency code or invalid settings are returned as errors.

use tracing::{debug, info_span};

use crate::changepoint::{detect, ChangePoint, DetectorConfig};
use crate::core::{FrequencyProfile, TimeSeries};
use crate::detection::{analyze, AcfResult};
use crate::error::Result;
use crate::landmark::{run, ConfigurationGrid, Dimension, LandmarkConfig, LandmarkOutcome};

/// Settings for [`profile`].
#[derive(Debug, Clone)]
pub struct ProfileConfig {
    pub landmark: LandmarkConfig,
    pub detector: DetectorConfig,
    /// Significance level of the autocorrelation bands.
    pub acf_alpha: f64,
    /// Lags to analyze; derived from the frequency profile when `None`.
    pub max_acf_lags: Option<usize>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            landmark: LandmarkConfig::default(),
            detector: DetectorConfig::default(),
            acf_alpha: 0.05,
            max_acf_lags: None,
        }
    }
}

impl ProfileConfig {
    pub fn landmark(mut self, landmark: LandmarkConfig) -> Self {
        self.landmark = landmark;
        self
    }

    pub fn detector(mut self, detector: DetectorConfig) -> Self {
        self.detector = detector;
        self
    }

    pub fn acf_alpha(mut self, alpha: f64) -> Self {
        self.acf_alpha = alpha;
        self
    }

    pub fn max_acf_lags(mut self, lags: usize) -> Self {
        self.max_acf_lags = Some(lags);
        self
    }
}

/// Everything learned about one series.
#[derive(Debug, Clone)]
pub struct SeriesProfile {
    pub frequency: FrequencyProfile,
    /// `None` when the series is too short for the requested lags.
    pub acf: Option<AcfResult>,
    pub change_points: Vec<ChangePoint>,
    /// Periods used for the seasonality grid, primary first.
    pub seasonal_periods: Vec<usize>,
    pub trend: LandmarkOutcome,
    pub seasonality: LandmarkOutcome,
    pub variance: LandmarkOutcome,
    pub change: LandmarkOutcome,
}

impl SeriesProfile {
    pub fn outcome(&self, dimension: Dimension) -> &LandmarkOutcome {
        match dimension {
            Dimension::Trend => &self.trend,
            Dimension::Seasonality => &self.seasonality,
            Dimension::Variance => &self.variance,
            Dimension::Change => &self.change,
        }
    }
}

/// Profile `series` sampled at `frequency_code`.
///
/// `known_period` overrides the frequency's natural seasonal period.
///
/// # Example
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use ts_landmarks::analysis::{profile, ProfileConfig};
/// use ts_landmarks::core::TimeSeries;
///
/// let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
/// let values: Vec<f64> = (0..200).map(|i| 10.0 + 0.5 * i as f64).collect();
/// let series = TimeSeries::regular(start, Duration::days(1), values).unwrap();
///
/// let report = profile(&series, "D", None, &ProfileConfig::default()).unwrap();
/// let trend = report.trend.results().unwrap();
/// assert_eq!(trend.improves("first_differences"), Some(true));
///
/// assert!(profile(&series, "fortnightly", None, &ProfileConfig::default()).is_err());
/// ```
pub fn profile(
    series: &TimeSeries,
    frequency_code: &str,
    known_period: Option<usize>,
    config: &ProfileConfig,
) -> Result<SeriesProfile> {
    let mut frequency = FrequencyProfile::from_code(frequency_code)?;
    if let Some(p) = known_period {
        frequency = frequency.with_known_period(p);
    }
    config.landmark.validate()?;

    let _span = info_span!("profile", frequency = %frequency.frequency, n = series.len()).entered();
    let values = series.values();

    let n_lags = acf_lags(values.len(), &frequency, config.max_acf_lags);
    let acf = match analyze(values, n_lags, config.acf_alpha) {
        Ok(result) => Some(result),
        Err(e) if e.is_recoverable() => {
            debug!(reason = %e, "autocorrelation analysis skipped");
            None
        }
        Err(e) => return Err(e),
    };

    let change_points = match detect(series, &config.detector) {
        Ok(found) => found,
        Err(e) if e.is_recoverable() => {
            debug!(reason = %e, "change detection skipped");
            Vec::new()
        }
        Err(e) => return Err(e),
    };

    let seasonal_periods = seasonal_periods(&frequency, acf.as_ref(), values.len());
    let locations: Vec<usize> = change_points.iter().map(|c| c.location_index).collect();

    let landmark = &config.landmark;
    Ok(SeriesProfile {
        trend: run(&ConfigurationGrid::trend(), values, &frequency, landmark)?,
        seasonality: run(
            &ConfigurationGrid::seasonality(&seasonal_periods),
            values,
            &frequency,
            landmark,
        )?,
        variance: run(&ConfigurationGrid::variance(), values, &frequency, landmark)?,
        change: run(&ConfigurationGrid::change(&locations), values, &frequency, landmark)?,
        frequency,
        acf,
        change_points,
        seasonal_periods,
    })
}

fn acf_lags(n: usize, frequency: &FrequencyProfile, requested: Option<usize>) -> usize {
    let wanted = requested.unwrap_or_else(|| {
        let seasonal = frequency.natural_period.map(|p| 3 * p).unwrap_or(0);
        frequency.lag_count.max(seasonal)
    });
    wanted.min(n / 2).max(1)
}

/// Known/natural period first, then ACF candidates; each short enough to
/// leave two full cycles.
fn seasonal_periods(frequency: &FrequencyProfile, acf: Option<&AcfResult>, n: usize) -> Vec<usize> {
    let mut periods: Vec<usize> = Vec::new();
    let candidates = frequency
        .natural_period
        .into_iter()
        .chain(acf.into_iter().flat_map(|a| a.candidate_periods.iter().copied()));
    for p in candidates {
        if p >= 2 && 2 * p <= n && !periods.contains(&p) {
            periods.push(p);
        }
    }
    periods
}
