//! Landmark evaluation loop.
//!
//! For every configuration of a grid: transform the raw series, re-embed,
//! fit a fresh learner per fold, forecast the held-out origins, map the
//! forecasts back to the original scale and score them with SMAPE.

use tracing::{debug, warn};

use super::config::{Configuration, ConfigurationGrid, LandmarkConfig};
use super::results::{ExperimentResult, LandmarkOutcome, LandmarkResults};
use crate::core::FrequencyProfile;
use crate::embedding::{embed, rolling_origin_folds, EvaluationFold};
use crate::error::{LandmarkError, Result};
use crate::models::LearnerKind;
use crate::utils::metrics::smape_rows;

/// Evaluate every configuration of `grid` on `series`.
///
/// Configurations that fail for data-shape or numerical reasons are skipped.
/// If `base` cannot be scored the outcome is [`LandmarkOutcome::NoResults`].
/// Only invalid caller input is returned as an error.
///
/// # Example
/// ```
/// use ts_landmarks::core::FrequencyProfile;
/// use ts_landmarks::landmark::{run, ConfigurationGrid, LandmarkConfig};
///
/// let series: Vec<f64> = (0..200).map(|i| 10.0 + 0.5 * i as f64).collect();
/// let profile = FrequencyProfile::from_code("D").unwrap();
///
/// let outcome = run(&ConfigurationGrid::trend(), &series, &profile, &LandmarkConfig::default()).unwrap();
/// let results = outcome.results().unwrap();
/// assert_eq!(results.improves("first_differences"), Some(true));
/// ```
#[tracing::instrument(skip_all, fields(dimension = %grid.dimension(), n = series.len()))]
pub fn run(
    grid: &ConfigurationGrid,
    series: &[f64],
    profile: &FrequencyProfile,
    config: &LandmarkConfig,
) -> Result<LandmarkOutcome> {
    config.validate()?;
    for cfg in grid.configurations() {
        cfg.validate()?;
    }
    if series.iter().any(|v| !v.is_finite()) {
        return Err(LandmarkError::InvalidParameter(
            "series must be finite".to_string(),
        ));
    }

    let no_results = LandmarkOutcome::NoResults {
        dimension: grid.dimension(),
    };

    let folds = match rolling_origin_folds(
        series.len(),
        profile.lag_count,
        profile.horizon,
        config.test_fraction,
        config.n_windows,
    ) {
        Ok(folds) => folds,
        Err(e) if e.is_recoverable() => {
            warn!(reason = %e, "series too short for any fold");
            return Ok(no_results);
        }
        Err(e) => return Err(e),
    };

    let mut scored = Vec::with_capacity(grid.len());
    for cfg in grid.configurations() {
        match evaluate_configuration(cfg, series, profile, &folds, config.learner) {
            Ok(error) => {
                debug!(configuration = %cfg, error, folds = folds.len(), "scored");
                scored.push(ExperimentResult {
                    dimension: grid.dimension(),
                    configuration: cfg.name(),
                    error,
                    folds: folds.len(),
                });
            }
            Err(e) if e.is_recoverable() => {
                debug!(configuration = %cfg, reason = %e, "skipped");
            }
            Err(e) => return Err(e),
        }
    }

    match LandmarkResults::new(grid.dimension(), scored) {
        Some(results) => {
            if let Some(best) = results.best() {
                debug!(configuration = %best.configuration, error = best.error, "best configuration");
            }
            Ok(LandmarkOutcome::Scored(results))
        }
        None => {
            warn!("baseline could not be scored");
            Ok(no_results)
        }
    }
}

/// Mean SMAPE of one configuration over all folds.
pub fn evaluate_configuration(
    cfg: &Configuration,
    series: &[f64],
    profile: &FrequencyProfile,
    folds: &[EvaluationFold],
    learner: LearnerKind,
) -> Result<f64> {
    if folds.is_empty() {
        return Err(LandmarkError::EmptyData);
    }
    let errors = folds
        .iter()
        .map(|fold| evaluate_fold(cfg, series, profile, fold, learner))
        .collect::<Result<Vec<f64>>>()?;
    Ok(errors.iter().sum::<f64>() / errors.len() as f64)
}

fn evaluate_fold(
    cfg: &Configuration,
    series: &[f64],
    profile: &FrequencyProfile,
    fold: &EvaluationFold,
    learner: LearnerKind,
) -> Result<f64> {
    let horizon = profile.horizon;
    let n_lags = cfg.effective_lags(profile.lag_count);
    if fold.test.end + horizon > series.len() {
        return Err(LandmarkError::InsufficientHistory {
            needed: fold.test.end + horizon,
            got: series.len(),
        });
    }

    // Parameters may only see what is observed at the first test origin
    let observed = &series[..=fold.cutoff()];
    let (working, state, dropped) = match cfg.transform() {
        Some(kind) => {
            let (transformed, state) = kind.forward_fitted(series, observed)?;
            (transformed, Some(state), kind.dropped_observations())
        }
        None => (series.to_vec(), None, 0),
    };

    let mut dataset = embed(&working, n_lags, horizon, true)?.with_index_offset(dropped);
    let derived = cfg.derived_columns();
    if !derived.is_empty() {
        let rows: Vec<Vec<f64>> = dataset
            .origins()
            .iter()
            .map(|&t| cfg.derived_values(t))
            .collect();
        for (j, name) in derived.into_iter().enumerate() {
            dataset.append_feature(name, rows.iter().map(|r| r[j]).collect())?;
        }
    }

    let train = dataset.filter_origins(|t| {
        fold.train.contains(&t) && cfg.accepts_training_origin(t, n_lags)
    });
    let test = dataset.filter_origins(|t| fold.test.contains(&t));
    if train.is_empty() {
        return Err(LandmarkError::InsufficientHistory {
            needed: 1,
            got: 0,
        });
    }
    if test.len() != fold.n_test() {
        return Err(LandmarkError::InsufficientHistory {
            needed: fold.n_test(),
            got: test.len(),
        });
    }

    let mut model = learner.build();
    model.fit(train.features(), train.targets())?;
    let predictions = model.predict(test.features())?;
    let predictions = match &state {
        Some(state) => state.inverse_rows(&predictions, test.origins(), series)?,
        None => predictions,
    };

    let actual: Vec<Vec<f64>> = test
        .origins()
        .iter()
        .map(|&t| series[t + 1..=t + horizon].to_vec())
        .collect();
    smape_rows(&actual, &predictions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::config::Dimension;

    fn daily() -> FrequencyProfile {
        FrequencyProfile::from_code("D").unwrap()
    }

    fn trend(n: usize) -> Vec<f64> {
        (0..n).map(|i| 10.0 + 0.5 * i as f64).collect()
    }

    #[test]
    fn trend_grid_scores_every_configuration() {
        let outcome = run(&ConfigurationGrid::trend(), &trend(200), &daily(), &LandmarkConfig::default()).unwrap();
        let results = outcome.results().unwrap();
        assert_eq!(results.len(), 3);
        assert!(results.error("first_differences").unwrap() < 1e-9);
        assert!(results.base_error() > 0.0);
    }

    #[test]
    fn short_series_has_no_results() {
        let outcome = run(&ConfigurationGrid::trend(), &trend(20), &daily(), &LandmarkConfig::default()).unwrap();
        assert_eq!(
            outcome,
            LandmarkOutcome::NoResults {
                dimension: Dimension::Trend
            }
        );
    }

    #[test]
    fn box_cox_skipped_on_non_positive_series() {
        let series: Vec<f64> = (0..150).map(|i| (i as f64 * 0.3).sin() * 5.0).collect();
        let outcome = run(&ConfigurationGrid::variance(), &series, &daily(), &LandmarkConfig::default()).unwrap();
        let results = outcome.results().unwrap();
        assert!(results.error("base").is_some());
        assert!(results.error("log").is_some());
        assert!(results.error("box_cox").is_none());
    }

    #[test]
    fn seasonal_period_too_long_is_skipped() {
        let series: Vec<f64> = (0..120).map(|i| (i % 7) as f64 + 1.0).collect();
        let grid = ConfigurationGrid::seasonality(&[100, 7]);
        let outcome = run(&grid, &series, &daily(), &LandmarkConfig::default()).unwrap();
        let results = outcome.results().unwrap();
        // differencing at 100 leaves 20 points, fewer than one embedded row needs
        assert!(results.error("seasonal_differences").is_none());
        assert!(results.error("fourier_100").is_some());
        assert!(results.error("fourier_7").is_some());
    }

    #[test]
    fn multiple_windows_are_averaged() {
        let config = LandmarkConfig::default().n_windows(3);
        let outcome = run(&ConfigurationGrid::trend(), &trend(300), &daily(), &config).unwrap();
        let results = outcome.results().unwrap();
        assert!(results.results().iter().all(|r| r.folds == 3));
    }

    #[test]
    fn ridge_learner_runs() {
        let config = LandmarkConfig::default().learner(LearnerKind::Ridge { alpha: 1e-3 });
        let outcome = run(&ConfigurationGrid::trend(), &trend(200), &daily(), &config).unwrap();
        assert!(outcome.is_scored());
    }

    #[test]
    fn invalid_caller_input_propagates() {
        let bad = LandmarkConfig::default().test_fraction(0.0);
        assert!(run(&ConfigurationGrid::trend(), &trend(200), &daily(), &bad).is_err());

        let grid = ConfigurationGrid::custom(
            Dimension::Seasonality,
            vec![Configuration::SeasonalDifferences { period: 1 }],
        );
        assert!(matches!(
            run(&grid, &trend(200), &daily(), &LandmarkConfig::default()),
            Err(LandmarkError::InvalidParameter(_))
        ));
    }

    #[test]
    fn evaluate_configuration_on_shared_folds() {
        let series = trend(200);
        let folds = rolling_origin_folds(200, 17, 14, 0.2, 1).unwrap();
        let base = evaluate_configuration(&Configuration::Base, &series, &daily(), &folds, LearnerKind::default());
        let diff = evaluate_configuration(
            &Configuration::FirstDifferences,
            &series,
            &daily(),
            &folds,
            LearnerKind::default(),
        );
        assert!(base.is_ok() && diff.is_ok());
    }
}
