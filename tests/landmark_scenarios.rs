//! End-to-end scenarios for the trend, seasonality and change dimensions.

use std::f64::consts::PI;

use chrono::{Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ts_landmarks::analysis::{profile, ProfileConfig};
use ts_landmarks::changepoint::{detect, DetectorConfig};
use ts_landmarks::core::{FrequencyProfile, TimeSeries};
use ts_landmarks::detection::analyze;
use ts_landmarks::landmark::{run, ConfigurationGrid, Dimension, LandmarkConfig};

fn make_ts(values: Vec<f64>, step: Duration) -> TimeSeries {
    let start = Utc.with_ymd_and_hms(2015, 1, 1, 0, 0, 0).unwrap();
    TimeSeries::regular(start, step, values).unwrap()
}

fn monthly(values: Vec<f64>) -> TimeSeries {
    let timestamps = (0..values.len() as u32)
        .map(|i| {
            Utc.with_ymd_and_hms(2000 + (i / 12) as i32, i % 12 + 1, 1, 0, 0, 0)
                .unwrap()
        })
        .collect();
    TimeSeries::new(timestamps, values).unwrap()
}

fn trend_series() -> Vec<f64> {
    (0..200).map(|i| 10.0 + 0.5 * i as f64).collect()
}

fn seasonal_series() -> Vec<f64> {
    (0..240)
        .map(|i| {
            let t = i as f64;
            50.0 + 0.05 * t + 10.0 * (2.0 * PI * t / 12.0).sin()
        })
        .collect()
}

fn step_series(seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..200)
        .map(|i| {
            let level = if i < 100 { 0.0 } else { 10.0 };
            level + rng.gen_range(-0.1..0.1)
        })
        .collect()
}

// =============================================================================
// Trend
// =============================================================================

#[test]
fn trend_first_differences_beat_base() {
    let profile = FrequencyProfile::from_code("D").unwrap();
    assert_eq!(profile.horizon, 14);
    assert_eq!(profile.lag_count, 17);

    let outcome = run(
        &ConfigurationGrid::trend(),
        &trend_series(),
        &profile,
        &LandmarkConfig::default(),
    )
    .unwrap();
    let results = outcome.results().expect("trend results");

    let base = results.error("base").unwrap();
    let diff = results.error("first_differences").unwrap();
    assert!(diff < base, "first_differences {} vs base {}", diff, base);
    assert_eq!(results.improves("first_differences"), Some(true));
    assert_ne!(results.best().unwrap().configuration, "base");
}

#[test]
fn trend_holds_with_rolling_windows() {
    let profile = FrequencyProfile::from_code("D").unwrap();
    let config = LandmarkConfig::default().n_windows(2);
    let outcome = run(&ConfigurationGrid::trend(), &trend_series(), &profile, &config).unwrap();
    let results = outcome.results().unwrap();
    assert!(results.error("first_differences").unwrap() < results.base_error());
    assert!(results.results().iter().all(|r| r.folds == 2));
}

// =============================================================================
// Seasonality
// =============================================================================

#[test]
fn seasonality_lag_12_is_significant() {
    let acf = analyze(&seasonal_series(), 36, 0.05).unwrap();
    assert!(acf.is_significant(12));
    assert!(acf.candidate_periods.contains(&12));
    assert!(!acf.candidate_periods.contains(&24));
}

#[test]
fn seasonal_differences_not_worse_than_base() {
    let profile = FrequencyProfile::from_code("M").unwrap();
    assert_eq!(profile.natural_period, Some(12));

    let outcome = run(
        &ConfigurationGrid::seasonality(&[12]),
        &seasonal_series(),
        &profile,
        &LandmarkConfig::default(),
    )
    .unwrap();
    let results = outcome.results().unwrap();
    let base = results.error("base").unwrap();
    let seasonal = results.error("seasonal_differences").unwrap();
    assert!(seasonal <= base, "seasonal_differences {} vs base {}", seasonal, base);
    assert!(results.error("fourier_12").is_some());
}

#[test]
fn seasonal_profile_end_to_end() {
    let report = profile(&monthly(seasonal_series()), "M", None, &ProfileConfig::default()).unwrap();

    assert_eq!(report.seasonal_periods.first(), Some(&12));
    assert!(report.acf.as_ref().unwrap().is_significant(12));
    let seasonality = report.outcome(Dimension::Seasonality).results().unwrap();
    assert!(seasonality.error("seasonal_differences").unwrap() <= seasonality.base_error());
    assert!(report.variance.results().unwrap().error("box_cox").is_some());
}

// =============================================================================
// Change
// =============================================================================

#[test]
fn step_change_is_detected_once() {
    let series = make_ts(step_series(7), Duration::days(1));
    let changes = detect(&series, &DetectorConfig::default()).unwrap();

    assert_eq!(changes.len(), 1, "changes: {:?}", changes);
    let cp = &changes[0];
    assert!((95..=105).contains(&cp.location_index));
    assert!(cp.level_increased);
    assert!(cp.distribution_shift_significant);
    assert_eq!(cp.timestamp, series.timestamp(cp.location_index).unwrap());
}

#[test]
fn step_change_survives_large_offset() {
    for offset in [1e7, 1e8] {
        let values = step_series(7).into_iter().map(|x| x + offset).collect();
        let series = make_ts(values, Duration::days(1));
        let changes = detect(&series, &DetectorConfig::default()).unwrap();

        assert_eq!(changes.len(), 1, "offset {}: {:?}", offset, changes);
        assert!((95..=105).contains(&changes[0].location_index));
        assert!(changes[0].level_increased);
    }
}

#[test]
fn step_change_feeds_change_grid() {
    let series = make_ts(step_series(11), Duration::days(1));
    let report = profile(&series, "D", None, &ProfileConfig::default()).unwrap();

    assert_eq!(report.change_points.len(), 1);
    let change = report.change.results().unwrap();
    assert!(change.error("base").is_some());
    assert!(change.error("level_shift_indicator").is_some());
    assert!(change.error("post_change_window").is_some());
}

#[test]
fn flat_series_reports_no_change() {
    let mut rng = StdRng::seed_from_u64(3);
    let values: Vec<f64> = (0..150).map(|_| 5.0 + rng.gen_range(-0.1..0.1)).collect();
    let changes = detect(&make_ts(values, Duration::hours(1)), &DetectorConfig::default()).unwrap();
    assert!(changes.is_empty());
}

// =============================================================================
// Failure semantics
// =============================================================================

#[test]
fn unsupported_frequency_is_fatal() {
    let series = make_ts(trend_series(), Duration::days(1));
    assert!(profile(&series, "fortnight", None, &ProfileConfig::default()).is_err());
}

#[test]
fn short_series_reports_no_landmark_results() {
    let series = make_ts((0..25).map(|i| i as f64).collect(), Duration::days(1));
    let report = profile(&series, "D", None, &ProfileConfig::default()).unwrap();
    for dimension in Dimension::ALL {
        assert!(report.outcome(dimension).to_map().is_empty());
    }
}
