//! Sampling frequency calendar.
//!
//! Maps a frequency code to the forecast horizon, the number of lags used
//! for embedding, and the natural seasonal period.

use crate::error::{LandmarkError, Result};
use chrono::Duration;
use std::fmt;
use std::str::FromStr;

/// Supported sampling frequencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    Minutely,
    HalfHourly,
    Hourly,
    Daily,
    BusinessDaily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    /// All supported frequencies, finest first.
    pub const ALL: [Frequency; 9] = [
        Frequency::Minutely,
        Frequency::HalfHourly,
        Frequency::Hourly,
        Frequency::Daily,
        Frequency::BusinessDaily,
        Frequency::Weekly,
        Frequency::Monthly,
        Frequency::Quarterly,
        Frequency::Yearly,
    ];

    /// Canonical code for this frequency.
    pub fn code(&self) -> &'static str {
        match self {
            Frequency::Minutely => "T",
            Frequency::HalfHourly => "30T",
            Frequency::Hourly => "H",
            Frequency::Daily => "D",
            Frequency::BusinessDaily => "B",
            Frequency::Weekly => "W",
            Frequency::Monthly => "M",
            Frequency::Quarterly => "Q",
            Frequency::Yearly => "Y",
        }
    }

    /// Calendar profile for this frequency.
    pub fn profile(&self) -> FrequencyProfile {
        let (horizon, lag_count, natural_period) = match self {
            Frequency::Minutely => (60, 75, Some(60)),
            Frequency::HalfHourly => (48, 60, Some(48)),
            Frequency::Hourly => (24, 36, Some(24)),
            Frequency::Daily => (14, 17, Some(7)),
            Frequency::BusinessDaily => (10, 12, Some(5)),
            Frequency::Weekly => (8, 12, Some(52)),
            Frequency::Monthly => (12, 15, Some(12)),
            Frequency::Quarterly => (4, 6, Some(4)),
            Frequency::Yearly => (3, 4, None),
        };
        FrequencyProfile {
            frequency: *self,
            horizon,
            lag_count,
            natural_period,
        }
    }

    /// Map an observed sampling interval to the closest supported frequency.
    ///
    /// Calendar frequencies (month, quarter, year) are matched with a
    /// tolerance of a few days to absorb varying month lengths.
    pub fn from_spacing(spacing: Duration) -> Result<Frequency> {
        let minutes = spacing.num_minutes();
        let days = spacing.num_days();
        let freq = match minutes {
            1 => Frequency::Minutely,
            30 => Frequency::HalfHourly,
            60 => Frequency::Hourly,
            1440 => Frequency::Daily,
            10080 => Frequency::Weekly,
            _ => match days {
                28..=31 => Frequency::Monthly,
                89..=92 => Frequency::Quarterly,
                365 | 366 => Frequency::Yearly,
                _ => {
                    return Err(LandmarkError::UnsupportedFrequency(format!(
                        "spacing of {} seconds",
                        spacing.num_seconds()
                    )))
                }
            },
        };
        Ok(freq)
    }
}

impl FromStr for Frequency {
    type Err = LandmarkError;

    fn from_str(code: &str) -> Result<Self> {
        let freq = match code.trim().to_ascii_uppercase().as_str() {
            "T" | "MIN" | "1MIN" => Frequency::Minutely,
            "30T" | "30MIN" => Frequency::HalfHourly,
            "H" | "1H" => Frequency::Hourly,
            "D" | "1D" => Frequency::Daily,
            "B" => Frequency::BusinessDaily,
            "W" | "W-SUN" | "W-MON" => Frequency::Weekly,
            "M" | "MS" | "ME" => Frequency::Monthly,
            "Q" | "QS" | "QE" => Frequency::Quarterly,
            "Y" | "YS" | "YE" | "A" | "AS" => Frequency::Yearly,
            _ => return Err(LandmarkError::UnsupportedFrequency(code.trim().to_string())),
        };
        Ok(freq)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Horizon, lag count and seasonal period for a sampling frequency.
///
/// Invariant: `horizon >= 1`, `lag_count >= horizon`, and the natural period
/// is either undefined or at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyProfile {
    pub frequency: Frequency,
    pub horizon: usize,
    pub lag_count: usize,
    pub natural_period: Option<usize>,
}

impl FrequencyProfile {
    /// Look up the profile for a frequency code.
    ///
    /// # Example
    /// ```
    /// use ts_landmarks::core::FrequencyProfile;
    ///
    /// let daily = FrequencyProfile::from_code("D").unwrap();
    /// assert_eq!(daily.horizon, 14);
    /// assert_eq!(daily.lag_count, 17);
    /// assert_eq!(daily.natural_period, Some(7));
    ///
    /// assert!(FrequencyProfile::from_code("fortnightly").is_err());
    /// ```
    pub fn from_code(code: &str) -> Result<Self> {
        Ok(code.parse::<Frequency>()?.profile())
    }

    /// Override the natural period with a period known by the caller.
    ///
    /// A period of zero is treated as undefined.
    pub fn with_known_period(mut self, period: usize) -> Self {
        self.natural_period = if period >= 1 { Some(period) } else { None };
        self
    }

    /// Override horizon and lag count, keeping `lag_count >= horizon`.
    pub fn with_horizon(mut self, horizon: usize, lag_count: usize) -> Result<Self> {
        if horizon == 0 {
            return Err(LandmarkError::InvalidParameter(
                "horizon must be at least 1".to_string(),
            ));
        }
        if lag_count < horizon {
            return Err(LandmarkError::InvalidParameter(format!(
                "lag_count ({}) must be >= horizon ({})",
                lag_count, horizon
            )));
        }
        self.horizon = horizon;
        self.lag_count = lag_count;
        Ok(self)
    }
}
