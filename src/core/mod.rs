//! Core data structures: the input series and the frequency calendar.

mod frequency;
mod time_series;

pub use frequency::{Frequency, FrequencyProfile};
pub use time_series::TimeSeries;
