//! Error types for the ts-landmarks library.

use thiserror::Error;

/// Result type alias for landmark operations.
pub type Result<T> = std::result::Result<T, LandmarkError>;

/// Errors that can occur while characterizing a series.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LandmarkError {
    /// Frequency code not present in the calendar table.
    #[error("unsupported frequency: {0}")]
    UnsupportedFrequency(String),

    /// Series or partition too short for the requested lag/horizon.
    #[error("insufficient history: need at least {needed}, got {got}")]
    InsufficientHistory { needed: usize, got: usize },

    /// Transform applied outside its valid domain.
    #[error("transform domain error: {0}")]
    TransformDomain(String),

    /// Numerical failure while fitting or predicting.
    #[error("computation error: {0}")]
    Computation(String),

    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Timestamp-related error.
    #[error("timestamp error: {0}")]
    TimestampError(String),
}

impl LandmarkError {
    /// Whether a landmark experiment hitting this error is skipped locally
    /// instead of aborting the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InsufficientHistory { .. }
                | Self::TransformDomain(_)
                | Self::Computation(_)
                | Self::DimensionMismatch { .. }
                | Self::EmptyData
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = LandmarkError::UnsupportedFrequency("X".to_string());
        assert_eq!(err.to_string(), "unsupported frequency: X");

        let err = LandmarkError::InsufficientHistory { needed: 10, got: 5 };
        assert_eq!(
            err.to_string(),
            "insufficient history: need at least 10, got 5"
        );

        let err = LandmarkError::TransformDomain("non-positive value".to_string());
        assert_eq!(err.to_string(), "transform domain error: non-positive value");

        let err = LandmarkError::DimensionMismatch {
            expected: 3,
            got: 2,
        };
        assert_eq!(err.to_string(), "dimension mismatch: expected 3, got 2");
    }

    #[test]
    fn recoverable_classification() {
        assert!(LandmarkError::InsufficientHistory { needed: 1, got: 0 }.is_recoverable());
        assert!(LandmarkError::TransformDomain(String::new()).is_recoverable());
        assert!(LandmarkError::Computation(String::new()).is_recoverable());
        assert!(!LandmarkError::UnsupportedFrequency("Z".into()).is_recoverable());
        assert!(!LandmarkError::InvalidParameter("alpha".into()).is_recoverable());
    }

    #[test]
    fn errors_are_clonable_and_comparable() {
        let err1 = LandmarkError::EmptyData;
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
