//! Error types for the fundus workspace.
//!
//! Configuration violations, malformed input tables and base-model contract
//! breaches all surface through [`FundusError`]. Sparse history is never an
//! error: missing values are absorbed by [`crate::SeriesStats`].

use thiserror::Error;

/// The main error type for fundus operations.
#[derive(Debug, Error)]
pub enum FundusError {
    /// A configuration value is out of its allowed range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error due to invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Error when a required column is missing from the data.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Error when data is insufficient for the requested operation.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Array dimensions disagree.
    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// What the operation required.
        expected: String,
        /// What it received.
        actual: String,
    },

    /// A model was asked for an output convention it does not provide.
    #[error("Unsupported model output: {0}")]
    UnsupportedOutput(String),

    /// A model was used for prediction before being fitted.
    #[error("Model not fitted: {0}")]
    NotFitted(String),

    /// Numerical failure inside a model.
    #[error("Computation failed: {0}")]
    Computation(String),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for FundusError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for FundusError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for fundus operations.
pub type Result<T> = std::result::Result<T, FundusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FundusError::InvalidConfig("min_back_quarter > max_back_quarter".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: min_back_quarter > max_back_quarter"
        );

        let err = FundusError::MissingColumn("revenue".to_string());
        assert_eq!(err.to_string(), "Missing required column: revenue");

        let err = FundusError::ShapeMismatch {
            expected: "4 rows".to_string(),
            actual: "3 rows".to_string(),
        };
        assert_eq!(err.to_string(), "Shape mismatch: expected 4 rows, got 3 rows");
    }

    #[test]
    fn test_error_from_str() {
        let err: FundusError = "boom".into();
        assert!(matches!(err, FundusError::Other(ref s) if s == "boom"));
    }
}
