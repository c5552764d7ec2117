//! Error types for the ronda toolkit.
//!
//! This module defines the error taxonomy shared by the merge engine and its
//! collaborators. Per-source problems are surfaced as warnings by the callers;
//! these errors are reserved for conditions that make an operation impossible.

use thiserror::Error;

/// The main error type for ronda operations.
#[derive(Debug, Error)]
pub enum RondaError {
    /// A fiscal period label was not one of `Q1`, `Q2`, `Q3`, `Q4`.
    #[error("Invalid fiscal period label: {0:?}")]
    InvalidPeriod(String),

    /// A date could not be constructed or parsed.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Error due to invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Error when a required column is missing from a table.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for RondaError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for RondaError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for ronda operations.
///
/// This is a convenience type that uses [`RondaError`] as the error type.
pub type Result<T> = std::result::Result<T, RondaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RondaError::InvalidPeriod("q1".to_string());
        assert_eq!(err.to_string(), "Invalid fiscal period label: \"q1\"");

        let err = RondaError::MissingColumn("date".to_string());
        assert_eq!(err.to_string(), "Missing required column: date");
    }

    #[test]
    fn test_error_from_string() {
        let err: RondaError = "merge failed".into();
        assert!(matches!(err, RondaError::Other(_)));
    }

    #[test]
    fn test_result_type() {
        let ok_result: Result<i32> = Ok(42);
        assert!(ok_result.is_ok());

        let err_result: Result<i32> = Err(RondaError::InvalidData("bad".to_string()));
        assert!(err_result.is_err());
    }
}
