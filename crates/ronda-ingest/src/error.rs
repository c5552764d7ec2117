//! Error types for document ingestion.

use thiserror::Error;

/// Errors that can occur when fetching or projecting a financial document.
#[derive(Debug, Error)]
pub enum IngestError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Http {
        /// Response status code.
        status: reqwest::StatusCode,
        /// Response body, for diagnosis.
        body: String,
    },

    /// JSON parsing failed.
    #[error("Failed to parse JSON document: {0}")]
    Json(#[from] serde_json::Error),

    /// The document has no section with the requested name.
    #[error("Section not found in document: {0}")]
    MissingSection(String),

    /// A section is neither a quarterly nor a daily record array.
    #[error("Section has an unrecognized record shape: {0}")]
    InvalidSection(String),

    /// A record carries an unparsable date.
    #[error("Invalid date in document: {0}")]
    InvalidDate(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Filesystem error while reading or writing a document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for ingest operations.
pub type Result<T> = std::result::Result<T, IngestError>;
