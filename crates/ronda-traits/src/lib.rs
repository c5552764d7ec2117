#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Foundation types for the ronda data-merge toolkit.
//!
//! This crate provides the shared vocabulary used by the merge engine and
//! its collaborators: the error taxonomy, table wrappers, and date
//! conversions between chrono and the Polars `Date` dtype.

/// The version of the ronda-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod types;

// Re-exports
pub use error::{Result, RondaError};
pub use types::{Date, MarketTable, SourceKind, Symbol, date_from_days, days_from_date};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }
}
