#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # ronda
//!
//! ronda is an umbrella crate that re-exports all ronda sub-crates for
//! convenience.
//!
//! ## Quick Start
//!
//! ```ignore
//! use ronda::ingest::{DocumentClient, frames};
//! use ronda::merge::{MergeOrchestrator, MergeSource};
//! use ronda::MarketTable;
//!
//! # async fn run(url: &str) -> Result<(), Box<dyn std::error::Error>> {
//! let doc = DocumentClient::new().fetch_document(url).await?;
//! let base = MarketTable::new(frames::price_frame(
//!     doc.price_history.as_ref().unwrap(),
//!     "1101.TW",
//! )?);
//! let (growth, _) = frames::section_frame(&doc, "financialGrowth")?;
//!
//! let outcome = MergeOrchestrator::default()
//!     .merge(base, vec![MergeSource::quarterly("financialGrowth", growth)])?;
//! for summary in &outcome.coverage {
//!     println!("{}: {:.2}%", summary.source, summary.percent());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! 1. **Ingest** fetches the nested document and projects its sections into
//!    DataFrames.
//! 2. **Merge** folds quarterly sources (by quarter-interval containment)
//!    and daily sources (by exact key) onto the base table, in order, under
//!    the overwrite-on-coverage collision policy.
//! 3. **Coverage** reports, per source, the fraction of rows that received
//!    at least one value.

/// Version information for the ronda crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shared types and errors.
pub mod traits {
    pub use ronda_traits::*;
}

/// The temporal alignment and merge engine.
pub mod merge {
    pub use ronda_merge::*;
}

/// Document retrieval and DataFrame projection.
pub mod ingest {
    pub use ronda_ingest::*;
}

// Re-export the common types at top level for convenience
pub use ronda_merge::{
    CollisionPolicy, CoverageSummary, FiscalPeriod, MergeOrchestrator, MergeOutcome, MergeSource,
    quarter_range,
};
pub use ronda_traits::{Date, MarketTable, Result, RondaError, SourceKind, Symbol};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        CollisionPolicy, CoverageSummary, Date, FiscalPeriod, MarketTable, MergeOrchestrator,
        MergeOutcome, MergeSource, Result, RondaError, SourceKind, Symbol,
    };
}
