#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Temporal alignment and merge engine for daily price tables.
//!
//! This crate enriches a daily price table with quarterly financial
//! statement fields and same-day technical indicators:
//!
//! - [`quarter`] maps a (calendar year, fiscal period) pair to its date
//!   interval.
//! - [`temporal`] joins quarterly records onto daily rows by interval
//!   containment, first-match-wins.
//! - [`daily`] joins same-granularity tables by exact (symbol, date) match.
//! - [`orchestrator`] folds an ordered sequence of sources onto the base
//!   table under the [`CollisionPolicy::OverwriteOnCoverage`] policy.
//! - [`coverage`] reports, per source, the fraction of rows that received
//!   at least one value.
//!
//! # Example
//!
//! ```
//! use polars::prelude::*;
//! use ronda_merge::{MergeOrchestrator, MergeSource};
//! use ronda_traits::{Date, MarketTable, days_from_date};
//!
//! # fn main() -> ronda_traits::Result<()> {
//! let day = days_from_date(Date::from_ymd_opt(2023, 2, 15).unwrap());
//! let base = MarketTable::new(DataFrame::new(vec![
//!     Series::new("symbol".into(), vec!["X"]).into_column(),
//!     Series::new("date".into(), vec![day]).cast(&DataType::Date)?.into_column(),
//! ])?);
//! let growth = df! {
//!     "symbol" => &["X"],
//!     "calendarYear" => &[2023i32],
//!     "period" => &["Q1"],
//!     "revenueGrowth" => &[0.05],
//! }?;
//!
//! let outcome = MergeOrchestrator::default()
//!     .merge(base, vec![MergeSource::quarterly("financialGrowth", growth)])?;
//! assert_eq!(outcome.coverage[0].covered, 1);
//! # Ok(())
//! # }
//! ```

/// The version of the ronda-merge crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod copy;
pub mod coverage;
pub mod daily;
pub mod orchestrator;
pub mod quarter;
pub mod temporal;

pub use coverage::{CoverageSummary, coverage};
pub use daily::{DAILY_KEY_COLUMNS, DailyJoinStats, join_daily};
pub use orchestrator::{CollisionPolicy, MergeOrchestrator, MergeOutcome, MergeSource};
pub use quarter::{FiscalPeriod, quarter_range};
pub use temporal::{QUARTERLY_KEY_COLUMNS, QuarterlyJoinStats, join_quarterly};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }
}
