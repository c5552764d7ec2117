//! Common types used throughout the ronda toolkit.
//!
//! This module defines the shared vocabulary for tables and join keys: the
//! [`MarketTable`] DataFrame wrapper, the [`SourceKind`] of a mergeable
//! source, and the date conversions between chrono and the Polars `Date`
//! dtype.

use chrono::Datelike;
use polars::prelude::*;

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A market symbol identifier, e.g. "1101.TW" or "AAPL".
pub type Symbol = String;

/// Days between 0001-01-01 (chrono's common era epoch) and 1970-01-01
/// (the Polars `Date` epoch).
pub const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Convert a Polars `Date` physical value (days since 1970-01-01) to a
/// [`Date`]. Returns `None` for values outside chrono's representable range.
#[must_use]
pub fn date_from_days(days: i32) -> Option<Date> {
    Date::from_num_days_from_ce_opt(days + EPOCH_DAYS_FROM_CE)
}

/// Convert a [`Date`] to the Polars `Date` physical value.
#[must_use]
pub fn days_from_date(date: Date) -> i32 {
    date.num_days_from_ce() - EPOCH_DAYS_FROM_CE
}

/// The temporal granularity of a mergeable source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// One record per (symbol, calendar year, fiscal period).
    Quarterly,
    /// One record per (symbol, date).
    Daily,
}

impl SourceKind {
    /// Human-readable name, used in warnings and reports.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Quarterly => "quarterly",
            Self::Daily => "daily",
        }
    }
}

/// Container for a daily market table.
///
/// `MarketTable` wraps a Polars DataFrame holding one row per (symbol,
/// trading date). It is the base table that quarterly and daily sources are
/// merged onto, and also the shape of the merged result.
///
/// # Expected Schema
///
/// - `symbol`: security identifier (string)
/// - `date`: trading date (`Date` dtype)
/// - OHLCV and price-derived numeric columns
/// - After merging, any columns contributed by merged sources
///
/// # Example
///
/// ```no_run
/// use ronda_traits::MarketTable;
/// use polars::prelude::*;
///
/// let df = df! {
///     "symbol" => &["1101.TW", "1101.TW"],
///     "close" => &[34.5, 34.8],
/// }.unwrap();
///
/// let table = MarketTable::new(df);
/// assert_eq!(table.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MarketTable {
    /// The underlying DataFrame.
    data: DataFrame,
}

impl MarketTable {
    /// Creates a new `MarketTable` from a DataFrame.
    #[must_use]
    pub const fn new(data: DataFrame) -> Self {
        Self { data }
    }

    /// Returns a reference to the underlying DataFrame.
    #[must_use]
    pub const fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Consumes self and returns the underlying DataFrame.
    #[must_use]
    pub fn into_inner(self) -> DataFrame {
        self.data
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.height()
    }

    /// Returns whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the column names.
    #[must_use]
    pub fn columns(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Checks if a column exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.data
            .get_column_names()
            .iter()
            .any(|s| s.as_str() == name)
    }

    /// Gets a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.data.column(name).ok()
    }

    /// Returns the inclusive (min, max) range of the `date` column, or
    /// `None` when the table is empty or has no date column.
    #[must_use]
    pub fn date_range(&self) -> Option<(Date, Date)> {
        let dates = self.data.column("date").ok()?.as_materialized_series();
        let dates = dates.date().ok()?;
        let min = dates.min().and_then(date_from_days)?;
        let max = dates.max().and_then(date_from_days)?;
        Some((min, max))
    }
}

impl From<DataFrame> for MarketTable {
    fn from(data: DataFrame) -> Self {
        Self::new(data)
    }
}

impl AsRef<DataFrame> for MarketTable {
    fn as_ref(&self) -> &DataFrame {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_roundtrip() {
        let date = Date::from_ymd_opt(2023, 2, 15).unwrap();
        let days = days_from_date(date);
        assert_eq!(date_from_days(days), Some(date));
    }

    #[test]
    fn test_unix_epoch_is_day_zero() {
        assert_eq!(days_from_date(Date::from_ymd_opt(1970, 1, 1).unwrap()), 0);
        assert_eq!(
            date_from_days(0),
            Some(Date::from_ymd_opt(1970, 1, 1).unwrap())
        );
    }

    #[test]
    fn test_source_kind_names() {
        assert_eq!(SourceKind::Quarterly.as_str(), "quarterly");
        assert_eq!(SourceKind::Daily.as_str(), "daily");
    }

    #[test]
    fn test_market_table_new() {
        let table = MarketTable::new(DataFrame::default());
        assert!(table.is_empty());
    }

    #[test]
    fn test_market_table_columns() {
        let df = df! {
            "symbol" => &["1101.TW"],
            "close" => &[34.5],
            "volume" => &[1_000_000i64],
        }
        .unwrap();

        let table = MarketTable::new(df);
        let columns = table.columns();
        assert_eq!(columns.len(), 3);
        assert!(table.has_column("close"));
        assert!(!table.has_column("open"));
    }

    #[test]
    fn test_market_table_date_range() {
        let days: Vec<i32> = [(2023, 1, 3), (2023, 1, 4), (2023, 1, 5)]
            .iter()
            .map(|&(y, m, d)| days_from_date(Date::from_ymd_opt(y, m, d).unwrap()))
            .collect();
        let dates = Series::new("date".into(), days)
            .cast(&DataType::Date)
            .unwrap();
        let df = DataFrame::new(vec![
            dates.into_column(),
            Series::new("symbol".into(), vec!["X", "X", "X"]).into_column(),
        ])
        .unwrap();

        let table = MarketTable::new(df);
        let (min, max) = table.date_range().unwrap();
        assert_eq!(min, Date::from_ymd_opt(2023, 1, 3).unwrap());
        assert_eq!(max, Date::from_ymd_opt(2023, 1, 5).unwrap());
    }

    #[test]
    fn test_market_table_into_inner() {
        let df = df! { "close" => &[150.0] }.unwrap();
        let table = MarketTable::new(df);
        assert_eq!(table.into_inner().height(), 1);
    }
}
