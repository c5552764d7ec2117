//! CSV loading utilities for the ronda CLI.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use polars::prelude::*;
use ronda_traits::{SourceKind, days_from_date};
use std::fs::File;
use std::path::Path;

/// Read a CSV file into a DataFrame.
pub(crate) fn read_csv(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("failed to open {}", path.display()))?
        .finish()
        .with_context(|| format!("failed to read {}", path.display()))
}

/// Write a DataFrame to a CSV file.
pub(crate) fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Ensure the `date` column has the `Date` dtype, parsing `YYYY-MM-DD`
/// strings when the table came from CSV. Unparsable entries become null and
/// never match a join key.
pub(crate) fn normalize_dates(df: DataFrame) -> Result<DataFrame> {
    let dtype = df
        .column("date")
        .context("table has no date column")?
        .dtype()
        .clone();

    if dtype == DataType::Date {
        return Ok(df);
    }
    if dtype != DataType::String {
        bail!("unsupported dtype for date column: {dtype}");
    }

    let days: Vec<Option<i32>> = df
        .column("date")?
        .as_materialized_series()
        .str()?
        .into_iter()
        .map(|value| {
            value
                .and_then(|text| NaiveDate::parse_from_str(text, "%Y-%m-%d").ok())
                .map(days_from_date)
        })
        .collect();

    let mut df = df;
    df.with_column(Series::new("date".into(), days).cast(&DataType::Date)?)?;
    Ok(df)
}

/// Tell a quarterly source from a daily one by its columns.
pub(crate) fn classify(df: &DataFrame) -> SourceKind {
    let has = |name: &str| df.get_column_names().iter().any(|c| c.as_str() == name);
    if has("calendarYear") && has("period") {
        SourceKind::Quarterly
    } else {
        SourceKind::Daily
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_string_dates() {
        let df = df! {
            "date" => &["2023-02-15", "2023-02-16"],
            "close" => &[34.5, 34.8],
        }
        .unwrap();

        let out = normalize_dates(df).unwrap();
        assert_eq!(out.column("date").unwrap().dtype(), &DataType::Date);
    }

    #[test]
    fn test_normalize_keeps_date_dtype() {
        let df = df! { "date" => &["2023-02-15"] }.unwrap();
        let once = normalize_dates(df).unwrap();
        let twice = normalize_dates(once.clone()).unwrap();
        assert_eq!(once.column("date").unwrap().dtype(), twice.column("date").unwrap().dtype());
    }

    #[test]
    fn test_normalize_requires_date_column() {
        let df = df! { "close" => &[34.5] }.unwrap();
        assert!(normalize_dates(df).is_err());
    }

    #[test]
    fn test_classify_quarterly() {
        let df = df! {
            "symbol" => &["X"],
            "calendarYear" => &[2023i32],
            "period" => &["Q1"],
            "revenueGrowth" => &[0.05],
        }
        .unwrap();
        assert_eq!(classify(&df), SourceKind::Quarterly);
    }

    #[test]
    fn test_classify_daily() {
        let df = df! {
            "symbol" => &["X"],
            "date" => &["2023-02-15"],
            "rsi" => &[55.0],
        }
        .unwrap();
        assert_eq!(classify(&df), SourceKind::Daily);
    }
}
