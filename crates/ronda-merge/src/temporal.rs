//! Temporal join engine: quarterly records onto a daily base table.
//!
//! For every base row, finds the quarterly record of the same symbol whose
//! calendar-quarter interval contains the row's date and copies that
//! record's non-key fields across.

use polars::prelude::*;
use ronda_traits::{Date, Result, date_from_days};
use std::collections::{HashMap, HashSet};

use crate::copy::overwrite_on_coverage;
use crate::quarter::{FiscalPeriod, quarter_range};

/// Key columns of a quarterly source; never copied onto the base table.
///
/// `date` is the filing date of the record, not a join key proper, but
/// copying it would clobber the base table's trading-date column.
pub const QUARTERLY_KEY_COLUMNS: &[&str] = &["date", "symbol", "calendarYear", "period"];

/// Diagnostics from one quarterly join.
#[derive(Debug, Clone)]
pub struct QuarterlyJoinStats {
    /// Names of the columns written onto the base table.
    pub fields: Vec<String>,
    /// Number of base rows that matched a quarterly record.
    pub matched_rows: usize,
    /// Number of records sharing a (symbol, calendarYear, period) key with
    /// an earlier record. The earlier record wins for every contained date.
    pub duplicate_keys: usize,
    /// Records excluded because their period label failed to resolve,
    /// formatted as "symbol year label".
    pub invalid_periods: Vec<String>,
}

/// A quarterly record's resolved interval, in source row order.
struct Span {
    start: Date,
    end: Date,
    row: usize,
}

/// Left-join a quarterly source onto the base table by interval containment.
///
/// The base table needs `symbol` (string) and `date` (`Date` dtype) columns;
/// the source needs `symbol`, `calendarYear`, and `period`. Records are
/// scanned per symbol in their given order and the FIRST record whose
/// quarter contains the row's date wins; if a source violates the
/// one-record-per-(symbol, year, period) invariant the outcome is
/// order-dependent and deliberately left at first-match-wins rather than
/// any "most recent" guess. Such duplicates are counted in
/// [`QuarterlyJoinStats::duplicate_keys`].
///
/// Records with an unresolvable period label are reported in the stats and
/// treated as non-matching for all dates; they never abort the join. Rows
/// whose date falls in no interval, and symbols absent from the source,
/// keep all source fields missing.
///
/// # Errors
///
/// Returns an error when either table is missing its key columns or the
/// base `date` column is not the `Date` dtype.
pub fn join_quarterly(
    base: &DataFrame,
    source: &DataFrame,
) -> Result<(DataFrame, QuarterlyJoinStats)> {
    let base_symbols = base.column("symbol")?.as_materialized_series().str()?;
    let base_dates: Vec<Option<Date>> = base
        .column("date")?
        .as_materialized_series()
        .date()?
        .into_iter()
        .map(|d: Option<i32>| d.and_then(date_from_days))
        .collect();

    let source_symbols = source.column("symbol")?.as_materialized_series().str()?;
    let years = source
        .column("calendarYear")?
        .as_materialized_series()
        .cast(&DataType::Int32)?;
    let years = years.i32()?;
    let periods = source.column("period")?.as_materialized_series().str()?;

    // Partition the source by symbol, preserving row order within each
    // partition so that first-match-wins is well defined.
    let mut spans: HashMap<&str, Vec<Span>> = HashMap::new();
    let mut seen: HashSet<(&str, i32, &str)> = HashSet::new();
    let mut duplicate_keys = 0;
    let mut invalid_periods = Vec::new();
    for row in 0..source.height() {
        let (Some(symbol), Some(year), Some(label)) =
            (source_symbols.get(row), years.get(row), periods.get(row))
        else {
            continue;
        };
        match FiscalPeriod::parse(label).and_then(|p| quarter_range(year, p)) {
            Ok((start, end)) => {
                if !seen.insert((symbol, year, label)) {
                    duplicate_keys += 1;
                }
                spans
                    .entry(symbol)
                    .or_default()
                    .push(Span { start, end, row });
            }
            Err(_) => invalid_periods.push(format!("{symbol} {year} {label}")),
        }
    }

    let mut matches: Vec<Option<usize>> = vec![None; base.height()];
    for (slot, (symbol, date)) in matches
        .iter_mut()
        .zip(base_symbols.into_iter().zip(base_dates))
    {
        let (Some(symbol), Some(date)) = (symbol, date) else {
            continue;
        };
        let Some(candidates) = spans.get(symbol) else {
            continue;
        };
        for span in candidates {
            if span.start <= date && date <= span.end {
                *slot = Some(span.row);
                break;
            }
        }
    }

    let matched_rows = matches.iter().filter(|m| m.is_some()).count();
    let (out, fields) = overwrite_on_coverage(base, source, &matches, QUARTERLY_KEY_COLUMNS)?;

    Ok((
        out,
        QuarterlyJoinStats {
            fields,
            matched_rows,
            duplicate_keys,
            invalid_periods,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ronda_traits::days_from_date;

    fn base_table(rows: &[(&str, (i32, u32, u32))]) -> DataFrame {
        let symbols: Vec<&str> = rows.iter().map(|(s, _)| *s).collect();
        let days: Vec<i32> = rows
            .iter()
            .map(|&(_, (y, m, d))| days_from_date(Date::from_ymd_opt(y, m, d).unwrap()))
            .collect();
        let dates = Series::new("date".into(), days)
            .cast(&DataType::Date)
            .unwrap();
        DataFrame::new(vec![
            Series::new("symbol".into(), symbols).into_column(),
            dates.into_column(),
        ])
        .unwrap()
    }

    fn column_values(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
        df.column(name)
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .collect()
    }

    #[test]
    fn test_row_inside_quarter_gets_record() {
        let base = base_table(&[("X", (2023, 2, 15))]);
        let source = df! {
            "symbol" => &["X"],
            "calendarYear" => &[2023i32],
            "period" => &["Q1"],
            "revenueGrowth" => &[0.05],
        }
        .unwrap();

        let (out, stats) = join_quarterly(&base, &source).unwrap();
        assert_eq!(column_values(&out, "revenueGrowth"), vec![Some(0.05)]);
        assert_eq!(stats.matched_rows, 1);
        assert_eq!(stats.fields, vec!["revenueGrowth".to_string()]);
        assert_eq!(stats.duplicate_keys, 0);
        assert!(stats.invalid_periods.is_empty());
    }

    #[test]
    fn test_quarter_boundary_day_belongs_to_next_quarter() {
        // 2023-04-01 is the first day of Q2; it must never take the Q1 value.
        let base = base_table(&[("X", (2023, 3, 31)), ("X", (2023, 4, 1))]);
        let source = df! {
            "symbol" => &["X", "X"],
            "calendarYear" => &[2023i32, 2023],
            "period" => &["Q1", "Q2"],
            "revenueGrowth" => &[0.05, 0.11],
        }
        .unwrap();

        let (out, _) = join_quarterly(&base, &source).unwrap();
        assert_eq!(
            column_values(&out, "revenueGrowth"),
            vec![Some(0.05), Some(0.11)]
        );
    }

    #[test]
    fn test_row_before_earliest_quarter_stays_missing() {
        let base = base_table(&[("X", (2022, 2, 15))]);
        let source = df! {
            "symbol" => &["X"],
            "calendarYear" => &[2023i32],
            "period" => &["Q1"],
            "revenueGrowth" => &[0.05],
        }
        .unwrap();

        let (out, stats) = join_quarterly(&base, &source).unwrap();
        assert_eq!(column_values(&out, "revenueGrowth"), vec![None]);
        assert_eq!(stats.matched_rows, 0);
    }

    #[test]
    fn test_symbol_absent_from_source_left_untouched() {
        let base = base_table(&[("X", (2023, 2, 15)), ("Y", (2023, 2, 15))]);
        let source = df! {
            "symbol" => &["X"],
            "calendarYear" => &[2023i32],
            "period" => &["Q1"],
            "revenueGrowth" => &[0.05],
        }
        .unwrap();

        let (out, _) = join_quarterly(&base, &source).unwrap();
        assert_eq!(
            column_values(&out, "revenueGrowth"),
            vec![Some(0.05), None]
        );
    }

    #[test]
    fn test_invalid_period_skips_record_not_merge() {
        let base = base_table(&[("X", (2023, 2, 15)), ("X", (2023, 5, 2))]);
        let source = df! {
            "symbol" => &["X", "X"],
            "calendarYear" => &[2023i32, 2023],
            "period" => &["qq", "Q2"],
            "revenueGrowth" => &[0.77, 0.11],
        }
        .unwrap();

        let (out, stats) = join_quarterly(&base, &source).unwrap();
        assert_eq!(column_values(&out, "revenueGrowth"), vec![None, Some(0.11)]);
        assert_eq!(stats.invalid_periods, vec!["X 2023 qq".to_string()]);
    }

    #[test]
    fn test_duplicate_quarter_first_match_wins_and_is_counted() {
        let base = base_table(&[("X", (2023, 2, 15))]);
        let source = df! {
            "symbol" => &["X", "X"],
            "calendarYear" => &[2023i32, 2023],
            "period" => &["Q1", "Q1"],
            "revenueGrowth" => &[0.05, 0.99],
        }
        .unwrap();

        let (out, stats) = join_quarterly(&base, &source).unwrap();
        assert_eq!(column_values(&out, "revenueGrowth"), vec![Some(0.05)]);
        assert_eq!(stats.duplicate_keys, 1);
    }

    #[test]
    fn test_same_period_different_symbols_not_a_duplicate() {
        let base = base_table(&[("X", (2023, 2, 15)), ("Y", (2023, 2, 15))]);
        let source = df! {
            "symbol" => &["X", "Y"],
            "calendarYear" => &[2023i32, 2023],
            "period" => &["Q1", "Q1"],
            "revenueGrowth" => &[0.05, 0.07],
        }
        .unwrap();

        let (out, stats) = join_quarterly(&base, &source).unwrap();
        assert_eq!(stats.duplicate_keys, 0);
        assert_eq!(
            column_values(&out, "revenueGrowth"),
            vec![Some(0.05), Some(0.07)]
        );
    }

    #[test]
    fn test_key_columns_are_not_copied() {
        let base = base_table(&[("X", (2023, 2, 15))]);
        let source = df! {
            "date" => &["2023-03-31"],
            "symbol" => &["X"],
            "calendarYear" => &[2023i32],
            "period" => &["Q1"],
            "revenueGrowth" => &[0.05],
        }
        .unwrap();

        let (out, stats) = join_quarterly(&base, &source).unwrap();
        assert_eq!(stats.fields, vec!["revenueGrowth".to_string()]);
        // The base date column is untouched by the source's filing date.
        assert_eq!(out.column("date").unwrap().dtype(), &DataType::Date);
    }

    #[test]
    fn test_int64_calendar_year_accepted() {
        // CSV round-trips read the year back as i64.
        let base = base_table(&[("X", (2023, 2, 15))]);
        let source = df! {
            "symbol" => &["X"],
            "calendarYear" => &[2023i64],
            "period" => &["Q1"],
            "revenueGrowth" => &[0.05],
        }
        .unwrap();

        let (out, _) = join_quarterly(&base, &source).unwrap();
        assert_eq!(column_values(&out, "revenueGrowth"), vec![Some(0.05)]);
    }
}
