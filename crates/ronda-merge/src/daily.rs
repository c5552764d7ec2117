//! Daily join engine: same-granularity indicator tables onto the base table.
//!
//! Exact (symbol, date) key equality, left-join semantics. No interval
//! logic.

use polars::prelude::*;
use ronda_traits::Result;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::copy::overwrite_on_coverage;

/// Key columns of a daily source; never copied onto the base table.
pub const DAILY_KEY_COLUMNS: &[&str] = &["date", "symbol"];

/// Diagnostics from one daily join.
#[derive(Debug, Clone)]
pub struct DailyJoinStats {
    /// Names of the columns written onto the base table.
    pub fields: Vec<String>,
    /// Number of base rows that matched a source record.
    pub matched_rows: usize,
    /// Number of source rows discarded because an earlier row already
    /// claimed the same (symbol, date) key.
    pub duplicate_keys: usize,
}

/// Left-join a daily indicator source onto the base table by exact
/// (symbol, date) match.
///
/// Both tables need `symbol` (string) and `date` (`Date` dtype) columns.
/// When the source contains duplicate (symbol, date) rows, the FIRST
/// occurrence wins on every run; later duplicates are counted in
/// [`DailyJoinStats::duplicate_keys`] and otherwise ignored.
///
/// # Errors
///
/// Returns an error when either table is missing its key columns or a
/// `date` column is not the `Date` dtype.
pub fn join_daily(base: &DataFrame, source: &DataFrame) -> Result<(DataFrame, DailyJoinStats)> {
    let source_symbols = source.column("symbol")?.as_materialized_series().str()?;
    let source_dates = source.column("date")?.as_materialized_series().date()?;

    // First occurrence wins; duplicates are counted for diagnosis.
    let mut index: HashMap<(&str, i32), usize> = HashMap::with_capacity(source.height());
    let mut duplicate_keys = 0;
    for row in 0..source.height() {
        let (Some(symbol), Some(day)) = (source_symbols.get(row), source_dates.get(row)) else {
            continue;
        };
        match index.entry((symbol, day)) {
            Entry::Vacant(slot) => {
                slot.insert(row);
            }
            Entry::Occupied(_) => duplicate_keys += 1,
        }
    }

    let base_symbols = base.column("symbol")?.as_materialized_series().str()?;
    let base_dates = base.column("date")?.as_materialized_series().date()?;

    let mut matches: Vec<Option<usize>> = vec![None; base.height()];
    for (slot, (symbol, day)) in matches
        .iter_mut()
        .zip(base_symbols.into_iter().zip(base_dates.into_iter()))
    {
        let (Some(symbol), Some(day)) = (symbol, day) else {
            continue;
        };
        *slot = index.get(&(symbol, day)).copied();
    }

    let matched_rows = matches.iter().filter(|m| m.is_some()).count();
    let (out, fields) = overwrite_on_coverage(base, source, &matches, DAILY_KEY_COLUMNS)?;

    Ok((
        out,
        DailyJoinStats {
            fields,
            matched_rows,
            duplicate_keys,
        },
    ))
}
