//! Per-source coverage reporting.

use polars::prelude::*;
use ronda_traits::Result;
use serde::{Deserialize, Serialize};

/// Coverage of one merged source over the final table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageSummary {
    /// Display name of the source.
    pub source: String,
    /// Rows with at least one non-missing value among the source's fields.
    pub covered: usize,
    /// Total rows in the table.
    pub total: usize,
    /// `covered / total`, always in [0.0, 1.0].
    pub fraction: f64,
    /// `false` when the table has no rows: coverage is undefined and the
    /// fraction is reported as 0.0 instead of dividing by zero.
    pub defined: bool,
}

impl CoverageSummary {
    /// Coverage as a percentage, for display.
    #[must_use]
    pub fn percent(&self) -> f64 {
        self.fraction * 100.0
    }
}

/// Compute the fraction of rows holding at least one non-missing value among
/// the given source-contributed columns. Read-only; the table is never
/// mutated.
///
/// Columns absent from the table are ignored. When several sources
/// contributed the same column name, a row filled by either counts for both
/// summaries; coverage is defined against the final table, not against who
/// wrote the value.
///
/// # Errors
///
/// Returns an error only when Polars fails to inspect a listed column.
pub fn coverage(table: &DataFrame, source: &str, fields: &[String]) -> Result<CoverageSummary> {
    let total = table.height();
    if total == 0 {
        return Ok(CoverageSummary {
            source: source.to_string(),
            covered: 0,
            total: 0,
            fraction: 0.0,
            defined: false,
        });
    }

    let mut covered_rows = vec![false; total];
    for field in fields {
        if !table
            .get_column_names()
            .iter()
            .any(|c| c.as_str() == field.as_str())
        {
            continue;
        }
        let present = table.column(field)?.as_materialized_series().is_not_null();
        for (slot, value) in covered_rows.iter_mut().zip(present.into_iter()) {
            if value == Some(true) {
                *slot = true;
            }
        }
    }

    let covered = covered_rows.iter().filter(|c| **c).count();
    Ok(CoverageSummary {
        source: source.to_string(),
        covered,
        total,
        fraction: covered as f64 / total as f64,
        defined: true,
    })
}
