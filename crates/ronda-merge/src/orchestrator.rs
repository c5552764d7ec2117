//! Merge orchestrator: folds an ordered sequence of sources onto the base
//! table and reports per-source coverage.

use polars::prelude::*;
use ronda_traits::{MarketTable, Result, RondaError, SourceKind};

use crate::coverage::{CoverageSummary, coverage};
use crate::daily::join_daily;
use crate::temporal::join_quarterly;

/// Column-collision policy applied when two sources define the same field.
///
/// This is the most behaviorally significant policy in the merge: it is an
/// explicit, named strategy rather than a byproduct of copy order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// A later source overwrites a field only on rows it actually covers;
    /// rows it does not cover retain the earlier source's value.
    #[default]
    OverwriteOnCoverage,
}

/// One source selected for merging, in caller-specified order.
#[derive(Debug, Clone)]
pub struct MergeSource {
    name: String,
    payload: Option<(SourceKind, DataFrame)>,
}

impl MergeSource {
    /// A quarterly source: one record per (symbol, calendarYear, period).
    #[must_use]
    pub fn quarterly(name: impl Into<String>, table: DataFrame) -> Self {
        Self {
            name: name.into(),
            payload: Some((SourceKind::Quarterly, table)),
        }
    }

    /// A daily source: one record per (symbol, date).
    #[must_use]
    pub fn daily(name: impl Into<String>, table: DataFrame) -> Self {
        Self {
            name: name.into(),
            payload: Some((SourceKind::Daily, table)),
        }
    }

    /// A source that was requested but could not be supplied. The
    /// orchestrator warns and skips it; the merge continues.
    #[must_use]
    pub fn missing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: None,
        }
    }

    /// Display name of the source.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Granularity of the source, when it was loaded.
    #[must_use]
    pub fn kind(&self) -> Option<SourceKind> {
        self.payload.as_ref().map(|(kind, _)| *kind)
    }
}

/// Result of a full merge run.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// The base table extended with every applied source's fields.
    pub table: MarketTable,
    /// One summary per APPLIED source, in application order.
    pub coverage: Vec<CoverageSummary>,
    /// Non-fatal diagnostics: missing sources, invalid period labels,
    /// duplicate source keys, skipped malformed sources.
    pub warnings: Vec<String>,
}

/// Applies a selected sequence of quarterly and daily sources onto a base
/// table, in order, and accumulates per-source coverage.
///
/// The orchestrator never aborts the merge for a per-source problem; it
/// degrades gracefully and reports. The only fatal condition is a base
/// table on which no row identity can be established.
#[derive(Debug, Clone, Default)]
pub struct MergeOrchestrator {
    policy: CollisionPolicy,
}

impl MergeOrchestrator {
    /// Create an orchestrator with the given collision policy.
    #[must_use]
    pub const fn new(policy: CollisionPolicy) -> Self {
        Self { policy }
    }

    /// The collision policy in effect.
    #[must_use]
    pub const fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    /// Merge the sources onto the base table, strictly in the given order.
    ///
    /// Later sources can overwrite fields written by earlier ones on the
    /// rows they cover (see [`CollisionPolicy`]); the caller's order is an
    /// observable contract. Coverage is computed per applied source against
    /// the final table.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::MissingColumn`] when the base table lacks
    /// `symbol` or `date`, or [`RondaError::InvalidData`] when `date` is not
    /// the `Date` dtype. Per-source failures are warnings, never errors.
    pub fn merge(&self, base: MarketTable, sources: Vec<MergeSource>) -> Result<MergeOutcome> {
        for key in ["symbol", "date"] {
            if !base.has_column(key) {
                return Err(RondaError::MissingColumn(key.to_string()));
            }
        }
        let mut table = base.into_inner();
        if table.column("date")?.dtype() != &DataType::Date {
            return Err(RondaError::InvalidData(
                "base table date column must have the Date dtype".to_string(),
            ));
        }

        let mut contributed: Vec<(String, Vec<String>)> = Vec::new();
        let mut warnings = Vec::new();

        for source in sources {
            let name = source.name;
            let Some((kind, frame)) = source.payload else {
                tracing::warn!(source = %name, "source not found, skipped");
                warnings.push(format!("{name}: source not found, skipped"));
                continue;
            };

            let applied = match (self.policy, kind) {
                (CollisionPolicy::OverwriteOnCoverage, SourceKind::Quarterly) => {
                    join_quarterly(&table, &frame).map(|(out, stats)| {
                        for record in &stats.invalid_periods {
                            tracing::warn!(
                                source = %name,
                                record = %record,
                                "invalid period label, record skipped"
                            );
                            warnings
                                .push(format!("{name}: invalid period label for record {record}"));
                        }
                        if stats.duplicate_keys > 0 {
                            tracing::warn!(
                                source = %name,
                                duplicates = stats.duplicate_keys,
                                "duplicate (symbol, calendarYear, period) keys, first record wins"
                            );
                            warnings.push(format!(
                                "{name}: {} duplicate (symbol, calendarYear, period) keys, first record wins",
                                stats.duplicate_keys
                            ));
                        }
                        (out, stats.fields)
                    })
                }
                (CollisionPolicy::OverwriteOnCoverage, SourceKind::Daily) => {
                    join_daily(&table, &frame).map(|(out, stats)| {
                        if stats.duplicate_keys > 0 {
                            tracing::warn!(
                                source = %name,
                                duplicates = stats.duplicate_keys,
                                "duplicate (symbol, date) keys, first occurrence kept"
                            );
                            warnings.push(format!(
                                "{name}: {} duplicate (symbol, date) keys, first occurrence kept",
                                stats.duplicate_keys
                            ));
                        }
                        (out, stats.fields)
                    })
                }
            };

            match applied {
                Ok((out, fields)) => {
                    table = out;
                    contributed.push((name, fields));
                }
                Err(e) => {
                    tracing::warn!(source = %name, error = %e, "source failed to merge, skipped");
                    warnings.push(format!("{name}: {e}, source skipped"));
                }
            }
        }

        let mut summaries = Vec::with_capacity(contributed.len());
        for (name, fields) in &contributed {
            summaries.push(coverage(&table, name, fields)?);
        }

        Ok(MergeOutcome {
            table: MarketTable::new(table),
            coverage: summaries,
            warnings,
        })
    }
}
