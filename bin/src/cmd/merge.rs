//! Merge command implementation.

use anyhow::{Context, Result, ensure};
use ronda_merge::{MergeOrchestrator, MergeSource};
use ronda_traits::{MarketTable, SourceKind};
use std::path::Path;

use crate::data;

/// File stem of the base table CSV.
const BASE_TABLE: &str = "historicalPriceFull";

/// Merge the selected sources onto the daily price table and write the
/// result. With no explicit selection, every CSV in the data directory is
/// merged, quarterly sources before daily ones.
pub(crate) fn merge_sources(
    data_dir: &Path,
    selected: &[String],
    output: &Path,
    format: &str,
) -> Result<()> {
    let base_path = data_dir.join(format!("{BASE_TABLE}.csv"));
    ensure!(
        base_path.exists(),
        "base table not found: {}",
        base_path.display()
    );
    let base = data::normalize_dates(data::read_csv(&base_path)?)
        .context("base table is unusable")?;
    let base = MarketTable::new(base);
    println!(
        "Loaded base table: {} rows, {} columns",
        base.len(),
        base.columns().len()
    );

    let names = if selected.is_empty() {
        discover_sources(data_dir)?
    } else {
        selected.to_vec()
    };
    ensure!(!names.is_empty(), "no sources to merge");

    let mut sources = Vec::with_capacity(names.len());
    for name in &names {
        sources.push(load_source(data_dir, name));
    }
    if selected.is_empty() {
        // Discovery has no caller-specified order: quarterly sources first,
        // alphabetical within kind (names are already sorted).
        sources.sort_by_key(|s| match s.kind() {
            Some(SourceKind::Quarterly) | None => 0,
            Some(SourceKind::Daily) => 1,
        });
    }
    println!("Merging {} sources: {}", sources.len(), names.join(", "));

    let outcome = MergeOrchestrator::default().merge(base, sources)?;

    for warning in &outcome.warnings {
        println!("Warning: {warning}");
    }

    println!("\nMerge complete: {} rows", outcome.table.len());
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&outcome.coverage)?);
    } else {
        println!("Coverage:");
        for summary in &outcome.coverage {
            if summary.defined {
                println!(
                    "  {}: {}/{} rows ({:.2}%)",
                    summary.source,
                    summary.covered,
                    summary.total,
                    summary.percent()
                );
            } else {
                println!("  {}: undefined (empty table)", summary.source);
            }
        }
    }

    let mut merged = outcome.table.into_inner();
    data::write_csv(&mut merged, output)?;
    println!("Merged table saved to {}", output.display());
    Ok(())
}

/// All CSV file stems in the data directory except the base table, sorted.
fn discover_sources(data_dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(data_dir)
        .with_context(|| format!("failed to list {}", data_dir.display()))?
    {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("csv") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if stem != BASE_TABLE {
            names.push(stem.to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// Load one source by name. Anything that prevents the table from being
/// supplied degrades it to a missing source; the merge continues without it.
fn load_source(data_dir: &Path, name: &str) -> MergeSource {
    let path = data_dir.join(format!("{name}.csv"));
    if !path.exists() {
        return MergeSource::missing(name);
    }
    let frame = match data::read_csv(&path) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::warn!(source = %name, error = %e, "source could not be read");
            return MergeSource::missing(name);
        }
    };
    match data::classify(&frame) {
        SourceKind::Quarterly => MergeSource::quarterly(name, frame),
        SourceKind::Daily => match data::normalize_dates(frame) {
            Ok(frame) => MergeSource::daily(name, frame),
            Err(e) => {
                tracing::warn!(source = %name, error = %e, "source dates could not be normalized");
                MergeSource::missing(name)
            }
        },
    }
}
