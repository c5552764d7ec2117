//! Convert command implementation.

use anyhow::{Context, Result};
use ronda_ingest::{Document, frames};
use ronda_traits::MarketTable;
use std::fs;
use std::path::Path;

use crate::data;

/// Project a saved document into per-table CSV files under `data_dir`.
pub(crate) fn convert_document(input: &Path, data_dir: &Path, symbol: &str) -> Result<()> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let doc = Document::from_json(&text).context("input is not a valid document")?;

    fs::create_dir_all(data_dir)
        .with_context(|| format!("failed to create {}", data_dir.display()))?;

    let section = doc
        .price_history
        .as_ref()
        .context("document has no historicalPriceFull section")?;
    let mut base = frames::price_frame(section, symbol)?;

    let table = MarketTable::new(base.clone());
    data::write_csv(&mut base, &data_dir.join("historicalPriceFull.csv"))?;
    println!("historicalPriceFull: {} rows", table.len());
    if let Some((min, max)) = table.date_range() {
        println!("  date range: {min} to {max}");
    }

    let mut written = 1;
    for (name, _) in doc.section_summary() {
        match frames::section_frame(&doc, &name) {
            Ok((mut frame, kind)) => {
                data::write_csv(&mut frame, &data_dir.join(format!("{name}.csv")))?;
                println!("{name}: {} rows ({})", frame.height(), kind.as_str());
                written += 1;
            }
            Err(e) => {
                tracing::warn!(section = %name, error = %e, "section skipped");
                println!("Warning: section {name} skipped: {e}");
            }
        }
    }

    println!("Wrote {written} CSV files to {}", data_dir.display());
    Ok(())
}
