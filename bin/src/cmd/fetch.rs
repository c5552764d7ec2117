//! Fetch command implementation.

use anyhow::{Context, Result};
use ronda_ingest::{Document, DocumentClient};
use std::fs;
use std::path::Path;

/// Download the financial-data document and save it to disk.
pub(crate) async fn fetch_document(url: &str, output: &Path) -> Result<()> {
    println!("Fetching document from {url}...");

    let client = DocumentClient::new();
    let text = client
        .fetch_raw(url)
        .await
        .context("failed to fetch document")?;

    // Parse before saving so a broken download is caught here, not later.
    let doc = Document::from_json(&text).context("response is not a valid document")?;

    fs::write(output, &text)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!("Document saved to {}", output.display());
    if let Some(price) = &doc.price_history {
        println!(
            "  historicalPriceFull: {} rows{}",
            price.historical.len(),
            price
                .symbol
                .as_deref()
                .map(|s| format!(" ({s})"))
                .unwrap_or_default()
        );
    } else {
        println!("Warning: document has no historicalPriceFull section");
    }
    for (name, count) in doc.section_summary() {
        println!("  {name}: {count} rows");
    }

    Ok(())
}
