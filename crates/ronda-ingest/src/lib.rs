//! Financial-data document ingestion for ronda.
//!
//! This crate retrieves the nested financial-data document (daily price
//! history plus quarterly financial-statement tables and daily
//! technical-indicator tables) over HTTP and projects its sections into
//! Polars DataFrames with the schemas the merge engine expects.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ronda_ingest::{DocumentClient, frames};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DocumentClient::new();
//!     let doc = client.fetch_document("https://example.com/document.json").await?;
//!
//!     let base = frames::price_frame(doc.price_history.as_ref().unwrap(), "1101.TW")?;
//!     let (growth, kind) = frames::section_frame(&doc, "financialGrowth")?;
//!
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod document;
mod error;
pub mod frames;

pub use client::DocumentClient;
pub use document::{DailyEntry, Document, PriceBar, PriceSection, QuarterlyEntry};
pub use error::{IngestError, Result};
