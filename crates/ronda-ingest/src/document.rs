//! Serde model of the nested financial-data document.
//!
//! The document is a single JSON object: a `historicalPriceFull` section
//! holding the daily price history, plus arbitrarily named sibling sections,
//! each an array of records. Sections are either quarterly
//! financial-statement tables keyed by (symbol, calendarYear, period) or
//! daily technical-indicator tables keyed by (symbol, date).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::{IngestError, Result};

/// A complete fetched document.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    /// The daily price history section.
    #[serde(rename = "historicalPriceFull")]
    pub price_history: Option<PriceSection>,

    /// Every other section, by name, as raw JSON.
    #[serde(flatten)]
    pub sections: BTreeMap<String, Value>,
}

impl Document {
    /// Parse a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Json`] when the text is not a document-shaped
    /// JSON object.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Names of all sections other than the price history, with the number
    /// of records each holds (non-array sections report zero).
    #[must_use]
    pub fn section_summary(&self) -> Vec<(String, usize)> {
        self.sections
            .iter()
            .map(|(name, value)| {
                let count = value.as_array().map_or(0, Vec::len);
                (name.clone(), count)
            })
            .collect()
    }

    /// Whether the document has a section with this name.
    #[must_use]
    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Raw record array of a section.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::MissingSection`] when absent, or
    /// [`IngestError::InvalidSection`] when the section is not an array.
    pub fn section_records(&self, name: &str) -> Result<&[Value]> {
        let value = self
            .sections
            .get(name)
            .ok_or_else(|| IngestError::MissingSection(name.to_string()))?;
        value
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| IngestError::InvalidSection(name.to_string()))
    }

    /// Deserialize a section as quarterly entries.
    ///
    /// # Errors
    ///
    /// Fails when the section is absent or its records lack the quarterly
    /// keys.
    pub fn quarterly_section(&self, name: &str) -> Result<Vec<QuarterlyEntry>> {
        let records = self.section_records(name)?;
        records
            .iter()
            .map(|r| Ok(serde_json::from_value(r.clone())?))
            .collect()
    }

    /// Deserialize a section as daily entries.
    ///
    /// # Errors
    ///
    /// Fails when the section is absent or its records lack a date.
    pub fn daily_section(&self, name: &str) -> Result<Vec<DailyEntry>> {
        let records = self.section_records(name)?;
        records
            .iter()
            .map(|r| Ok(serde_json::from_value(r.clone())?))
            .collect()
    }
}

/// The `historicalPriceFull` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSection {
    /// Ticker symbol the history belongs to.
    #[serde(default)]
    pub symbol: Option<String>,
    /// Daily bars, typically newest first as delivered.
    pub historical: Vec<PriceBar>,
}

/// One daily price record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBar {
    /// Trading date, `YYYY-MM-DD`.
    pub date: String,
    /// Opening price.
    #[serde(default)]
    pub open: f64,
    /// Intraday high.
    #[serde(default)]
    pub high: f64,
    /// Intraday low.
    #[serde(default)]
    pub low: f64,
    /// Closing price.
    #[serde(default)]
    pub close: f64,
    /// Split/dividend adjusted close.
    #[serde(default)]
    pub adj_close: f64,
    /// Traded volume.
    #[serde(default)]
    pub volume: f64,
    /// Unadjusted traded volume.
    #[serde(default)]
    pub unadjusted_volume: f64,
    /// Absolute price change on the day.
    #[serde(default)]
    pub change: f64,
    /// Percentage price change on the day.
    #[serde(default)]
    pub change_percent: f64,
    /// Volume-weighted average price.
    #[serde(default)]
    pub vwap: f64,
    /// Human-readable date label.
    #[serde(default)]
    pub label: String,
    /// Cumulative change since the start of the series.
    #[serde(default)]
    pub change_over_time: f64,
}

/// One record of a quarterly financial-statement table.
///
/// Named fields beyond the keys are open-ended and kept as raw JSON; the
/// projection layer extracts the numeric ones.
#[derive(Debug, Clone, Deserialize)]
pub struct QuarterlyEntry {
    /// Ticker symbol.
    #[serde(default)]
    pub symbol: String,
    /// Calendar year of the period. Serialized as a number or a string
    /// depending on the upstream provider; both are accepted.
    #[serde(rename = "calendarYear", deserialize_with = "year_from_value")]
    pub calendar_year: i32,
    /// Fiscal period label, expected `Q1`..`Q4`.
    pub period: String,
    /// All remaining named fields, including the filing `date`.
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

/// One record of a daily indicator table.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyEntry {
    /// Ticker symbol.
    #[serde(default)]
    pub symbol: String,
    /// Observation date, `YYYY-MM-DD`.
    pub date: String,
    /// All remaining named fields.
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

fn year_from_value<'de, D>(deserializer: D) -> std::result::Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match &value {
        Value::Number(n) => n
            .as_i64()
            .map(|y| y as i32)
            .ok_or_else(|| serde::de::Error::custom(format!("non-integer calendarYear: {n}"))),
        Value::String(s) => s
            .parse::<i32>()
            .map_err(|_| serde::de::Error::custom(format!("unparsable calendarYear: {s:?}"))),
        other => Err(serde::de::Error::custom(format!(
            "calendarYear must be a number or string, got {other}"
        ))),
    }
}
