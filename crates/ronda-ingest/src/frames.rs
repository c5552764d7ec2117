//! Projection of document sections into Polars DataFrames.
//!
//! Pure field projection: each section becomes one table with the schema the
//! merge engine expects. Numeric fields are carried; non-numeric extras are
//! projected as nulls and drop out naturally.

use chrono::NaiveDate;
use polars::prelude::*;
use ronda_traits::{SourceKind, days_from_date};
use serde_json::Value;
use std::collections::BTreeSet;

use crate::document::{DailyEntry, Document, PriceBar, PriceSection, QuarterlyEntry};
use crate::error::{IngestError, Result};

fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| IngestError::InvalidDate(text.to_string()))
}

fn date_column(days: Vec<i32>) -> Result<Column> {
    Ok(Series::new("date".into(), days)
        .cast(&DataType::Date)?
        .into_column())
}

/// Build the daily base table from the price history section.
///
/// Rows are sorted oldest-first regardless of delivery order. The symbol
/// column uses the section's own symbol, falling back to `fallback_symbol`
/// when the section carries none.
///
/// # Errors
///
/// Fails when a bar has an unparsable date.
pub fn price_frame(section: &PriceSection, fallback_symbol: &str) -> Result<DataFrame> {
    let symbol = section
        .symbol
        .clone()
        .unwrap_or_else(|| fallback_symbol.to_string());

    let mut bars: Vec<(NaiveDate, &PriceBar)> = Vec::with_capacity(section.historical.len());
    for bar in &section.historical {
        bars.push((parse_date(&bar.date)?, bar));
    }
    bars.sort_by_key(|(date, _)| *date);

    let days: Vec<i32> = bars.iter().map(|(date, _)| days_from_date(*date)).collect();
    let f64_column = |name: &str, get: fn(&PriceBar) -> f64| {
        Series::new(name.into(), bars.iter().map(|(_, b)| get(b)).collect::<Vec<f64>>())
            .into_column()
    };

    let columns = vec![
        date_column(days)?,
        Series::new("symbol".into(), vec![symbol; bars.len()]).into_column(),
        f64_column("open", |b| b.open),
        f64_column("high", |b| b.high),
        f64_column("low", |b| b.low),
        f64_column("close", |b| b.close),
        f64_column("adjClose", |b| b.adj_close),
        f64_column("volume", |b| b.volume),
        f64_column("unadjustedVolume", |b| b.unadjusted_volume),
        f64_column("change", |b| b.change),
        f64_column("changePercent", |b| b.change_percent),
        f64_column("vwap", |b| b.vwap),
        Series::new(
            "label".into(),
            bars.iter().map(|(_, b)| b.label.clone()).collect::<Vec<String>>(),
        )
        .into_column(),
        f64_column("changeOverTime", |b| b.change_over_time),
    ];

    Ok(DataFrame::new(columns)?)
}

/// Names of the numeric fields present in at least one entry, sorted.
fn numeric_field_names<'a, I>(field_maps: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a std::collections::BTreeMap<String, Value>>,
{
    let mut names = BTreeSet::new();
    for fields in field_maps {
        for (name, value) in fields {
            if value.is_number() {
                names.insert(name.clone());
            }
        }
    }
    names
}

/// Project quarterly entries into a (symbol, calendarYear, period, fields…)
/// table. Field columns are the union of numeric field names across all
/// entries, in sorted order.
///
/// # Errors
///
/// Fails only when Polars rejects the constructed columns.
pub fn quarterly_frame(entries: &[QuarterlyEntry]) -> Result<DataFrame> {
    let mut columns = vec![
        Series::new(
            "symbol".into(),
            entries.iter().map(|e| e.symbol.clone()).collect::<Vec<String>>(),
        )
        .into_column(),
        Series::new(
            "calendarYear".into(),
            entries.iter().map(|e| e.calendar_year).collect::<Vec<i32>>(),
        )
        .into_column(),
        Series::new(
            "period".into(),
            entries.iter().map(|e| e.period.clone()).collect::<Vec<String>>(),
        )
        .into_column(),
    ];

    for name in numeric_field_names(entries.iter().map(|e| &e.fields)) {
        let values: Vec<Option<f64>> = entries
            .iter()
            .map(|e| e.fields.get(&name).and_then(Value::as_f64))
            .collect();
        columns.push(Series::new(name.as_str().into(), values).into_column());
    }

    Ok(DataFrame::new(columns)?)
}

/// Project daily entries into a (symbol, date, fields…) table.
///
/// # Errors
///
/// Fails when an entry has an unparsable date.
pub fn daily_frame(entries: &[DailyEntry]) -> Result<DataFrame> {
    let mut days = Vec::with_capacity(entries.len());
    for entry in entries {
        days.push(days_from_date(parse_date(&entry.date)?));
    }

    let mut columns = vec![
        Series::new(
            "symbol".into(),
            entries.iter().map(|e| e.symbol.clone()).collect::<Vec<String>>(),
        )
        .into_column(),
        date_column(days)?,
    ];

    for name in numeric_field_names(entries.iter().map(|e| &e.fields)) {
        let values: Vec<Option<f64>> = entries
            .iter()
            .map(|e| e.fields.get(&name).and_then(Value::as_f64))
            .collect();
        columns.push(Series::new(name.as_str().into(), values).into_column());
    }

    Ok(DataFrame::new(columns)?)
}

/// Project a named section, detecting its granularity from the record shape:
/// records with `calendarYear` and `period` are quarterly, records with a
/// `date` are daily. An empty section projects as an empty daily table
/// (valid input; it merges with zero coverage).
///
/// # Errors
///
/// Fails when the section is absent or its records match neither shape.
pub fn section_frame(doc: &Document, name: &str) -> Result<(DataFrame, SourceKind)> {
    let records = doc.section_records(name)?;
    let Some(first) = records.first() else {
        return Ok((daily_frame(&[])?, SourceKind::Daily));
    };

    if first.get("calendarYear").is_some() && first.get("period").is_some() {
        let entries = doc.quarterly_section(name)?;
        Ok((quarterly_frame(&entries)?, SourceKind::Quarterly))
    } else if first.get("date").is_some() {
        let entries = doc.daily_section(name)?;
        Ok((daily_frame(&entries)?, SourceKind::Daily))
    } else {
        Err(IngestError::InvalidSection(name.to_string()))
    }
}
