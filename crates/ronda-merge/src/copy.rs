//! Column copying shared by the temporal and daily join engines.

use polars::prelude::*;
use ronda_traits::Result;

/// Copy every non-key source column onto the base table according to the
/// per-row match vector, implementing the overwrite-on-coverage policy:
///
/// - A base row is overwritten only when it matched a source record AND the
///   source defines (has a non-null value for) that column on the matched
///   record.
/// - Rows without a match, and matched rows where the source value is null,
///   keep whatever the column already held, including values written by an
///   earlier merge step.
/// - Columns new to the base table start out all-null.
///
/// Source columns are cast to `f64`; the merged sources carry open-ended
/// sets of named numeric fields.
///
/// Returns the extended table and the names of the columns written.
pub(crate) fn overwrite_on_coverage(
    base: &DataFrame,
    source: &DataFrame,
    matches: &[Option<usize>],
    key_columns: &[&str],
) -> Result<(DataFrame, Vec<String>)> {
    let height = base.height();
    let mut out = base.clone();
    let mut fields = Vec::new();

    for name in source.get_column_names_owned() {
        if key_columns.contains(&name.as_str()) {
            continue;
        }

        let values = source
            .column(name.as_str())?
            .as_materialized_series()
            .cast(&DataType::Float64)?;
        let values = values.f64()?;

        let mut merged: Vec<Option<f64>> = if out
            .get_column_names()
            .iter()
            .any(|c| c.as_str() == name.as_str())
        {
            let existing = out
                .column(name.as_str())?
                .as_materialized_series()
                .cast(&DataType::Float64)?;
            existing.f64()?.into_iter().collect()
        } else {
            vec![None; height]
        };

        for (slot, matched) in merged.iter_mut().zip(matches) {
            if let Some(row) = matched {
                if let Some(value) = values.get(*row) {
                    *slot = Some(value);
                }
            }
        }

        out.with_column(Series::new(name.clone(), merged))?;
        fields.push(name.to_string());
    }

    Ok((out, fields))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_column_only_covers_matched_rows() {
        let base = df! {
            "symbol" => &["X", "X", "X"],
            "close" => &[1.0, 2.0, 3.0],
        }
        .unwrap();
        let source = df! {
            "symbol" => &["X"],
            "rsi" => &[55.0],
        }
        .unwrap();

        let matches = vec![Some(0), None, Some(0)];
        let (out, fields) =
            overwrite_on_coverage(&base, &source, &matches, &["symbol"]).unwrap();

        assert_eq!(fields, vec!["rsi".to_string()]);
        let rsi: Vec<Option<f64>> = out
            .column("rsi")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(rsi, vec![Some(55.0), None, Some(55.0)]);
    }

    #[test]
    fn test_existing_column_keeps_uncovered_rows() {
        let base = df! {
            "symbol" => &["X", "X"],
            "rsi" => &[Some(10.0), Some(20.0)],
        }
        .unwrap();
        let source = df! {
            "symbol" => &["X"],
            "rsi" => &[99.0],
        }
        .unwrap();

        let matches = vec![None, Some(0)];
        let (out, _) = overwrite_on_coverage(&base, &source, &matches, &["symbol"]).unwrap();

        let rsi: Vec<Option<f64>> = out
            .column("rsi")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(rsi, vec![Some(10.0), Some(99.0)]);
    }

    #[test]
    fn test_null_source_value_does_not_overwrite() {
        let base = df! {
            "symbol" => &["X"],
            "rsi" => &[Some(10.0)],
        }
        .unwrap();
        let source = df! {
            "symbol" => &["X"],
            "rsi" => &[Option::<f64>::None],
        }
        .unwrap();

        let matches = vec![Some(0)];
        let (out, _) = overwrite_on_coverage(&base, &source, &matches, &["symbol"]).unwrap();

        let rsi: Vec<Option<f64>> = out
            .column("rsi")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(rsi, vec![Some(10.0)]);
    }
}
