//! Structured tables from a fitted regression's text summary
//!
//! The summary arrives as two comma-separated tables: overall fit statistics
//! and per-coefficient statistics. The layout is a fixed contract with the
//! statistics service, so any deviation is a format error.

use std::iter;

use polars::prelude::*;

use crate::pipeline::{FeatureNames, PrepError, Result};

/// Row after which the F-statistic probability is placed
const PROBABILITY_ROW: usize = 6;

/// Statistics kept around the probability row
const STATISTIC_ROWS: usize = 13;

/// Label given to the intercept term when relabelling coefficients
const INTERCEPT_LABEL: &str = "1";

fn format_error(message: impl Into<String>) -> PrepError {
    PrepError::Format(message.into())
}

/// Parse the overall statistics table into `Result` / `Value` columns.
///
/// Each line holds two label/value pairs. The `Date` line carries a comma
/// inside the date itself, so only its `Prob (F-statistic)` pair is kept, and
/// it is placed after the sixth row. Only the first thirteen other statistics
/// are kept, so the trailing `Covariance Type` pair is left out.
pub fn overall_statistics(table: &str) -> Result<DataFrame> {
    let mut rows: Vec<(String, String)> = Vec::new();
    let mut probability: Option<(String, String)> = None;

    // Lines without a comma are titles
    for line in table.lines().filter(|l| l.contains(',')) {
        if line.contains("Date") {
            if probability.is_some() {
                return Err(format_error("more than one Date line"));
            }
            let start = line
                .find("Prob")
                .ok_or_else(|| format_error("Date line has no Prob (F-statistic) entry"))?;
            let fields: Vec<&str> = line[start..].split(',').collect();
            if fields.len() != 2 {
                return Err(format_error(format!(
                    "expected a label and a value after Prob, got {} field(s)",
                    fields.len()
                )));
            }
            probability = Some((fields[0].trim().to_string(), fields[1].trim().to_string()));
            continue;
        }

        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() % 2 != 0 {
            return Err(format_error(format!(
                "odd number of fields ({}) in line '{}'",
                fields.len(),
                line.trim()
            )));
        }
        for pair in fields.chunks(2) {
            let (label, value) = (pair[0].trim(), pair[1].trim());
            if label.is_empty() || value.is_empty() {
                continue;
            }
            rows.push((label.to_string(), value.to_string()));
        }
    }

    let probability = probability.ok_or_else(|| format_error("no Date line in table"))?;
    if rows.len() < PROBABILITY_ROW {
        return Err(format_error(format!(
            "expected at least {} statistics, found {}",
            PROBABILITY_ROW,
            rows.len()
        )));
    }
    rows.truncate(STATISTIC_ROWS);
    rows.insert(PROBABILITY_ROW, probability);

    let (labels, values): (Vec<String>, Vec<String>) = rows.into_iter().unzip();
    Ok(DataFrame::new(vec![
        Column::new("Result".into(), labels),
        Column::new("Value".into(), values),
    ])?)
}

/// Parse the coefficient table into a `variable` column plus one numeric
/// column per statistic.
///
/// With `names`, term labels are replaced by position: the intercept becomes
/// `"1"` and the remaining terms take the provider's feature names in order.
pub fn coefficient_statistics(table: &str, names: Option<&dyn FeatureNames>) -> Result<DataFrame> {
    let mut lines = table.lines().filter(|l| !l.trim().is_empty());

    let header = lines
        .next()
        .ok_or_else(|| format_error("coefficient table is empty"))?;
    let statistics: Vec<String> = header
        .split(',')
        .skip(1)
        .map(|h| h.trim().to_string())
        .collect();
    if statistics.is_empty() {
        return Err(format_error("coefficient table header has no statistics"));
    }

    let mut terms: Vec<String> = Vec::new();
    let mut values: Vec<Vec<f64>> = vec![Vec::new(); statistics.len()];

    for line in lines {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != statistics.len() + 1 {
            return Err(format_error(format!(
                "expected {} field(s), got {} in line '{}'",
                statistics.len() + 1,
                fields.len(),
                line.trim()
            )));
        }

        terms.push(fields[0].trim().to_string());
        for (column, field) in values.iter_mut().zip(&fields[1..]) {
            let value = field
                .trim()
                .parse::<f64>()
                .map_err(|_| format_error(format!("'{}' is not a number", field.trim())))?;
            column.push(value);
        }
    }

    if let Some(names) = names {
        let labels: Vec<String> = iter::once(INTERCEPT_LABEL.to_string())
            .chain(names.feature_names_out()?)
            .collect();
        terms = terms
            .into_iter()
            .enumerate()
            .map(|(i, term)| labels.get(i).cloned().ok_or(PrepError::UnknownTerm { term }))
            .collect::<Result<_>>()?;
    }

    let mut columns = vec![Column::new("variable".into(), terms)];
    for (name, column) in statistics.iter().zip(values) {
        columns.push(Column::new(name.as_str().into(), column));
    }

    Ok(DataFrame::new(columns)?)
}
