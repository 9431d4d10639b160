//! Small DataFrame accessors shared by the cleaning and selection steps

use polars::prelude::*;

use super::error::{PrepError, Result};

/// Column names in frame order
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names().iter().map(|s| s.to_string()).collect()
}

/// Look up a column, reporting absence as a pipeline error
pub fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_| PrepError::MissingColumn(name.to_string()))
}

/// Values of a column cast to f64, nulls preserved
pub fn float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = require_column(df, name)?.cast(&DataType::Float64)?;
    Ok(column.f64()?.into_iter().collect())
}

/// Values of a column cast to strings, nulls preserved
pub fn text_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = require_column(df, name)?.cast(&DataType::String)?;
    Ok(column
        .str()?
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect())
}

/// Values of a column that must be complete, as f64
pub fn complete_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    float_values(df, name)?
        .into_iter()
        .map(|v| {
            v.ok_or_else(|| PrepError::MissingValues {
                column: name.to_string(),
            })
        })
        .collect()
}

/// Replace (or append) a column
pub fn put_column<T, Phantom>(df: &mut DataFrame, name: &str, values: T) -> Result<()>
where
    Phantom: ?Sized,
    Series: NamedFrom<T, Phantom>,
{
    df.with_column(Column::new(name.into(), values))?;
    Ok(())
}

/// Drop a column that is expected to exist
pub fn remove_column(df: &mut DataFrame, name: &str) -> Result<()> {
    require_column(df, name)?;
    df.drop_in_place(name)?;
    Ok(())
}
