//! Linear dependence between numeric columns
//!
//! Each column is regressed on all the others; its training R² says how well
//! the rest of the table already explains it. A score near 1 marks a column
//! that is close to redundant.

use faer::Mat;
use polars::prelude::*;
use serde::Serialize;

use super::error::Result;
use super::frame::column_names;
use super::regression::{frame_to_matrix, select_columns, LinearRegression, Regressor};

/// R² of one column predicted from the other columns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DependenceScore {
    pub feature: String,
    pub r2: f64,
}

/// Score every column (or the `columns` subset) with ordinary least squares,
/// highest dependence first
pub fn estimate_dependence(df: &DataFrame, columns: Option<&[String]>) -> Result<Vec<DependenceScore>> {
    estimate_dependence_with(df, columns, &LinearRegression::new())
}

/// Like [`estimate_dependence`] with a caller-supplied model
pub fn estimate_dependence_with<R>(
    df: &DataFrame,
    columns: Option<&[String]>,
    model: &R,
) -> Result<Vec<DependenceScore>>
where
    R: Regressor + Clone,
{
    let names = match columns {
        Some(columns) => columns.to_vec(),
        None => column_names(df),
    };
    let matrix = frame_to_matrix(df, &names)?;
    dependence_scores(&matrix, &names, model)
}

/// Dependence scores for the columns of a sample matrix
pub(crate) fn dependence_scores<R>(
    matrix: &Mat<f64>,
    names: &[String],
    model: &R,
) -> Result<Vec<DependenceScore>>
where
    R: Regressor + Clone,
{
    let p = matrix.ncols();
    let mut scores = Vec::with_capacity(p);

    for (j, name) in names.iter().enumerate() {
        let others: Vec<usize> = (0..p).filter(|&k| k != j).collect();
        let x = select_columns(matrix, &others);
        let y: Vec<f64> = (0..matrix.nrows()).map(|i| matrix[(i, j)]).collect();

        let mut fitted = model.clone();
        fitted.fit(&x, &y)?;
        scores.push(DependenceScore {
            feature: name.clone(),
            r2: fitted.score(&x, &y)?,
        });
    }

    // Stable sort keeps frame order among ties
    scores.sort_by(|a, b| b.r2.partial_cmp(&a.r2).unwrap_or(std::cmp::Ordering::Equal));

    Ok(scores)
}
