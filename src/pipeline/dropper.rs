//! Greedy removal of linearly redundant features
//!
//! Each round re-scores dependence over the surviving columns and tries them
//! most-dependent first. The first column whose removal keeps or improves the
//! mean cross-validated score of a linear model is dropped and a new round
//! starts. A round with no such column ends the search.

use polars::prelude::*;
use serde::Serialize;

use super::dependence::dependence_scores;
use super::error::{PrepError, Result};
use super::frame::column_names;
use super::regression::{frame_to_matrix, select_columns, CrossValidator, LinearRegression, Regressor};

/// Result of a recursive dropping run
#[derive(Debug, Clone, Serialize)]
pub struct DropOutcome {
    /// Dropped features, in removal order
    pub dropped: Vec<String>,
    /// Mean CV score with every feature
    pub baseline_score: f64,
    /// Mean CV score after the drops
    pub final_score: f64,
}

/// Drop redundant features of `x` for predicting `y` with ordinary least squares
pub fn recursive_drop(x: &DataFrame, y: &[f64], validator: &CrossValidator) -> Result<DropOutcome> {
    recursive_drop_with(x, y, &LinearRegression::new(), validator, |_, _| {})
}

/// Drop redundant features with a caller-supplied model.
///
/// `on_drop` is called with each dropped feature and the new best score.
pub fn recursive_drop_with<R, F>(
    x: &DataFrame,
    y: &[f64],
    model: &R,
    validator: &CrossValidator,
    mut on_drop: F,
) -> Result<DropOutcome>
where
    R: Regressor + Clone,
    F: FnMut(&str, f64),
{
    if x.height() != y.len() {
        return Err(PrepError::Model(format!(
            "feature rows ({}) and target length ({}) differ",
            x.height(),
            y.len()
        )));
    }

    let names = column_names(x);
    let matrix = frame_to_matrix(x, &names)?;

    let mut remaining: Vec<usize> = (0..names.len()).collect();
    let baseline_score = validator.mean_score(model, &matrix, y)?;
    let mut best = baseline_score;
    let mut dropped = Vec::new();

    log::info!(
        "recursive dropping over {} feature(s), baseline score {:.5}",
        names.len(),
        baseline_score
    );

    // A lone surviving column is never a candidate
    'rounds: while remaining.len() > 1 {
        let current = select_columns(&matrix, &remaining);
        let current_names: Vec<String> = remaining.iter().map(|&i| names[i].clone()).collect();
        let candidates = dependence_scores(&current, &current_names, model)?;

        for candidate in candidates {
            let trial: Vec<usize> = remaining
                .iter()
                .copied()
                .filter(|&i| names[i] != candidate.feature)
                .collect();
            let score = validator.mean_score(model, &select_columns(&matrix, &trial), y)?;

            if score >= best {
                log::debug!(
                    "dropping '{}' (R² {:.4}), score {:.5} -> {:.5}",
                    candidate.feature,
                    candidate.r2,
                    best,
                    score
                );
                best = score;
                remaining = trial;
                on_drop(&candidate.feature, score);
                dropped.push(candidate.feature);
                continue 'rounds;
            }
        }

        break;
    }

    Ok(DropOutcome {
        dropped,
        baseline_score,
        final_score: best,
    })
}
