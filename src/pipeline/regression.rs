//! Linear regression and K-fold cross-validation
//!
//! The selection routines only need a model that can be fitted and scored, so
//! they are written against the [`Regressor`] trait. [`LinearRegression`] is
//! an ordinary least-squares fit with intercept; collinear predictors are
//! detected while sweeping the Gram matrix and given a zero coefficient, which
//! leaves the fitted values (and therefore R²) unchanged.

use std::ops::Range;

use faer::Mat;
use polars::prelude::*;

use super::error::{PrepError, Result};
use super::frame::complete_values;

/// Relative pivot size below which a predictor counts as collinear
const COLLINEARITY_TOLERANCE: f64 = 1e-10;

/// Default number of cross-validation folds
pub const DEFAULT_FOLDS: usize = 5;

/// A regression model that can be fitted and scored
pub trait Regressor {
    /// Fit the model to `x` (rows are samples) and `y`
    fn fit(&mut self, x: &Mat<f64>, y: &[f64]) -> Result<()>;

    /// Predict one value per row of `x`
    fn predict(&self, x: &Mat<f64>) -> Result<Vec<f64>>;

    /// Coefficient of determination of the predictions for `x` against `y`
    fn score(&self, x: &Mat<f64>, y: &[f64]) -> Result<f64> {
        Ok(r2_score(y, &self.predict(x)?))
    }
}

/// Ordinary least squares with an intercept term
#[derive(Debug, Clone, Default)]
pub struct LinearRegression {
    coefficients: Option<Vec<f64>>,
    intercept: f64,
}

impl LinearRegression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fitted coefficients, one per column, if the model has been fitted
    pub fn coefficients(&self) -> Option<&[f64]> {
        self.coefficients.as_deref()
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl Regressor for LinearRegression {
    fn fit(&mut self, x: &Mat<f64>, y: &[f64]) -> Result<()> {
        let n = x.nrows();
        let p = x.ncols();

        if n == 0 {
            return Err(PrepError::Model("cannot fit on zero rows".to_string()));
        }
        if y.len() != n {
            return Err(PrepError::Model(format!(
                "feature rows ({}) and target length ({}) differ",
                n,
                y.len()
            )));
        }

        let means: Vec<f64> = (0..p)
            .map(|j| (0..n).map(|i| x[(i, j)]).sum::<f64>() / n as f64)
            .collect();
        let y_mean = y.iter().sum::<f64>() / n as f64;

        // Centered design augmented with the centered target as last column
        let augmented = Mat::from_fn(n, p + 1, |i, j| {
            if j < p {
                x[(i, j)] - means[j]
            } else {
                y[i] - y_mean
            }
        });
        let mut cross = augmented.transpose() * &augmented;

        let coefficients = sweep_coefficients(&mut cross, p);
        let intercept = y_mean
            - coefficients
                .iter()
                .zip(&means)
                .map(|(b, m)| b * m)
                .sum::<f64>();

        self.coefficients = Some(coefficients);
        self.intercept = intercept;
        Ok(())
    }

    fn predict(&self, x: &Mat<f64>) -> Result<Vec<f64>> {
        let coefficients = self
            .coefficients
            .as_ref()
            .ok_or_else(|| PrepError::Model("model has not been fitted".to_string()))?;

        if x.ncols() != coefficients.len() {
            return Err(PrepError::Model(format!(
                "model was fitted on {} feature(s), got {}",
                coefficients.len(),
                x.ncols()
            )));
        }

        Ok((0..x.nrows())
            .map(|i| {
                self.intercept
                    + coefficients
                        .iter()
                        .enumerate()
                        .map(|(j, b)| b * x[(i, j)])
                        .sum::<f64>()
            })
            .collect())
    }
}

/// Sweep the predictor block of a `(p+1) x (p+1)` cross-product matrix whose
/// last row/column holds the target, and read off the coefficients.
///
/// A predictor whose remaining pivot is negligible relative to its own sum of
/// squares is a linear combination of earlier ones; it is skipped and keeps a
/// zero coefficient.
fn sweep_coefficients(cross: &mut Mat<f64>, p: usize) -> Vec<f64> {
    let size = p + 1;
    let diagonal: Vec<f64> = (0..p).map(|k| cross[(k, k)]).collect();
    let mut swept = vec![false; p];

    for k in 0..p {
        let pivot = cross[(k, k)];
        if diagonal[k] <= 0.0 || pivot <= COLLINEARITY_TOLERANCE * diagonal[k] {
            continue;
        }

        for j in 0..size {
            cross[(k, j)] /= pivot;
        }
        for i in 0..size {
            if i == k {
                continue;
            }
            let factor = cross[(i, k)];
            if factor == 0.0 {
                continue;
            }
            for j in 0..size {
                cross[(i, j)] -= factor * cross[(k, j)];
            }
            cross[(i, k)] = -factor / pivot;
        }
        cross[(k, k)] = 1.0 / pivot;
        swept[k] = true;
    }

    (0..p)
        .map(|k| if swept[k] { cross[(k, p)] } else { 0.0 })
        .collect()
}

/// Coefficient of determination. A constant target scores 1.0 when predicted
/// exactly and 0.0 otherwise.
pub fn r2_score(y_true: &[f64], y_pred: &[f64]) -> f64 {
    let n = y_true.len();
    if n == 0 {
        return f64::NAN;
    }
    let mean = y_true.iter().sum::<f64>() / n as f64;
    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred)
        .map(|(t, p)| (t - p).powi(2))
        .sum();
    let ss_tot: f64 = y_true.iter().map(|t| (t - mean).powi(2)).sum();

    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}

/// K-fold cross-validation over contiguous, unshuffled folds
#[derive(Debug, Clone, Copy)]
pub struct CrossValidator {
    pub folds: usize,
}

impl Default for CrossValidator {
    fn default() -> Self {
        Self {
            folds: DEFAULT_FOLDS,
        }
    }
}

impl CrossValidator {
    pub fn new(folds: usize) -> Self {
        Self { folds }
    }

    /// Test-row ranges; the first `n % folds` folds hold one extra row
    pub fn fold_ranges(&self, n_rows: usize) -> Result<Vec<Range<usize>>> {
        if self.folds < 2 {
            return Err(PrepError::Model(format!(
                "cross-validation needs at least 2 folds, got {}",
                self.folds
            )));
        }
        if n_rows < self.folds {
            return Err(PrepError::Model(format!(
                "cannot split {} row(s) into {} folds",
                n_rows, self.folds
            )));
        }

        let base = n_rows / self.folds;
        let extra = n_rows % self.folds;
        let mut start = 0;
        Ok((0..self.folds)
            .map(|fold| {
                let len = base + usize::from(fold < extra);
                let range = start..start + len;
                start += len;
                range
            })
            .collect())
    }

    /// Score a fresh copy of `model` on each held-out fold
    pub fn cross_validate<R>(&self, model: &R, x: &Mat<f64>, y: &[f64]) -> Result<Vec<f64>>
    where
        R: Regressor + Clone,
    {
        let n = x.nrows();
        if y.len() != n {
            return Err(PrepError::Model(format!(
                "feature rows ({}) and target length ({}) differ",
                n,
                y.len()
            )));
        }

        let mut scores = Vec::with_capacity(self.folds);
        for test in self.fold_ranges(n)? {
            let train_rows: Vec<usize> = (0..n).filter(|i| !test.contains(i)).collect();
            let test_rows: Vec<usize> = test.collect();

            let mut fold_model = model.clone();
            fold_model.fit(&select_rows(x, &train_rows), &select_values(y, &train_rows))?;
            scores.push(fold_model.score(&select_rows(x, &test_rows), &select_values(y, &test_rows))?);
        }

        Ok(scores)
    }

    /// Mean of the per-fold scores
    pub fn mean_score<R>(&self, model: &R, x: &Mat<f64>, y: &[f64]) -> Result<f64>
    where
        R: Regressor + Clone,
    {
        let scores = self.cross_validate(model, x, y)?;
        Ok(scores.iter().sum::<f64>() / scores.len() as f64)
    }
}

/// Copy of the given columns of `x`, in the given order
pub(crate) fn select_columns(x: &Mat<f64>, columns: &[usize]) -> Mat<f64> {
    Mat::from_fn(x.nrows(), columns.len(), |i, j| x[(i, columns[j])])
}

fn select_rows(x: &Mat<f64>, rows: &[usize]) -> Mat<f64> {
    Mat::from_fn(rows.len(), x.ncols(), |i, j| x[(rows[i], j)])
}

fn select_values(y: &[f64], rows: &[usize]) -> Vec<f64> {
    rows.iter().map(|&i| y[i]).collect()
}

/// Build a row-major sample matrix from complete numeric columns
pub fn frame_to_matrix(df: &DataFrame, columns: &[String]) -> Result<Mat<f64>> {
    let values: Vec<Vec<f64>> = columns
        .iter()
        .map(|name| complete_values(df, name))
        .collect::<Result<_>>()?;

    Ok(Mat::from_fn(df.height(), columns.len(), |i, j| values[j][i]))
}
