//! Error types for the preparation pipeline.
//!
//! Every variant is fatal: a failed check means the input no longer matches
//! the Ames schema the pipeline was written against, so callers fix the input
//! instead of recovering.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised by cleaning, compression, selection and report parsing.
#[derive(Debug, Error)]
pub enum PrepError {
    /// A missing-value justification or redundancy identity failed.
    #[error("Schema violation in '{check}': {detail}")]
    SchemaViolation { check: String, detail: String },

    /// A 5-point rating column held a label outside Po/Fa/TA/Gd/Ex.
    #[error("Unknown rating '{value}' in column '{column}'")]
    UnknownRating { column: String, value: String },

    /// A value outside the closed vocabulary of a category compression.
    #[error("Unrecognized category '{value}' in column '{column}'")]
    UnrecognizedCategory { column: String, value: String },

    /// A coefficient table term with no transformer-reported name.
    #[error("No feature name for model term '{term}'")]
    UnknownTerm { term: String },

    /// Text or transformer output did not match the expected layout.
    #[error("Format error: {0}")]
    Format(String),

    /// A required column is absent from the table.
    #[error("Column '{0}' not found")]
    MissingColumn(String),

    /// The modeling path received a column with null values.
    #[error("Column '{column}' contains missing values")]
    MissingValues { column: String },

    /// Least-squares fit or cross-validation could not run.
    #[error("Model error: {0}")]
    Model(String),

    /// Regex compilation error.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Error from the DataFrame library.
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

impl PrepError {
    pub(crate) fn violation(check: &str, detail: impl Into<String>) -> Self {
        PrepError::SchemaViolation {
            check: check.to_string(),
            detail: detail.into(),
        }
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PrepError>;
