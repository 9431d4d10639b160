//! JSON export of a feature-selection run

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{ColumnGroups, DependenceScore, DropOutcome};

/// Metadata about the selection run
#[derive(Serialize)]
pub struct SelectionMetadata {
    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,
    /// amesprep version
    pub amesprep_version: String,
    /// Input file path
    pub input_file: String,
    /// Target column name
    pub target_column: String,
    /// Cross-validation folds
    pub folds: usize,
}

/// Complete selection export
#[derive(Serialize)]
pub struct SelectionExport {
    pub metadata: SelectionMetadata,
    /// Group membership of the compressed table
    pub groups: ColumnGroups,
    /// Numeric features offered to the selection
    pub candidates: Vec<String>,
    /// Dependence scores of the candidates before any drop
    pub initial_dependence: Vec<DependenceScore>,
    /// Drop list and scores
    pub outcome: DropOutcome,
    /// Candidates that survived
    pub kept: Vec<String>,
}

/// Parameters describing the run, for the export metadata
pub struct SelectionParams<'a> {
    pub input_file: &'a str,
    pub target_column: &'a str,
    pub folds: usize,
}

impl SelectionExport {
    pub fn new(
        params: &SelectionParams,
        groups: &ColumnGroups,
        candidates: &[String],
        initial_dependence: Vec<DependenceScore>,
        outcome: DropOutcome,
    ) -> Self {
        let kept = candidates
            .iter()
            .filter(|c| !outcome.dropped.contains(c))
            .cloned()
            .collect();

        Self {
            metadata: SelectionMetadata {
                timestamp: Utc::now().to_rfc3339(),
                amesprep_version: env!("CARGO_PKG_VERSION").to_string(),
                input_file: params.input_file.to_string(),
                target_column: params.target_column.to_string(),
                folds: params.folds,
            },
            groups: groups.clone(),
            candidates: candidates.to_vec(),
            initial_dependence,
            outcome,
            kept,
        }
    }

    /// Write the export as pretty-printed JSON
    pub fn write(&self, output_path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize selection results")?;
        std::fs::write(output_path, json)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        Ok(())
    }
}
