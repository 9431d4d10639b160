//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// amesprep - Clean, compress and select features from the Ames housing data
#[derive(Parser, Debug)]
#[command(name = "amesprep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Show debug diagnostics for every pipeline step
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clean the raw table (and optionally compress its categories) and save it
    Clean {
        /// Input file path (CSV or Parquet)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (CSV or Parquet, determined by extension).
        /// Defaults to input directory with '_clean' suffix (e.g., ames.csv -> ames_clean.csv).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Collapse categorical columns into their curated groups after cleaning
        #[arg(long, default_value = "false")]
        compress: bool,

        /// One-hot encode the text columns of the result (implies --compress)
        #[arg(long, default_value = "false")]
        one_hot: bool,

        /// Number of rows to use for schema inference (CSV only).
        /// Use 0 for full table scan.
        #[arg(long, default_value = "10000")]
        infer_schema_length: usize,
    },

    /// Greedily drop linearly redundant numeric features
    Select {
        /// Input file path (CSV or Parquet)
        #[arg(short, long)]
        input: PathBuf,

        /// Target column name
        #[arg(short, long, default_value = "SalePrice")]
        target: String,

        /// Number of cross-validation folds
        #[arg(long, default_value = "5", value_parser = validate_folds)]
        folds: usize,

        /// Write the selection result to this JSON file
        #[arg(long)]
        export: Option<PathBuf>,

        /// Number of rows to use for schema inference (CSV only).
        /// Use 0 for full table scan.
        #[arg(long, default_value = "10000")]
        infer_schema_length: usize,
    },

    /// Show how well each numeric column is predicted by the others
    Dependence {
        /// Input file path (CSV or Parquet)
        #[arg(short, long)]
        input: PathBuf,

        /// Restrict the analysis to these columns (comma-separated)
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,

        /// Number of rows to use for schema inference (CSV only).
        /// Use 0 for full table scan.
        #[arg(long, default_value = "10000")]
        infer_schema_length: usize,
    },

    /// Format the text tables of a fitted regression summary
    Report {
        /// File holding the overall statistics table
        #[arg(long)]
        overall: PathBuf,

        /// File holding the per-coefficient table
        #[arg(long)]
        coefficients: Option<PathBuf>,
    },
}

/// Output path next to `input`, with `suffix` appended to the file stem.
pub fn derive_output_path(input: &Path, suffix: &str) -> PathBuf {
    let parent = input.parent().unwrap_or_else(|| Path::new("."));
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("parquet");
    parent.join(format!("{}{}.{}", stem, suffix, extension))
}

/// Validator for the folds parameter
fn validate_folds(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value < 2 {
        Err(format!("folds must be at least 2, got {}", value))
    } else {
        Ok(value)
    }
}
