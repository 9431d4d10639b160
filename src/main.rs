//! amesprep: Ames Housing Preparation CLI
//!
//! Cleans the raw Ames table, compresses its categories, and greedily drops
//! linearly redundant features.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use polars::prelude::{DataFrame, DataType};

use amesprep::cli::{derive_output_path, Cli, Commands};
use amesprep::pipeline::{
    clean, compress, estimate_dependence, frame::complete_values, load_dataset,
    recursive_drop_with, save_dataset, transformed_frame, CleanedTable, ColumnGroup,
    CrossValidator, LinearRegression, OneHotEncoder, ID_COLUMN, TARGET_COLUMN,
};
use amesprep::report::{
    coefficient_statistics, display_dependence, display_frame, display_selection,
    overall_statistics, CleaningSummary, SelectionExport, SelectionParams,
};
use amesprep::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_completion,
    print_count, print_info, print_paths, print_step_header, print_step_time, print_success,
};

/// Groups whose columns are numeric after cleaning
const NUMERIC_GROUPS: [ColumnGroup; 7] = [
    ColumnGroup::Areas,
    ColumnGroup::Frontage,
    ColumnGroup::Miscval,
    ColumnGroup::Inspect10pt,
    ColumnGroup::Inspect5pt,
    ColumnGroup::Dates,
    ColumnGroup::Counts,
];

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    print_banner(env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Commands::Clean {
            input,
            output,
            compress,
            one_hot,
            infer_schema_length,
        } => run_clean(
            input,
            output.as_deref(),
            *compress || *one_hot,
            *one_hot,
            *infer_schema_length,
        )?,
        Commands::Select {
            input,
            target,
            folds,
            export,
            infer_schema_length,
        } => run_select(input, target, *folds, export.as_deref(), *infer_schema_length)?,
        Commands::Dependence {
            input,
            columns,
            infer_schema_length,
        } => run_dependence(input, columns, *infer_schema_length)?,
        Commands::Report {
            overall,
            coefficients,
        } => run_report(overall, coefficients.as_deref())?,
    }

    print_completion();
    Ok(())
}

fn load_step(input: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let spinner = create_spinner("Loading dataset...");
    let df = load_dataset(input, infer_schema_length)?;
    finish_with_success(
        &spinner,
        &format!("Loaded {} rows x {} columns", df.height(), df.width()),
    );
    print_step_time(step_start);
    Ok(df)
}

fn prepare_step(raw: &DataFrame, compressed: bool) -> Result<CleanedTable> {
    print_step_header(2, if compressed { "Clean & Compress" } else { "Clean" });
    let step_start = Instant::now();
    let spinner = create_spinner("Checking missing-value assumptions...");
    let prepared = if compressed { compress(raw) } else { clean(raw) };
    let table = match prepared {
        Ok(table) => table,
        Err(e) => {
            finish_with_warning(&spinner, "Input does not match the Ames schema");
            return Err(e).context("Cleaning failed");
        }
    };
    finish_with_success(&spinner, "All missing-value checks passed");
    print_step_time(step_start);
    Ok(table)
}

fn run_clean(
    input: &Path,
    output: Option<&Path>,
    compressed: bool,
    one_hot: bool,
    infer_schema_length: usize,
) -> Result<()> {
    let output_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| derive_output_path(input, "_clean"));
    print_paths(input, None, Some(output_path.as_path()));

    let raw = load_step(input, infer_schema_length)?;
    let table = prepare_step(&raw, compressed)?;
    CleaningSummary::new(&raw, &table.frame, &table.groups).display();

    let mut frame = table.frame;
    if one_hot {
        let text_columns: Vec<String> = frame
            .get_columns()
            .iter()
            .filter(|c| c.dtype() == &DataType::String)
            .map(|c| c.name().to_string())
            .collect();
        let mut encoder = OneHotEncoder::new(text_columns.clone());
        let dummies = transformed_frame(&mut encoder, &frame)?;
        frame = frame
            .drop_many(text_columns.iter().map(String::as_str))
            .hstack(dummies.get_columns())?;
        print_count("text column(s) one-hot encoded", text_columns.len());
    }

    print_step_header(3, "Save Results");
    let spinner = create_spinner("Writing output file...");
    save_dataset(&mut frame, &output_path)?;
    finish_with_success(&spinner, &format!("Saved to {}", output_path.display()));
    Ok(())
}

/// Complete numeric feature columns of the compressed table
fn numeric_candidates(table: &CleanedTable, target: &str) -> (Vec<String>, Vec<String>) {
    let mut candidates = Vec::new();
    let mut incomplete = Vec::new();

    for group in NUMERIC_GROUPS {
        for name in table.groups.get(group) {
            if name == target || name == ID_COLUMN {
                continue;
            }
            let Ok(column) = table.frame.column(name) else {
                continue;
            };
            if !column.dtype().is_primitive_numeric() {
                continue;
            }
            if column.null_count() > 0 {
                incomplete.push(name.clone());
            } else {
                candidates.push(name.clone());
            }
        }
    }

    (candidates, incomplete)
}

fn run_select(
    input: &Path,
    target: &str,
    folds: usize,
    export: Option<&Path>,
    infer_schema_length: usize,
) -> Result<()> {
    print_paths(input, Some(target), export);

    let raw = load_step(input, infer_schema_length)?;
    let table = prepare_step(&raw, true)?;

    let (candidates, incomplete) = numeric_candidates(&table, target);
    if !incomplete.is_empty() {
        print_info(&format!(
            "Skipping {} numeric column(s) with missing values: {}",
            incomplete.len(),
            incomplete.join(", ")
        ));
    }
    print_count("numeric candidate feature(s)", candidates.len());

    let y = complete_values(&table.frame, target)
        .with_context(|| format!("Target column '{}' must be numeric and complete", target))?;
    let x = table.frame.select(candidates.iter().map(String::as_str))?;

    print_step_header(3, "Recursive Dropping");
    let step_start = Instant::now();
    let initial_dependence = estimate_dependence(&x, None)?;
    let validator = CrossValidator::new(folds);
    let spinner = create_spinner("Scoring baseline...");
    let model = LinearRegression::new();
    let outcome = recursive_drop_with(&x, &y, &model, &validator, |feature, score| {
        spinner.set_message(format!("Dropped {} (CV R² {:.5})", feature, score));
    })?;
    finish_with_success(
        &spinner,
        &format!("Selection finished after {} drop(s)", outcome.dropped.len()),
    );
    print_step_time(step_start);

    display_selection(&outcome, candidates.len());

    if let Some(path) = export {
        let params = SelectionParams {
            input_file: &input.display().to_string(),
            target_column: target,
            folds,
        };
        SelectionExport::new(&params, &table.groups, &candidates, initial_dependence, outcome)
            .write(path)?;
        print_success(&format!("Exported selection to {}", path.display()));
    }
    Ok(())
}

fn run_dependence(input: &Path, columns: &[String], infer_schema_length: usize) -> Result<()> {
    print_paths(input, None, None);

    let raw = load_step(input, infer_schema_length)?;
    let table = prepare_step(&raw, true)?;

    let (candidates, _) = numeric_candidates(&table, TARGET_COLUMN);
    let selected = if columns.is_empty() { candidates } else { columns.to_vec() };
    let scores = estimate_dependence(&table.frame, Some(&selected))?;
    display_dependence(&scores);
    Ok(())
}

fn run_report(overall: &Path, coefficients: Option<&Path>) -> Result<()> {
    let text = std::fs::read_to_string(overall)
        .with_context(|| format!("Failed to read {}", overall.display()))?;
    display_frame("REGRESSION RESULTS", &overall_statistics(&text)?)?;

    if let Some(path) = coefficients {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        display_frame("COEFFICIENTS", &coefficient_statistics(&text, None)?)?;
    }
    Ok(())
}
