//! Cleaning of the raw Ames table
//!
//! Cleaning is an ordered list of named steps. Later steps rely on the columns
//! earlier steps filled or removed, so the order in [`CLEANING_STEPS`] is part
//! of the contract. Each step takes the shared [`CleaningState`] and can be run
//! on its own in tests.
//!
//! Missing values are only filled where a companion column proves the feature
//! is absent; every such assumption is checked on all rows first and a failed
//! check aborts cleaning with [`PrepError::SchemaViolation`].

use polars::prelude::*;
use regex::Regex;

use super::columns::{classify_columns, ColumnGroups};
use super::error::{PrepError, Result};
use super::frame::{
    column_names, float_values, put_column, remove_column, require_column, text_values,
};

/// Sentinel for "this structural feature is absent"
pub const NONE_CATEGORY: &str = "none";

/// Engineered basement feature replacing `BsmtQual`
pub const BASEMENT_QUALITY_AREA: &str = "TotBsmtSF*Qual";

/// Basement sub-area columns (BsmtFinSF1, BsmtFinSF2, BsmtUnfSF)
const BASEMENT_AREA_PATTERN: &str = r"Bsmt.+SF";

/// Rating columns without a useful linear relation to the sale price
const WEAK_RATINGS: [&str; 5] = ["BsmtCond", "FireplaceQu", "GarageQual", "GarageCond", "PoolQC"];

/// Tolerance for the additive identities between area columns
const IDENTITY_TOLERANCE: f64 = 1e-6;

/// Cleaned table plus the group membership of its columns
#[derive(Debug, Clone)]
pub struct CleanedTable {
    pub frame: DataFrame,
    pub groups: ColumnGroups,
}

/// Working state threaded through the cleaning steps
#[derive(Debug, Clone)]
pub struct CleaningState {
    pub frame: DataFrame,
    pub groups: ColumnGroups,
}

impl CleaningState {
    /// Start from an owned copy of the caller's frame
    pub fn new(frame: DataFrame) -> Self {
        Self {
            frame,
            groups: ColumnGroups::default(),
        }
    }

    /// State with groups already classified, for running single steps
    pub fn classified(frame: DataFrame) -> Self {
        let groups = classify_columns(&frame);
        Self { frame, groups }
    }
}

impl From<CleaningState> for CleanedTable {
    fn from(state: CleaningState) -> Self {
        Self {
            frame: state.frame,
            groups: state.groups,
        }
    }
}

/// A named cleaning step
pub struct CleaningStep {
    pub name: &'static str,
    pub run: fn(&mut CleaningState) -> Result<()>,
}

/// Cleaning steps in execution order
pub const CLEANING_STEPS: &[CleaningStep] = &[
    CleaningStep { name: "deduplicate", run: deduplicate },
    CleaningStep { name: "classify", run: classify },
    CleaningStep { name: "fill_areas", run: fill_areas },
    CleaningStep { name: "encode_ratings", run: encode_ratings },
    CleaningStep { name: "merge_rare_sale_type", run: merge_rare_sale_type },
    CleaningStep { name: "fill_dollar_and_counts", run: fill_dollar_and_counts },
    CleaningStep { name: "check_categorical_absence", run: check_categorical_absence },
    CleaningStep { name: "fill_categoricals", run: fill_categoricals },
    CleaningStep { name: "check_rating_absence", run: check_rating_absence },
    CleaningStep { name: "drop_redundant_totals", run: drop_redundant_totals },
    CleaningStep { name: "drop_weak_ratings", run: drop_weak_ratings },
    CleaningStep { name: "basement_quality_area", run: basement_quality_area },
    CleaningStep { name: "drop_garage_year", run: drop_garage_year },
    CleaningStep { name: "restrict_groups", run: restrict_groups },
];

/// Clean a raw Ames table. The input frame is left untouched.
pub fn clean(df: &DataFrame) -> Result<CleanedTable> {
    let mut state = CleaningState::new(df.clone());

    for step in CLEANING_STEPS {
        log::debug!("cleaning step '{}' ({} columns)", step.name, state.frame.width());
        (step.run)(&mut state)?;
    }

    Ok(state.into())
}

/// Map a 5-point rating label to its ordinal value
pub fn rating_score(label: &str) -> Option<f64> {
    match label {
        "Po" => Some(0.0),
        "Fa" => Some(1.0),
        "TA" => Some(2.0),
        "Gd" => Some(3.0),
        "Ex" => Some(4.0),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// Remove exact duplicate rows, keeping the first occurrence
pub fn deduplicate(state: &mut CleaningState) -> Result<()> {
    let before = state.frame.height();
    state.frame = state
        .frame
        .clone()
        .lazy()
        .unique_stable(None, UniqueKeepStrategy::First)
        .collect()?;

    let removed = before - state.frame.height();
    if removed > 0 {
        log::info!("removed {} duplicate row(s)", removed);
    }
    Ok(())
}

pub fn classify(state: &mut CleaningState) -> Result<()> {
    state.groups = classify_columns(&state.frame);
    Ok(())
}

/// A missing area or frontage means the feature is absent: 0 sq ft / 0 ft
pub fn fill_areas(state: &mut CleaningState) -> Result<()> {
    let columns: Vec<String> = state
        .groups
        .areas
        .iter()
        .chain(state.groups.frontage.iter())
        .cloned()
        .collect();

    for name in &columns {
        fill_zero(&mut state.frame, name)?;
    }
    Ok(())
}

/// Po/Fa/TA/Gd/Ex become 0..4; missing stays missing
pub fn encode_ratings(state: &mut CleaningState) -> Result<()> {
    for name in state.groups.inspect5pt.clone() {
        let encoded = text_values(&state.frame, &name)?
            .into_iter()
            .map(|v| match v {
                None => Ok(None),
                Some(label) => rating_score(&label).map(Some).ok_or_else(|| {
                    PrepError::UnknownRating {
                        column: name.clone(),
                        value: label,
                    }
                }),
            })
            .collect::<Result<Vec<Option<f64>>>>()?;
        put_column(&mut state.frame, &name, encoded)?;
    }
    Ok(())
}

/// Very few VWD sales; fold them into "Oth"
pub fn merge_rare_sale_type(state: &mut CleaningState) -> Result<()> {
    replace_text(&mut state.frame, "SaleType", "VWD", "Oth")
}

/// Dollar values, basement baths and garage capacity are only missing when
/// the feature does not exist
pub fn fill_dollar_and_counts(state: &mut CleaningState) -> Result<()> {
    let df = &state.frame;
    ensure_implies(
        "misc value",
        &null_mask(df, "MiscVal")?,
        &null_mask(df, "MiscFeature")?,
        "have MiscVal missing but a MiscFeature present",
    )?;
    for name in state.groups.miscval.clone() {
        fill_zero(&mut state.frame, &name)?;
    }

    for bath in ["BsmtFullBath", "BsmtHalfBath"] {
        ensure_missing_means_zero(&state.frame, "basement baths", bath, "TotalBsmtSF")?;
    }
    for bath in ["BsmtFullBath", "BsmtHalfBath"] {
        fill_zero(&mut state.frame, bath)?;
    }

    ensure_missing_means_zero(&state.frame, "garage capacity", "GarageCars", "GarageArea")?;
    fill_zero(&mut state.frame, "GarageCars")
}

/// Missing categoricals must line up with an absent structure
pub fn check_categorical_absence(state: &mut CleaningState) -> Result<()> {
    let checks = [
        ("misc feature", "MiscFeature", "MiscVal"),
        ("garage finish", "GarageFinish", "GarageArea"),
        ("garage type", "GarageType", "GarageArea"),
        ("basement finish 1", "BsmtFinType1", "TotalBsmtSF"),
        ("basement finish 2", "BsmtFinType2", "TotalBsmtSF"),
        ("basement exposure", "BsmtExposure", "TotalBsmtSF"),
        ("masonry veneer", "MasVnrType", "MasVnrArea"),
    ];

    for (check, missing, companion) in checks {
        ensure_missing_means_zero(&state.frame, check, missing, companion)?;
    }
    Ok(())
}

/// Remaining categorical nulls become the "none" category
pub fn fill_categoricals(state: &mut CleaningState) -> Result<()> {
    for name in state.groups.categoricals.clone() {
        if require_column(&state.frame, &name)?.null_count() == 0 {
            continue;
        }
        let filled: Vec<String> = text_values(&state.frame, &name)?
            .into_iter()
            .map(|v| v.unwrap_or_else(|| NONE_CATEGORY.to_string()))
            .collect();
        put_column(&mut state.frame, &name, filled)?;
    }

    replace_text(&mut state.frame, "MasVnrType", "None", NONE_CATEGORY)
}

/// Missing ratings must line up with an absent structure
pub fn check_rating_absence(state: &mut CleaningState) -> Result<()> {
    let df = &state.frame;

    ensure_same(
        "basement ratings",
        &null_mask(df, "BsmtQual")?,
        &null_mask(df, "BsmtCond")?,
        "where only one of BsmtQual and BsmtCond is missing",
    )?;
    ensure_missing_means_zero(df, "basement quality", "BsmtQual", "TotalBsmtSF")?;
    ensure_missing_means_zero(df, "fireplace quality", "FireplaceQu", "Fireplaces")?;

    let no_garage = zero_mask(df, "GarageArea")?;
    ensure_same(
        "garage year",
        &null_mask(df, "GarageYrBlt")?,
        &no_garage,
        "where GarageYrBlt being missing disagrees with GarageArea being 0",
    )?;
    ensure_missing_means_zero(df, "pool quality", "PoolQC", "PoolArea")?;
    ensure_same(
        "garage condition",
        &null_mask(df, "GarageCond")?,
        &no_garage,
        "where GarageCond being missing disagrees with GarageArea being 0",
    )
}

/// Drop totals that are sums of retained columns
pub fn drop_redundant_totals(state: &mut CleaningState) -> Result<()> {
    remove_column(&mut state.frame, "TotRmsAbvGrd")?;

    let basement = basement_area_sum(&state.frame)?;
    ensure_identity(
        "basement total",
        &float_values(&state.frame, "TotalBsmtSF")?,
        &basement,
        "TotalBsmtSF is not the sum of the basement areas",
    )?;
    remove_column(&mut state.frame, "TotalBsmtSF")?;

    let floors = sum_columns(&state.frame, &["1stFlrSF", "2ndFlrSF", "LowQualFinSF"])?;
    ensure_identity(
        "living area",
        &float_values(&state.frame, "GrLivArea")?,
        &floors,
        "GrLivArea is not 1stFlrSF + 2ndFlrSF + LowQualFinSF",
    )?;
    remove_column(&mut state.frame, "GrLivArea")
}

pub fn drop_weak_ratings(state: &mut CleaningState) -> Result<()> {
    for name in WEAK_RATINGS {
        remove_column(&mut state.frame, name)?;
    }
    Ok(())
}

/// Replace `BsmtQual` with quality (missing as 0) times basement area
pub fn basement_quality_area(state: &mut CleaningState) -> Result<()> {
    let area = basement_area_sum(&state.frame)?;
    let weighted: Vec<f64> = float_values(&state.frame, "BsmtQual")?
        .into_iter()
        .zip(area)
        .map(|(quality, area)| quality.unwrap_or(0.0) * area)
        .collect();

    put_column(&mut state.frame, BASEMENT_QUALITY_AREA, weighted)?;
    state.groups.areas.push(BASEMENT_QUALITY_AREA.to_string());
    remove_column(&mut state.frame, "BsmtQual")
}

/// Garage year is largely predicted by the house's own dates
pub fn drop_garage_year(state: &mut CleaningState) -> Result<()> {
    remove_column(&mut state.frame, "GarageYrBlt")
}

pub fn restrict_groups(state: &mut CleaningState) -> Result<()> {
    state.groups = state.groups.restrict_to(&state.frame);
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn fill_zero(df: &mut DataFrame, name: &str) -> Result<()> {
    let filled: Vec<f64> = float_values(df, name)?
        .into_iter()
        .map(|v| v.unwrap_or(0.0))
        .collect();
    put_column(df, name, filled)
}

fn replace_text(df: &mut DataFrame, name: &str, from: &str, to: &str) -> Result<()> {
    let replaced: Vec<Option<String>> = text_values(df, name)?
        .into_iter()
        .map(|v| v.map(|s| if s == from { to.to_string() } else { s }))
        .collect();
    put_column(df, name, replaced)
}

/// True where the value is null
fn null_mask(df: &DataFrame, name: &str) -> Result<Vec<bool>> {
    let mask = require_column(df, name)?
        .as_materialized_series()
        .is_null();
    Ok((&mask).into_iter().map(|v| v.unwrap_or(false)).collect())
}

/// True where the value is 0; a null counts as 0
fn zero_mask(df: &DataFrame, name: &str) -> Result<Vec<bool>> {
    Ok(float_values(df, name)?
        .into_iter()
        .map(|v| v.map_or(true, |x| x == 0.0))
        .collect())
}

fn ensure_missing_means_zero(df: &DataFrame, check: &str, missing: &str, companion: &str) -> Result<()> {
    ensure_implies(
        check,
        &null_mask(df, missing)?,
        &zero_mask(df, companion)?,
        &format!("have {} missing but {} non-zero", missing, companion),
    )
}

/// Every row flagged in `premise` must be flagged in `conclusion`
fn ensure_implies(check: &str, premise: &[bool], conclusion: &[bool], what: &str) -> Result<()> {
    let violations = premise
        .iter()
        .zip(conclusion)
        .filter(|(p, c)| **p && !**c)
        .count();

    if violations > 0 {
        return Err(PrepError::violation(check, format!("{} row(s) {}", violations, what)));
    }
    Ok(())
}

fn ensure_same(check: &str, left: &[bool], right: &[bool], what: &str) -> Result<()> {
    let violations = left.iter().zip(right).filter(|(l, r)| l != r).count();

    if violations > 0 {
        return Err(PrepError::violation(check, format!("{} row(s) {}", violations, what)));
    }
    Ok(())
}

fn ensure_identity(check: &str, total: &[Option<f64>], parts: &[f64], what: &str) -> Result<()> {
    let violations = total
        .iter()
        .zip(parts)
        .filter(|(t, p)| t.map_or(true, |t| (t - **p).abs() > IDENTITY_TOLERANCE))
        .count();

    if violations > 0 {
        return Err(PrepError::violation(check, format!("{} on {} row(s)", what, violations)));
    }
    Ok(())
}

/// Row sums of the given columns, nulls contributing 0
fn sum_columns(df: &DataFrame, names: &[&str]) -> Result<Vec<f64>> {
    let mut sums = vec![0.0; df.height()];
    for name in names {
        for (sum, v) in sums.iter_mut().zip(float_values(df, name)?) {
            *sum += v.unwrap_or(0.0);
        }
    }
    Ok(sums)
}

fn basement_area_sum(df: &DataFrame) -> Result<Vec<f64>> {
    let pattern = Regex::new(BASEMENT_AREA_PATTERN)?;
    let names: Vec<String> = column_names(df)
        .into_iter()
        .filter(|name| pattern.is_match(name))
        .collect();
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    sum_columns(df, &names)
}
