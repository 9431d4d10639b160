//! Shared test utilities and fixture generators
#![allow(dead_code)]

use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use tempfile::TempDir;

/// Eight raw Ames sales that satisfy every missing-value assumption.
///
/// - Row 3 has the only pool, row 2 the only misc feature (a shed)
/// - Row 6 has no masonry veneer type, no frontage, no electrical system
///   and a VWD sale
/// - Row 7 has no basement and no garage
/// - Rows 4 and 5 are two-story houses
pub fn ames_frame() -> DataFrame {
    df! {
        "PID" => [526301100i64, 526350040, 526351010, 526353030, 527105010, 527105030, 527127150, 527145080],
        "MSSubClass" => [20i64, 20, 20, 20, 60, 60, 120, 120],
        "MSZoning" => ["RL", "RH", "RL", "RL", "RL", "FV", "RM", "C (all)"],
        "LotFrontage" => [Some(141.0f64), Some(80.0), Some(81.0), Some(93.0), Some(74.0), Some(78.0), None, Some(43.0)],
        "LotArea" => [31770i64, 11622, 14267, 11160, 13830, 9978, 4920, 5005],
        "LotShape" => ["IR1", "Reg", "IR1", "Reg", "IR1", "IR1", "Reg", "IR2"],
        "Neighborhood" => ["NAmes", "NAmes", "NAmes", "NAmes", "Gilbert", "Gilbert", "StoneBr", "StoneBr"],
        "Condition1" => ["Norm", "Feedr", "Norm", "Norm", "Norm", "Norm", "PosN", "Norm"],
        "Condition2" => ["Norm", "Norm", "Norm", "Norm", "Norm", "Norm", "Norm", "Norm"],
        "HouseStyle" => ["1Story", "1Story", "1Story", "1Story", "2Story", "2Story", "1Story", "SLvl"],
        "OverallQual" => [6i64, 5, 6, 7, 5, 6, 8, 8],
        "OverallCond" => [5i64, 6, 6, 5, 5, 6, 5, 5],
        "YearBuilt" => [1960i64, 1961, 1958, 1968, 1997, 1998, 2001, 1992],
        "Exterior1st" => ["BrkFace", "VinylSd", "Wd Sdng", "BrkFace", "VinylSd", "VinylSd", "CemntBd", "HdBoard"],
        "Exterior2nd" => ["Plywood", "VinylSd", "Wd Sdng", "BrkFace", "VinylSd", "VinylSd", "CmentBd", "HdBoard"],
        "MasVnrType" => [Some("Stone"), Some("None"), Some("BrkFace"), Some("None"), Some("None"), Some("BrkFace"), None, Some("None")],
        "MasVnrArea" => [Some(112.0f64), Some(0.0), Some(108.0), Some(0.0), Some(0.0), Some(20.0), None, Some(0.0)],
        "ExterQual" => ["TA", "TA", "TA", "Gd", "TA", "TA", "Gd", "Gd"],
        "Foundation" => ["CBlock", "CBlock", "CBlock", "CBlock", "PConc", "PConc", "PConc", "PConc"],
        "BsmtQual" => [Some("TA"), Some("TA"), Some("TA"), Some("TA"), Some("Gd"), Some("TA"), Some("Gd"), None],
        "BsmtCond" => [Some("Gd"), Some("TA"), Some("TA"), Some("TA"), Some("TA"), Some("TA"), Some("TA"), None],
        "BsmtExposure" => [Some("Gd"), Some("No"), Some("No"), Some("No"), Some("No"), Some("No"), Some("Mn"), None],
        "BsmtFinType1" => [Some("BLQ"), Some("Rec"), Some("ALQ"), Some("ALQ"), Some("GLQ"), Some("GLQ"), Some("GLQ"), None],
        "BsmtFinSF1" => [639.0f64, 468.0, 923.0, 1065.0, 791.0, 602.0, 616.0, 0.0],
        "BsmtFinType2" => [Some("Unf"), Some("LwQ"), Some("Unf"), Some("Unf"), Some("Unf"), Some("Unf"), Some("Unf"), None],
        "BsmtFinSF2" => [0.0f64, 144.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        "BsmtUnfSF" => [441.0f64, 270.0, 406.0, 1045.0, 137.0, 324.0, 722.0, 0.0],
        "TotalBsmtSF" => [1080.0f64, 882.0, 1329.0, 2110.0, 928.0, 926.0, 1338.0, 0.0],
        "Heating" => ["GasA", "GasA", "GasA", "GasA", "GasA", "GasA", "GasA", "GasW"],
        "HeatingQC" => ["Fa", "TA", "TA", "Ex", "Gd", "Ex", "Ex", "Ex"],
        "Electrical" => [Some("SBrkr"), Some("SBrkr"), Some("SBrkr"), Some("SBrkr"), Some("SBrkr"), Some("SBrkr"), None, Some("FuseA")],
        "1stFlrSF" => [1656i64, 896, 1329, 2110, 928, 926, 1338, 1280],
        "2ndFlrSF" => [0i64, 0, 0, 0, 701, 678, 0, 0],
        "LowQualFinSF" => [0i64, 0, 0, 0, 0, 0, 0, 0],
        "GrLivArea" => [1656i64, 896, 1329, 2110, 1629, 1604, 1338, 1280],
        "BsmtFullBath" => [Some(1.0f64), Some(0.0), Some(0.0), Some(1.0), Some(0.0), Some(0.0), Some(1.0), None],
        "BsmtHalfBath" => [Some(0.0f64), Some(0.0), Some(0.0), Some(0.0), Some(0.0), Some(0.0), Some(0.0), None],
        "FullBath" => [1i64, 1, 1, 2, 2, 2, 2, 2],
        "BedroomAbvGr" => [3i64, 2, 3, 3, 3, 3, 2, 2],
        "KitchenQual" => ["TA", "TA", "Gd", "Ex", "TA", "Gd", "Gd", "Gd"],
        "TotRmsAbvGrd" => [7i64, 5, 6, 8, 6, 7, 6, 5],
        "Functional" => ["Typ", "Typ", "Typ", "Typ", "Typ", "Typ", "Typ", "Min1"],
        "Fireplaces" => [2i64, 0, 0, 2, 1, 1, 0, 0],
        "FireplaceQu" => [Some("Gd"), None, None, Some("TA"), Some("TA"), Some("Gd"), None, None],
        "GarageType" => [Some("Attchd"), Some("Attchd"), Some("Attchd"), Some("Attchd"), Some("Attchd"), Some("Attchd"), Some("Attchd"), None],
        "GarageYrBlt" => [Some(1960.0f64), Some(1961.0), Some(1958.0), Some(1968.0), Some(1997.0), Some(1998.0), Some(2001.0), None],
        "GarageFinish" => [Some("Fin"), Some("Unf"), Some("Unf"), Some("Fin"), Some("Fin"), Some("Fin"), Some("Fin"), None],
        "GarageCars" => [2.0f64, 1.0, 1.0, 2.0, 2.0, 2.0, 2.0, 0.0],
        "GarageArea" => [528.0f64, 730.0, 312.0, 522.0, 482.0, 470.0, 582.0, 0.0],
        "GarageQual" => [Some("TA"), Some("TA"), Some("TA"), Some("TA"), Some("TA"), Some("TA"), Some("TA"), None],
        "GarageCond" => [Some("TA"), Some("TA"), Some("TA"), Some("TA"), Some("TA"), Some("TA"), Some("TA"), None],
        "WoodDeckSF" => [210i64, 140, 393, 0, 212, 360, 0, 0],
        "OpenPorchSF" => [62i64, 0, 36, 0, 34, 36, 0, 82],
        "PoolArea" => [0i64, 0, 0, 144, 0, 0, 0, 0],
        "PoolQC" => [None, None, None, Some("Gd"), None, None, None, None::<&str>],
        "Fence" => [None, Some("MnPrv"), None, None, Some("MnPrv"), None, None, None::<&str>],
        "MiscFeature" => [None, None, Some("Shed"), None, None, None, None, None::<&str>],
        "MiscVal" => [Some(0.0f64), Some(0.0), Some(12500.0), Some(0.0), Some(0.0), Some(0.0), None, Some(0.0)],
        "MoSold" => [5i64, 6, 6, 4, 3, 6, 4, 1],
        "YrSold" => [2010i64, 2010, 2010, 2010, 2010, 2010, 2010, 2010],
        "SaleType" => ["WD ", "WD ", "WD ", "WD ", "WD ", "WD ", "VWD", "New"],
        "SaleCondition" => ["Normal", "Normal", "Normal", "Normal", "Normal", "Normal", "Normal", "Partial"],
        "SalePrice" => [215000i64, 105000, 172000, 244000, 189900, 195500, 213500, 191500],
    }
    .unwrap()
}

/// Copy of `df` with one numeric cell replaced
pub fn set_float(df: &DataFrame, column: &str, row: usize, value: Option<f64>) -> DataFrame {
    let cast = df.column(column).unwrap().cast(&DataType::Float64).unwrap();
    let mut values: Vec<Option<f64>> = cast.f64().unwrap().into_iter().collect();
    values[row] = value;

    let mut out = df.clone();
    out.with_column(Column::new(column.into(), values)).unwrap();
    out
}

/// Copy of `df` with one text cell replaced
pub fn set_text(df: &DataFrame, column: &str, row: usize, value: Option<&str>) -> DataFrame {
    let cast = df.column(column).unwrap().cast(&DataType::String).unwrap();
    let mut values: Vec<Option<String>> = cast
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect();
    values[row] = value.map(|s| s.to_string());

    let mut out = df.clone();
    out.with_column(Column::new(column.into(), values)).unwrap();
    out
}

/// Write `df` to a CSV file using the Ames "NA" null marker
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("ames.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file)
        .with_null_value("NA".to_string())
        .finish(df)
        .unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("ames.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Independent uniform features `x0..x{cols}` from a seeded generator
pub fn random_features(rows: usize, cols: usize, seed: u64) -> DataFrame {
    let mut rng = StdRng::seed_from_u64(seed);

    let columns: Vec<Column> = (0..cols)
        .map(|j| {
            let values: Vec<f64> = (0..rows).map(|_| rng.gen::<f64>()).collect();
            Column::new(format!("x{}", j).into(), values)
        })
        .collect();

    DataFrame::new(columns).unwrap()
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT contain specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column still present: '{}'",
            col
        );
    }
}
