//! Unit tests for dataset loading and saving

use amesprep::pipeline::{clean, load_dataset, save_dataset};
use polars::prelude::*;
use std::io::Write;
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_load_csv_treats_na_as_missing() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "LotFrontage,Alley").unwrap();
    writeln!(file, "80,NA").unwrap();
    writeln!(file, "NA,Grvl").unwrap();
    drop(file);

    let df = load_dataset(&csv_path, 100).unwrap();

    assert_eq!(df.height(), 2);
    assert_eq!(df.get_column_names(), &["LotFrontage", "Alley"]);
    assert_eq!(df.column("LotFrontage").unwrap().null_count(), 1);
    assert_eq!(df.column("Alley").unwrap().null_count(), 1);
    assert!(df.column("LotFrontage").unwrap().dtype().is_primitive_numeric());
}

#[test]
fn test_load_parquet_file() {
    let mut df = df! {
        "x" => [1i32, 2, 3],
        "y" => [4i32, 5, 6],
    }
    .unwrap();
    let (_temp_dir, parquet_path) = common::create_temp_parquet(&mut df);

    let loaded = load_dataset(&parquet_path, 100).unwrap();

    assert_eq!(loaded.shape(), (3, 2));
    assert_eq!(loaded.get_column_names(), &["x", "y"]);
}

#[test]
fn test_unsupported_extension_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("ames.xlsx");
    std::fs::write(&path, "not a table").unwrap();

    let err = load_dataset(&path, 100).unwrap_err();
    assert!(err.to_string().contains("Unsupported file format"));
}

#[test]
fn test_fixture_round_trips_through_csv_and_cleans() {
    let mut raw = common::ames_frame();
    let (_temp_dir, csv_path) = common::create_temp_csv(&mut raw);

    let loaded = load_dataset(&csv_path, 0).unwrap();
    assert_eq!(loaded.shape(), raw.shape());
    assert_eq!(loaded.column("PoolQC").unwrap().null_count(), 7);

    let table = clean(&loaded).unwrap();
    assert_eq!(table.frame.height(), raw.height());
}

#[test]
fn test_save_and_reload_parquet() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("clean.parquet");
    let mut table = clean(&common::ames_frame()).unwrap();

    save_dataset(&mut table.frame, &path).unwrap();
    let reloaded = load_dataset(&path, 100).unwrap();

    assert!(reloaded.equals_missing(&table.frame));
}
