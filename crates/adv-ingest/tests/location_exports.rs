//! Integration tests for loading a directory of location exports.

use std::fs;

use adv_ingest::{IngestError, any_to_opt_string, discover_location_files, read_csv_dir, read_csv_table};
use polars::prelude::*;
use tempfile::TempDir;

const BOA: &str = "DATE,#,NAME,\"TIME\nIN\",APPT\n1/5/2023,1,Ann,9:30 AM,x\n1/5/2023,2,Bob,,\n";
const BOE: &str = "DATE,#,NAME,TIME OF CONTACT,APPT\n2023-01-05,1,Cy,13:05,Zoom\n";

fn export_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("boe.csv"), BOE).unwrap();
    fs::write(dir.path().join("BOA.CSV"), BOA).unwrap();
    fs::write(dir.path().join("readme.txt"), "not a table").unwrap();
    fs::create_dir(dir.path().join("archive.csv")).unwrap();
    dir
}

#[test]
fn discovers_locations_sorted_by_name() {
    let dir = export_dir();
    let files = discover_location_files(dir.path()).unwrap();
    let labels: Vec<&str> = files.iter().map(|f| f.location.as_str()).collect();
    assert_eq!(labels, vec!["BOA", "BOE"]);
}

#[test]
fn loads_every_column_as_text() {
    let dir = export_dir();
    let tables = read_csv_dir(dir.path()).unwrap();
    assert_eq!(tables.len(), 2);

    let (_, boa) = &tables[0];
    assert_eq!(boa.height(), 2);
    assert!(boa.get_columns().iter().all(|c| c.dtype() == &DataType::String));
    assert!(boa.column("TIME\nIN").is_ok());

    // Empty cells load as null.
    let time = boa.column("TIME\nIN").unwrap();
    assert_eq!(any_to_opt_string(time.get(1).unwrap()), None);
    let seq = boa.column("#").unwrap();
    assert_eq!(any_to_opt_string(seq.get(0).unwrap()).as_deref(), Some("1"));
}

#[test]
fn single_table_read() {
    let dir = export_dir();
    let df = read_csv_table(&dir.path().join("boe.csv")).unwrap();
    assert_eq!(df.shape(), (1, 5));
}

#[test]
fn empty_directory_is_reported() {
    let dir = TempDir::new().unwrap();
    let err = discover_location_files(dir.path()).unwrap_err();
    assert!(matches!(err, IngestError::NoCsvFiles { .. }));
}

#[test]
fn missing_directory_is_reported() {
    let dir = TempDir::new().unwrap();
    let err = discover_location_files(&dir.path().join("nope")).unwrap_err();
    assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
}
