//! Advising data ingestion utilities.
//!
//! This crate discovers and loads per-location spreadsheet exports (CSV) into
//! Polars DataFrames. It deliberately does no reconciliation: every column is
//! loaded as text, and schema work happens in `adv-transform`.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use adv_ingest::{discover_location_files, read_csv_table};
//!
//! for file in discover_location_files(Path::new("exports/fall"))? {
//!     let df = read_csv_table(&file.path)?;
//!     println!("{}: {} rows", file.location, df.height());
//! }
//! ```

mod csv;
mod discovery;
mod error;
mod polars_utils;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::read_csv_table;

// === File Discovery ===
pub use discovery::{
    LocationFile, discover_location_files, list_csv_files, location_label, read_csv_dir,
};

// === Value Helpers ===
pub use polars_utils::{any_to_opt_string, any_to_string, format_numeric, parse_i64};
