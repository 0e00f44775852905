//! CSV file reading into string-typed DataFrames.
//!
//! Source spreadsheets are maintained by hand at each location, so no column
//! type is trusted at load time. Every column is read as `String`; typed
//! coercion happens later in the pipeline where failures can be reported
//! against the canonical schema.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};

use crate::error::{IngestError, Result};

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Returns true when the file has at least one non-blank line.
fn has_header_line(path: &Path) -> Result<bool> {
    let reader = BufReader::new(open(path)?);
    for line in reader.lines() {
        let line = line.map_err(|e| IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let cleaned = line.strip_prefix('\u{feff}').unwrap_or(&line);
        if !cleaned.trim().is_empty() {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Reads a CSV file with a single header row; all columns are `String`.
///
/// Empty cells load as null.
pub fn read_csv_table(path: &Path) -> Result<DataFrame> {
    if !has_header_line(path)? {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded csv"
    );

    Ok(df)
}
