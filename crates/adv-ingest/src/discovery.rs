//! Source file discovery and location labelling.

use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;

use crate::csv::read_csv_table;
use crate::error::{IngestError, Result};

/// A per-location export found in the input directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationFile {
    /// Path to the CSV file.
    pub path: PathBuf,
    /// Location label derived from the file stem (e.g., "BOA").
    pub location: String,
}

/// Lists all CSV files in a directory.
///
/// Returns files sorted by filename.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

        if is_csv {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

/// Derives a location label from a file name: the upper-cased stem.
///
/// `boa.csv` and `BOA.csv` both label as `BOA`.
pub fn location_label(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("")
        .trim()
        .to_uppercase()
}

/// Discovers one export per location in `dir`.
pub fn discover_location_files(dir: &Path) -> Result<Vec<LocationFile>> {
    let files = list_csv_files(dir)?;
    if files.is_empty() {
        return Err(IngestError::NoCsvFiles {
            path: dir.to_path_buf(),
        });
    }
    Ok(files
        .into_iter()
        .map(|path| LocationFile {
            location: location_label(&path),
            path,
        })
        .collect())
}

/// Reads every CSV file in `dir`, in filename order.
pub fn read_csv_dir(dir: &Path) -> Result<Vec<(PathBuf, DataFrame)>> {
    let files = list_csv_files(dir)?;
    if files.is_empty() {
        return Err(IngestError::NoCsvFiles {
            path: dir.to_path_buf(),
        });
    }
    let mut tables = Vec::with_capacity(files.len());
    for path in files {
        let df = read_csv_table(&path)?;
        tables.push((path, df));
    }
    Ok(tables)
}
