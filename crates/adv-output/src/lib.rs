//! Flat-file export of pipeline results.
//!
//! Dashboards read a single CSV per dataset. Exports overwrite any previous
//! file at the destination and create missing parent directories.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use polars::prelude::{CsvWriter, DataFrame, PolarsError, SerWriter};
use thiserror::Error;

/// Text written for null cells unless overridden.
pub const DEFAULT_NULL_VALUE: &str = "";

/// Errors raised while writing an export.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create {path}: {source}")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
}

pub type Result<T> = std::result::Result<T, OutputError>;

/// CSV export settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExportOptions {
    /// Text written for null cells.
    pub null_value: String,
    pub include_header: bool,
}

impl Default for CsvExportOptions {
    fn default() -> Self {
        Self {
            null_value: DEFAULT_NULL_VALUE.to_string(),
            include_header: true,
        }
    }
}

/// Ensure a parent directory exists for a file path.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| OutputError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Write `df` to `path` with default settings.
pub fn write_csv(df: &DataFrame, path: &Path) -> Result<()> {
    write_csv_with(df, path, &CsvExportOptions::default())
}

/// Write `df` to `path`, replacing any existing file.
pub fn write_csv_with(df: &DataFrame, path: &Path, options: &CsvExportOptions) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut file = File::create(path).map_err(|source| OutputError::CreateFile {
        path: path.to_path_buf(),
        source,
    })?;

    let mut frame = df.clone();
    CsvWriter::new(&mut file)
        .include_header(options.include_header)
        .with_null_value(options.null_value.clone())
        .finish(&mut frame)
        .map_err(|source| OutputError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "wrote csv"
    );
    Ok(())
}
