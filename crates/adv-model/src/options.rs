//! Configuration options for pipeline runs.

use std::ops::Range;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::schema::{DEFAULT_INDICATOR_RANGE, INDICATOR_MARKERS, TRUTHY_MARKERS};

/// Reference date that contact-ID day offsets are counted from.
pub const DEFAULT_ID_EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(1900, 1, 1) {
    Some(date) => date,
    None => panic!("invalid epoch"),
};

/// How unparseable `DATE` cells are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateParseMode {
    /// Abort the batch on the first unparseable date.
    #[default]
    Strict,
    /// Replace unparseable dates with null and keep going.
    Lossy,
}

/// Options controlling normalization and ID derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Date coercion policy for the `DATE` column.
    pub date_mode: DateParseMode,

    /// Day zero for contact-ID derivation.
    pub id_epoch: NaiveDate,

    /// Canonical positions whose cells are restricted to `indicator_markers`.
    pub indicator_range: Range<usize>,

    /// Values allowed in governed indicator cells; anything else becomes `""`.
    pub indicator_markers: Vec<String>,

    /// Values that count as "set" when collapsing indicator columns.
    pub truthy_markers: Vec<String>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            date_mode: DateParseMode::Strict,
            id_epoch: DEFAULT_ID_EPOCH,
            indicator_range: DEFAULT_INDICATOR_RANGE,
            indicator_markers: INDICATOR_MARKERS.iter().map(ToString::to_string).collect(),
            truthy_markers: TRUTHY_MARKERS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date_mode(mut self, mode: DateParseMode) -> Self {
        self.date_mode = mode;
        self
    }

    pub fn with_id_epoch(mut self, epoch: NaiveDate) -> Self {
        self.id_epoch = epoch;
        self
    }

    /// Parses options from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|source| ModelError::ConfigParse {
            path: None,
            source,
        })
    }

    /// Loads options from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ModelError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ModelError::ConfigParse {
            path: Some(path.to_path_buf()),
            source,
        })
    }

    pub fn is_indicator_marker(&self, value: &str) -> bool {
        self.indicator_markers.iter().any(|marker| marker == value)
    }

    pub fn is_truthy_marker(&self, value: &str) -> bool {
        self.truthy_markers.iter().any(|marker| marker == value)
    }
}
