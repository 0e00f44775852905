//! Pipeline option resolution: defaults, then the config file, then flags.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::debug;

use adv_model::{DateParseMode, PipelineOptions};

/// Command-line overrides applied on top of the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptionOverrides {
    pub lossy_dates: bool,
    pub epoch: Option<NaiveDate>,
}

pub fn resolve_options(config: Option<&Path>, overrides: OptionOverrides) -> Result<PipelineOptions> {
    let mut options = match config {
        Some(path) => PipelineOptions::from_toml_file(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => PipelineOptions::default(),
    };
    if overrides.lossy_dates {
        options = options.with_date_mode(DateParseMode::Lossy);
    }
    if let Some(epoch) = overrides.epoch {
        options = options.with_id_epoch(epoch);
    }
    debug!(
        date_mode = ?options.date_mode,
        id_epoch = %options.id_epoch,
        indicator_range = ?options.indicator_range,
        "resolved pipeline options"
    );
    Ok(options)
}
