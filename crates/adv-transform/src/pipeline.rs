//! End-to-end builders for each exported dataset.
//!
//! Each builder takes already-loaded tables and returns the final frame; file
//! access stays in the ingest and output crates.

use std::time::Instant;

use polars::prelude::DataFrame;
use tracing::{info, info_span};

use adv_model::{DateParseMode, PipelineOptions};

use crate::data_utils::union_by_name;
use crate::enrollment::{compare_enrollment, select_term};
use crate::error::Result;
use crate::holds::merge_holds;
use crate::identity::derive_contact_ids;
use crate::matriculation::{label_hs_matriculation, prepare_retention_extract};
use crate::normalize::{normalize_location, validate_indicator_range};

/// A raw table tagged with the location it was exported from.
#[derive(Debug, Clone)]
pub struct LocationTable {
    pub location: String,
    pub data: DataFrame,
}

impl LocationTable {
    pub fn new(location: impl Into<String>, data: DataFrame) -> Self {
        Self {
            location: location.into(),
            data,
        }
    }
}

/// Normalize every location, union them, and derive contact IDs.
pub fn build_foot_traffic(tables: &[LocationTable], options: &PipelineOptions) -> Result<DataFrame> {
    let start = Instant::now();
    validate_indicator_range(options, "foot traffic")?;

    let mut normalized = Vec::with_capacity(tables.len());
    for table in tables {
        let _span = info_span!("normalize", location = %table.location).entered();
        normalized.push(normalize_location(&table.data, &table.location, options)?);
    }
    let union = union_by_name(&normalized)?;
    let output = derive_contact_ids(&union, options)?;

    info!(
        locations = tables.len(),
        rows = output.height(),
        duration_ms = start.elapsed().as_millis(),
        "built foot traffic table"
    );
    Ok(output)
}

/// Label previous-term students by upcoming-term enrollment, optionally
/// merging the holds extract.
pub fn build_retention(
    enrollment: &DataFrame,
    previous_term: i64,
    upcoming_term: i64,
    holds: Option<&DataFrame>,
) -> Result<DataFrame> {
    let previous = select_term(enrollment, previous_term)?;
    let upcoming = select_term(enrollment, upcoming_term)?;
    let labelled = compare_enrollment(&previous, &upcoming)?;
    match holds {
        Some(contacts) => merge_holds(&labelled, contacts),
        None => Ok(labelled),
    }
}

/// Union the yearly high-school extracts and label matriculation.
pub fn build_hs_matriculation(extracts: &[DataFrame], date_mode: DateParseMode) -> Result<DataFrame> {
    let combined = union_by_name(extracts)?;
    let prepared = prepare_retention_extract(&combined, date_mode)?;
    label_hs_matriculation(&prepared)
}
