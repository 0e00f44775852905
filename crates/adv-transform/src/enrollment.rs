//! Term selection and enrollment transition labelling.

use std::collections::HashSet;

use polars::prelude::DataFrame;
use tracing::{info, warn};

use adv_ingest::parse_i64;
use adv_model::EnrollmentStatus;
use adv_model::retention::{ENROLLED, RESIDENCY, RESIDENCY_ALIAS, STUDENT_ID, TERM};

use crate::data_utils::{filter_rows, find_column, require_column, require_values, text_column};
use crate::error::Result;

/// Keep the rows of a multi-term extract that belong to `term`.
///
/// A `RESD` column is renamed to `RESCODE` unless the extract already has one.
pub fn select_term(df: &DataFrame, term: i64) -> Result<DataFrame> {
    let context = format!("term {term}");
    let term_column = require_column(df, TERM, &context)?;
    let values = require_values(df, &term_column, &context)?;
    let keep: Vec<bool> = values
        .iter()
        .map(|value| value.as_deref().and_then(parse_i64) == Some(term))
        .collect();
    let mut selected = filter_rows(df, &keep)?;

    if let Some(resd) = find_column(&selected, RESIDENCY_ALIAS) {
        if find_column(&selected, RESIDENCY).is_some() {
            warn!(term, "extract has both {RESIDENCY_ALIAS} and {RESIDENCY}, keeping both");
        } else {
            selected.rename(&resd, RESIDENCY.into())?;
        }
    }

    info!(term, rows = selected.height(), "selected term");
    Ok(selected)
}

fn student_ids(df: &DataFrame, context: &str) -> Result<Vec<Option<String>>> {
    let column = require_column(df, STUDENT_ID, context)?;
    let values = require_values(df, &column, context)?;
    Ok(values
        .into_iter()
        .map(|value| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        })
        .collect())
}

/// Label each previous-term row `Enrolled` when its ID appears in `upcoming`.
///
/// The output is `previous` with an `ENROLLED` column appended; row count and
/// the original column names are preserved.
pub fn compare_enrollment(previous: &DataFrame, upcoming: &DataFrame) -> Result<DataFrame> {
    let previous_ids = student_ids(previous, "previous term")?;
    let upcoming_ids: HashSet<String> = student_ids(upcoming, "upcoming term")?
        .into_iter()
        .flatten()
        .collect();

    let statuses: Vec<EnrollmentStatus> = previous_ids
        .iter()
        .map(|id| match id {
            Some(id) if upcoming_ids.contains(id) => EnrollmentStatus::Enrolled,
            _ => EnrollmentStatus::NotEnrolled,
        })
        .collect();
    let retained = statuses
        .iter()
        .filter(|status| **status == EnrollmentStatus::Enrolled)
        .count();

    let mut labelled = previous.clone();
    labelled.with_column(text_column(
        ENROLLED,
        statuses.iter().map(ToString::to_string).collect(),
    ))?;

    info!(
        previous = previous.height(),
        upcoming = upcoming.height(),
        retained,
        "compared enrollment"
    );
    Ok(labelled)
}
