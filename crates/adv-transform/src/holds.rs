//! Hold resolution and the contact/hold merge.
//!
//! The holds extract carries one flag column per hold type plus the student's
//! contact fields. Each student's flags collapse to a single label in a fixed
//! priority order, and the label and contact fields are left-joined onto the
//! enrollment table.

use std::collections::{HashMap, HashSet};

use polars::prelude::DataFrame;
use tracing::{debug, info};

use adv_model::HoldKind;
use adv_model::retention::{CONTACT_FIELDS, HOLD_FLAG_SET, HOLDS, STUDENT_ID};

use crate::data_utils::{
    column_values, filter_rows, find_column, nullable_text_column, require_column,
    require_values,
};
use crate::error::{Result, TransformError};

/// Flags of one holds-extract row, in [`HoldKind::PRIORITY`] order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoldFlags {
    pub ar_balance: bool,
    pub academic_suspension: bool,
    pub college_health: bool,
    pub student_services: bool,
}

impl HoldFlags {
    pub fn is_set(&self, kind: HoldKind) -> bool {
        match kind {
            HoldKind::ArBalance => self.ar_balance,
            HoldKind::AcademicSuspension => self.academic_suspension,
            HoldKind::CollegeHealth => self.college_health,
            HoldKind::StudentServices => self.student_services,
        }
    }

    fn set(&mut self, kind: HoldKind) {
        match kind {
            HoldKind::ArBalance => self.ar_balance = true,
            HoldKind::AcademicSuspension => self.academic_suspension = true,
            HoldKind::CollegeHealth => self.college_health = true,
            HoldKind::StudentServices => self.student_services = true,
        }
    }
}

/// Highest-priority hold that is set, if any.
pub fn resolve_hold(flags: HoldFlags) -> Option<HoldKind> {
    HoldKind::PRIORITY
        .into_iter()
        .find(|kind| flags.is_set(*kind))
}

/// Dashboard label for a row's flags; `""` when no hold is set.
pub fn hold_label(flags: HoldFlags) -> &'static str {
    resolve_hold(flags).map_or("", HoldKind::label)
}

fn is_flag_set(value: Option<&String>) -> bool {
    value.is_some_and(|v| v.trim() == HOLD_FLAG_SET)
}

/// Per-row flags of the holds extract.
fn read_hold_flags(contacts: &DataFrame, context: &str) -> Result<Vec<HoldFlags>> {
    let mut flags = vec![HoldFlags::default(); contacts.height()];
    for kind in HoldKind::PRIORITY {
        let column = require_column(contacts, kind.flag_column(), context)?;
        let values = require_values(contacts, &column, context)?;
        for (row_flags, value) in flags.iter_mut().zip(&values) {
            if is_flag_set(value.as_ref()) {
                row_flags.set(kind);
            }
        }
    }
    Ok(flags)
}

fn missing_required(df: &DataFrame, context: &str, required: &[&str]) -> Result<()> {
    let missing: Vec<String> = required
        .iter()
        .filter(|name| find_column(df, name).is_none())
        .map(|name| (*name).to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(TransformError::missing_columns(context, missing))
    }
}

/// Left-join hold labels and contact fields onto `main` by student ID, keeping
/// the first row per ID.
///
/// Contact rows are matched on the trimmed ID; the first contact row for an ID
/// wins. Unmatched rows get null contact fields and a null `HOLDS`. The joined
/// block always ends the table: columns of `main` that share a name with a
/// joined field are dropped first.
///
/// # Errors
///
/// Returns [`TransformError::Schema`] when either table lacks `ID`, or the
/// contact table lacks a hold flag or contact field.
pub fn merge_holds(main: &DataFrame, contacts: &DataFrame) -> Result<DataFrame> {
    let mut contact_required: Vec<&str> = vec![STUDENT_ID];
    contact_required.extend(HoldKind::PRIORITY.iter().map(|kind| kind.flag_column()));
    contact_required.extend(CONTACT_FIELDS);
    missing_required(contacts, "holds extract", &contact_required)?;
    let main_id_column = require_column(main, STUDENT_ID, "enrollment table")?;

    let contact_id_column = require_column(contacts, STUDENT_ID, "holds extract")?;
    let contact_ids = require_values(contacts, &contact_id_column, "holds extract")?;
    let labels: Vec<&'static str> = read_hold_flags(contacts, "holds extract")?
        .into_iter()
        .map(hold_label)
        .collect();

    let mut first_contact: HashMap<String, usize> = HashMap::new();
    for (row, id) in contact_ids.iter().enumerate() {
        if let Some(id) = id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
            first_contact.entry(id.to_string()).or_insert(row);
        }
    }

    let main_ids = require_values(main, &main_id_column, "enrollment table")?;
    let mut seen: HashSet<Option<String>> = HashSet::new();
    let keep: Vec<bool> = main_ids
        .iter()
        .map(|id| seen.insert(id.as_deref().map(str::trim).map(str::to_string)))
        .collect();
    let duplicates = keep.iter().filter(|kept| !**kept).count();
    let mut merged = filter_rows(main, &keep)?;
    for name in CONTACT_FIELDS.iter().chain([&HOLDS]) {
        if merged.get_column_index(name).is_some() {
            debug!(column = *name, "replacing existing column with joined field");
            merged.drop_in_place(name)?;
        }
    }

    let matches: Vec<Option<usize>> = main_ids
        .iter()
        .zip(&keep)
        .filter(|(_, kept)| **kept)
        .map(|(id, _)| {
            id.as_deref()
                .map(str::trim)
                .and_then(|id| first_contact.get(id).copied())
        })
        .collect();

    for field in CONTACT_FIELDS {
        let source = require_column(contacts, field, "holds extract")?;
        let values = column_values(contacts, &source).unwrap_or_default();
        let joined: Vec<Option<String>> = matches
            .iter()
            .map(|row| row.and_then(|row| values.get(row).cloned().flatten()))
            .collect();
        merged.with_column(nullable_text_column(field, joined))?;
    }
    let holds: Vec<Option<String>> = matches
        .iter()
        .map(|row| row.and_then(|row| labels.get(row)).map(|label| (*label).to_string()))
        .collect();
    merged.with_column(nullable_text_column(HOLDS, holds))?;

    let matched = matches.iter().filter(|row| row.is_some()).count();
    debug!(duplicates, "dropped duplicate student rows");
    info!(
        rows = merged.height(),
        matched,
        unmatched = merged.height() - matched,
        "merged holds"
    );
    Ok(merged)
}
