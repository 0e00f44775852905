//! Contact identity and temporal derivation.
//!
//! Runs on the union of all normalized location tables. Sequence numbers are
//! re-enumerated over the whole batch, the date and time of contact are parsed,
//! rows without a usable contact time are dropped, and each remaining row gets
//! `MONTH`, `DAY` and a synthetic `ID` built from the day offset and sequence.

use std::collections::HashSet;
use std::fmt;
use std::time::Instant;

use chrono::{NaiveDate, NaiveTime};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use tracing::{debug, info, warn};

use adv_ingest::parse_i64;
use adv_model::schema::{DATE, DAY, ID, LOCATION, MONTH, SEQUENCE, TIME_OF_CONTACT, TIME_RANGE};
use adv_model::{DateParseMode, PipelineOptions};

use crate::data_utils::{filter_rows, int_column, nullable_text_column, require_values, text_column};
use crate::datetime::{
    day_offset, format_date, format_time, hour_bucket, month_label, parse_contact_date,
    parse_contact_time, weekday_label,
};
use crate::error::{Result, TransformError};
use crate::normalize::normalize_location;

const CONTEXT: &str = "contact id derivation";

/// Synthetic contact identifier: day offset followed by the batch sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContactId {
    pub day_offset: i64,
    pub sequence: i64,
}

impl ContactId {
    pub fn new(date: NaiveDate, epoch: NaiveDate, sequence: i64) -> Self {
        Self {
            day_offset: day_offset(date, epoch),
            sequence,
        }
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.day_offset, self.sequence)
    }
}

/// Parse every `DATE` cell under the given mode.
///
/// Blank cells are null in both modes. In strict mode any other unparseable
/// cell fails the batch.
pub(crate) fn parse_dates(
    values: &[Option<String>],
    column: &str,
    mode: DateParseMode,
    context: &str,
) -> Result<Vec<Option<NaiveDate>>> {
    let mut dates = Vec::with_capacity(values.len());
    let mut nulled = 0usize;
    for (row, value) in values.iter().enumerate() {
        let raw = value.as_deref().unwrap_or("").trim();
        if raw.is_empty() {
            dates.push(None);
            continue;
        }
        match parse_contact_date(raw) {
            Some(date) => dates.push(Some(date)),
            None if mode == DateParseMode::Lossy => {
                nulled += 1;
                dates.push(None);
            }
            None => {
                return Err(TransformError::TypeCoercion {
                    context: context.to_string(),
                    column: column.to_string(),
                    row,
                    value: raw.to_string(),
                    target: "date",
                });
            }
        }
    }
    if nulled > 0 {
        warn!(context, column, nulled, "unparseable dates replaced with null");
    }
    Ok(dates)
}

fn month_day_columns(dates: &[Option<NaiveDate>]) -> (Column, Column) {
    let months: Vec<Option<&str>> = dates.iter().map(|d| d.map(month_label)).collect();
    let days: Vec<Option<&str>> = dates.iter().map(|d| d.map(weekday_label)).collect();
    (
        Series::new(MONTH.into(), months).into_column(),
        Series::new(DAY.into(), days).into_column(),
    )
}

/// Location labels in order of first appearance.
fn locations_in_order(values: &[Option<String>]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();
    for value in values {
        let label = value.clone().unwrap_or_default();
        if seen.insert(label.clone()) {
            ordered.push(label);
        }
    }
    ordered
}

/// Re-enumerate `#` as `1..=n` and re-normalize each location slice.
fn resequence(df: &DataFrame, options: &PipelineOptions) -> Result<DataFrame> {
    let height = df.height();
    let mut table = df.clone();
    let sequence: Vec<i64> = (1..=height as i64).collect();
    table.with_column(int_column(SEQUENCE, sequence))?;

    let locations = require_values(&table, LOCATION, CONTEXT)?;
    let mut stacked: Option<DataFrame> = None;
    for location in locations_in_order(&locations) {
        let mask: Vec<bool> = locations
            .iter()
            .map(|value| value.as_deref().unwrap_or("") == location)
            .collect();
        let slice = filter_rows(&table, &mask)?;
        let normalized = normalize_location(&slice, &location, options)?;
        debug!(location = %location, rows = normalized.height(), "resequenced location slice");
        match stacked.as_mut() {
            Some(acc) => {
                acc.vstack_mut(&normalized)?;
            }
            None => stacked = Some(normalized),
        }
    }

    match stacked {
        Some(frame) => Ok(frame),
        None => Ok(normalize_location(&table, "", options)?),
    }
}

fn sequence_values(df: &DataFrame) -> Result<Vec<i64>> {
    let raw = require_values(df, SEQUENCE, CONTEXT)?;
    raw.into_iter()
        .enumerate()
        .map(|(row, value)| {
            let text = value.unwrap_or_default();
            parse_i64(&text).ok_or_else(|| TransformError::TypeCoercion {
                context: CONTEXT.to_string(),
                column: SEQUENCE.to_string(),
                row,
                value: text,
                target: "integer",
            })
        })
        .collect()
}

/// Derive `MONTH`, `DAY` and `ID` for a unioned canonical table.
///
/// The output keeps the canonical columns (with `DATE` as ISO text, `TIME OF
/// CONTACT` as `HH:MM:SS` and `TIME RANGE` filled) followed by `MONTH`, `DAY`
/// and `ID`. Rows whose time of contact does not parse are dropped.
///
/// # Errors
///
/// - [`TransformError::Schema`] if a location slice no longer matches the
///   canonical schema.
/// - [`TransformError::TypeCoercion`] for an unparseable date in strict mode.
pub fn derive_contact_ids(df: &DataFrame, options: &PipelineOptions) -> Result<DataFrame> {
    let start = Instant::now();
    let input_rows = df.height();
    let table = resequence(df, options)?;

    let date_text = require_values(&table, DATE, CONTEXT)?;
    let dates = parse_dates(&date_text, DATE, options.date_mode, CONTEXT)?;
    let time_text = require_values(&table, TIME_OF_CONTACT, CONTEXT)?;
    let times: Vec<Option<NaiveTime>> = time_text
        .iter()
        .map(|value| value.as_deref().and_then(parse_contact_time))
        .collect();
    let sequences = sequence_values(&table)?;

    let keep: Vec<bool> = times.iter().map(Option::is_some).collect();
    let dropped = keep.iter().filter(|kept| !**kept).count();
    if dropped > 0 {
        for (row, value) in time_text.iter().enumerate().filter(|(row, _)| !keep[*row]) {
            debug!(
                row,
                value = value.as_deref().unwrap_or(""),
                "dropping row without contact time"
            );
        }
    }

    let mut kept_dates = Vec::with_capacity(table.height() - dropped);
    let mut kept_times = Vec::with_capacity(table.height() - dropped);
    let mut ids: Vec<Option<String>> = Vec::with_capacity(table.height() - dropped);
    let mut seen = HashSet::new();
    let mut collisions = 0usize;
    for ((date, time), sequence) in dates.iter().zip(&times).zip(&sequences) {
        let Some(time) = time else {
            continue;
        };
        kept_dates.push(*date);
        kept_times.push(*time);
        let id = date.map(|d| ContactId::new(d, options.id_epoch, *sequence));
        if let Some(id) = id {
            let rendered = id.to_string();
            if !seen.insert(rendered.clone()) {
                collisions += 1;
            }
            ids.push(Some(rendered));
        } else {
            ids.push(None);
        }
    }

    let mut output = filter_rows(&table, &keep)?;
    output.with_column(nullable_text_column(
        DATE,
        kept_dates.iter().map(|d| d.map(format_date)).collect(),
    ))?;
    output.with_column(text_column(
        TIME_OF_CONTACT,
        kept_times.iter().copied().map(format_time).collect(),
    ))?;
    output.with_column(text_column(
        TIME_RANGE,
        kept_times.iter().copied().map(hour_bucket).collect(),
    ))?;
    let (months, days) = month_day_columns(&kept_dates);
    output.with_column(months)?;
    output.with_column(days)?;
    output.with_column(nullable_text_column(ID, ids))?;

    if collisions > 0 {
        warn!(collisions, "duplicate contact ids in batch");
    }
    info!(
        input_rows,
        output_rows = output.height(),
        dropped_rows = dropped,
        duration_ms = start.elapsed().as_millis(),
        "derived contact ids"
    );
    Ok(output)
}

/// Append `MONTH` and `DAY` from the `DATE` column, leaving everything else untouched.
pub fn derive_date_parts(df: &DataFrame, mode: DateParseMode) -> Result<DataFrame> {
    let date_text = require_values(df, DATE, "date parts")?;
    let dates = parse_dates(&date_text, DATE, mode, "date parts")?;
    let (months, days) = month_day_columns(&dates);
    let mut output = df.clone();
    output.with_column(months)?;
    output.with_column(days)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_id_concatenates_offset_and_sequence() {
        let epoch = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap();
        let date = NaiveDate::from_ymd_opt(2023, 1, 5).unwrap();
        assert_eq!(ContactId::new(date, epoch, 1).to_string(), "449291");
        assert_eq!(ContactId::new(date, epoch, 12).to_string(), "4492912");
    }

    #[test]
    fn parse_dates_strict_and_lossy() {
        let values = vec![
            Some("1/5/2023".to_string()),
            Some(String::new()),
            None,
            Some("soon".to_string()),
        ];
        let err = parse_dates(&values, DATE, DateParseMode::Strict, "test").unwrap_err();
        assert!(matches!(err, TransformError::TypeCoercion { row: 3, .. }));

        let lossy = parse_dates(&values, DATE, DateParseMode::Lossy, "test").unwrap();
        assert!(lossy[0].is_some());
        assert!(lossy[1..].iter().all(Option::is_none));
    }

    #[test]
    fn locations_keep_first_appearance_order() {
        let values = vec![
            Some("BOE".to_string()),
            Some("BOA".to_string()),
            Some("BOE".to_string()),
        ];
        assert_eq!(locations_in_order(&values), vec!["BOE", "BOA"]);
    }
}
