//! Schema normalization of per-location sign-in tables.
//!
//! Each location keeps its own spreadsheet, so headers differ in case, wrap
//! across lines, use older names (`TIME IN`), and some layouts lack columns
//! entirely. [`normalize_location`] reconciles one location's table onto the
//! canonical field set and sanitizes the indicator cells to a closed
//! vocabulary.
//!
//! The output always has exactly the canonical columns, in canonical order:
//! required fields are taken from the source (absence is fatal), defaulted
//! fields fall back to `""`, and derived fields are filled by the pipeline.

use std::collections::BTreeMap;

use polars::prelude::{Column, DataFrame};
use tracing::{debug, warn};

use adv_ingest::parse_i64;
use adv_model::PipelineOptions;
use adv_model::schema::{
    CANONICAL_FIELDS, CanonicalField, FieldKind, FieldPresence, LOCATION, TIME_IN_ALIAS,
    TIME_OF_CONTACT,
};

use crate::data_utils::{column_values, int_column, nullable_text_column, text_column};
use crate::error::{Result, SchemaIssue, TransformError};

/// Normalize a raw header: collapse line breaks and runs of whitespace to a
/// single space, upper-case, and map `TIME IN` to `TIME OF CONTACT`.
pub fn normalize_header(raw: &str) -> String {
    let cleaned = raw.trim_matches('\u{feff}');
    let mut normalized = String::with_capacity(cleaned.len());
    for part in cleaned.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(part);
    }
    let upper = normalized.to_uppercase();
    if upper == TIME_IN_ALIAS {
        TIME_OF_CONTACT.to_string()
    } else {
        upper
    }
}

/// Check that the governed indicator range fits inside the canonical schema.
pub fn validate_indicator_range(options: &PipelineOptions, context: &str) -> Result<()> {
    let range = &options.indicator_range;
    let width = CANONICAL_FIELDS.len();
    if range.start > range.end || range.end > width {
        return Err(TransformError::Schema {
            context: context.to_string(),
            issue: SchemaIssue::IndicatorRange {
                start: range.start,
                end: range.end,
                width,
            },
        });
    }
    Ok(())
}

/// Map normalized header -> source column name. The first source column wins
/// when two headers normalize to the same name.
fn header_index(df: &DataFrame, context: &str) -> BTreeMap<String, String> {
    let mut index = BTreeMap::new();
    for name in df.get_column_names() {
        let normalized = normalize_header(name.as_str());
        if let Some(existing) = index.get(&normalized) {
            warn!(
                context,
                column = %name,
                kept = %existing,
                normalized = %normalized,
                "duplicate header after normalization, keeping first"
            );
            continue;
        }
        index.insert(normalized, name.to_string());
    }
    index
}

fn sequence_column(
    field: &CanonicalField,
    values: Vec<Option<String>>,
    context: &str,
) -> Result<Column> {
    let mut sequence = Vec::with_capacity(values.len());
    for (row, value) in values.into_iter().enumerate() {
        let raw = value.unwrap_or_default();
        let Some(parsed) = parse_i64(&raw) else {
            return Err(TransformError::TypeCoercion {
                context: context.to_string(),
                column: field.name.to_string(),
                row,
                value: raw,
                target: "integer",
            });
        };
        sequence.push(parsed);
    }
    Ok(int_column(field.name, sequence))
}

fn indicator_column(
    field: &CanonicalField,
    values: Vec<Option<String>>,
    options: &PipelineOptions,
) -> (Column, usize) {
    let mut cleared = 0usize;
    let sanitized: Vec<String> = values
        .into_iter()
        .map(|value| match value {
            Some(v) if options.is_indicator_marker(&v) => v,
            Some(v) => {
                if !v.is_empty() {
                    cleared += 1;
                }
                String::new()
            }
            None => String::new(),
        })
        .collect();
    (text_column(field.name, sanitized), cleared)
}

/// Reconcile one location's raw table onto the canonical schema.
///
/// # Errors
///
/// - [`TransformError::Schema`] when a required canonical column is absent or
///   the configured indicator range does not fit the schema.
/// - [`TransformError::TypeCoercion`] when a sequence (`#`) value is not an
///   integer.
pub fn normalize_location(
    df: &DataFrame,
    location: &str,
    options: &PipelineOptions,
) -> Result<DataFrame> {
    let context = format!("location {location}");
    validate_indicator_range(options, &context)?;

    let height = df.height();
    let headers = header_index(df, &context);

    let missing: Vec<String> = CANONICAL_FIELDS
        .iter()
        .filter(|field| field.presence == FieldPresence::Required)
        .filter(|field| !headers.contains_key(field.name))
        .map(|field| field.name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(TransformError::missing_columns(context, missing));
    }

    let mut columns = Vec::with_capacity(CANONICAL_FIELDS.len());
    let mut cleared_cells = 0usize;
    for (position, field) in CANONICAL_FIELDS.iter().enumerate() {
        if field.presence == FieldPresence::Derived {
            // LOCATION is broadcast; TIME RANGE is filled during ID derivation.
            let value = if field.name == LOCATION { location } else { "" };
            columns.push(text_column(field.name, vec![value.to_string(); height]));
            continue;
        }

        let values = match headers.get(field.name) {
            Some(source) => column_values(df, source).unwrap_or_else(|| vec![None; height]),
            None => vec![Some(String::new()); height],
        };

        if field.kind == FieldKind::Sequence {
            columns.push(sequence_column(field, values, &context)?);
        } else if options.indicator_range.contains(&position) {
            let (column, cleared) = indicator_column(field, values, options);
            cleared_cells += cleared;
            columns.push(column);
        } else {
            columns.push(nullable_text_column(field.name, values));
        }
    }

    let dropped: Vec<&String> = headers
        .iter()
        .filter(|(normalized, _)| {
            !CANONICAL_FIELDS
                .iter()
                .any(|field| field.name == normalized.as_str())
        })
        .map(|(_, source)| source)
        .collect();

    debug!(
        location,
        rows = height,
        dropped_columns = ?dropped,
        cleared_cells,
        "normalized location table"
    );

    Ok(DataFrame::new(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("Time\nIn"), "TIME OF CONTACT");
        assert_eq!(normalize_header("time in"), "TIME OF CONTACT");
        assert_eq!(normalize_header("Current\r\nStudent"), "CURRENT STUDENT");
        assert_eq!(normalize_header("  add/drop "), "ADD/DROP");
        assert_eq!(normalize_header("TIME OF CONTACT"), "TIME OF CONTACT");
        assert_eq!(normalize_header("#"), "#");
    }

    #[test]
    fn test_validate_indicator_range() {
        let ok = PipelineOptions::default();
        assert!(validate_indicator_range(&ok, "t").is_ok());

        let mut too_wide = PipelineOptions::default();
        too_wide.indicator_range = 6..40;
        let err = validate_indicator_range(&too_wide, "t").unwrap_err();
        assert!(matches!(
            err,
            TransformError::Schema {
                issue: SchemaIssue::IndicatorRange { end: 40, .. },
                ..
            }
        ));
    }
}
