//! High-school matriculation labels for multi-term enrollment extracts.

use chrono::Datelike;
use polars::prelude::DataFrame;
use tracing::info;

use adv_ingest::parse_i64;
use adv_model::{DateParseMode, Matriculation};
use adv_model::retention::{
    GRAD_YEAR, HS_GRAD_DATE, HS_MATRICULATION, RAW_STUDENT_ID, RAW_TERM_ENTERED, STUDENT_ID, TERM,
};

use crate::data_utils::{find_column, int_column, nullable_text_column, require_values, text_column};
use crate::datetime::format_date;
use crate::error::Result;
use crate::identity::parse_dates;

const CONTEXT: &str = "high-school extract";
/// `TERM` after the extract's names are lower-cased.
const TERM_LOWER: &str = "term";

/// Rename raw extract columns, lower-case all names and derive `grad_year`.
///
/// Blank `hsgraddte` cells give a `grad_year` of 0. Unparseable dates are a
/// `TypeCoercion` error in [`DateParseMode::Strict`] and become null (year 0)
/// in [`DateParseMode::Lossy`].
pub fn prepare_retention_extract(df: &DataFrame, mode: DateParseMode) -> Result<DataFrame> {
    let mut prepared = df.clone();
    for (raw, renamed) in [(RAW_STUDENT_ID, STUDENT_ID), (RAW_TERM_ENTERED, TERM)] {
        if let Some(existing) = find_column(&prepared, raw) {
            prepared.rename(&existing, renamed.into())?;
        }
    }

    let names: Vec<String> = prepared
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    for name in names {
        let lower = name.to_lowercase();
        if lower != name {
            prepared.rename(&name, lower.into())?;
        }
    }

    let grad_text = require_values(&prepared, HS_GRAD_DATE, CONTEXT)?;
    let grad_dates = parse_dates(&grad_text, HS_GRAD_DATE, mode, CONTEXT)?;
    let years: Vec<i64> = grad_dates
        .iter()
        .map(|date| date.map_or(0, |d| i64::from(d.year())))
        .collect();
    prepared.with_column(nullable_text_column(
        HS_GRAD_DATE,
        grad_dates.iter().map(|d| d.map(format_date)).collect(),
    ))?;
    prepared.with_column(int_column(GRAD_YEAR, years))?;
    Ok(prepared)
}

fn term_year(term: &str) -> String {
    let trimmed = term.trim();
    let normalized = parse_i64(trimmed).map_or_else(|| trimmed.to_string(), |v| v.to_string());
    normalized.chars().take(4).collect()
}

/// Per-row label: `From HS` when `grad_year` matches the term's year.
pub fn matriculation_for(term: &str, grad_year: &str) -> Matriculation {
    let year = term_year(term);
    if !year.is_empty() && year == term_year(grad_year) {
        Matriculation::FromHighSchool
    } else {
        Matriculation::NotFromHighSchool
    }
}

/// Append `hs_matriculation` to a prepared extract.
pub fn label_hs_matriculation(df: &DataFrame) -> Result<DataFrame> {
    let terms = require_values(df, TERM_LOWER, CONTEXT)?;
    let years = require_values(df, GRAD_YEAR, CONTEXT)?;
    let labels: Vec<Matriculation> = terms
        .iter()
        .zip(&years)
        .map(|(term, year)| {
            matriculation_for(
                term.as_deref().unwrap_or(""),
                year.as_deref().unwrap_or(""),
            )
        })
        .collect();
    let from_hs = labels
        .iter()
        .filter(|label| **label == Matriculation::FromHighSchool)
        .count();

    let mut labelled = df.clone();
    labelled.with_column(text_column(
        HS_MATRICULATION,
        labels.iter().map(|label| label.label().to_string()).collect(),
    ))?;
    info!(rows = labelled.height(), from_hs, "labelled high-school matriculation");
    Ok(labelled)
}

#[cfg(test)]
mod tests {
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    use super::*;
    use crate::TransformError;
    use crate::data_utils::column_values;

    fn extract(grad_dates: Vec<Option<&str>>) -> DataFrame {
        let ids: Vec<String> = (1..=grad_dates.len()).map(|i| i.to_string()).collect();
        DataFrame::new(vec![
            Series::new("STDTID".into(), ids).into_column(),
            Series::new("TERMENTERED".into(), vec!["202380"; grad_dates.len()]).into_column(),
            Series::new("HSGRADDTE".into(), grad_dates).into_column(),
        ])
        .unwrap()
    }

    #[test]
    fn matriculation_compares_term_year() {
        assert_eq!(matriculation_for("202380", "2023"), Matriculation::FromHighSchool);
        assert_eq!(matriculation_for("202380.0", "2023"), Matriculation::FromHighSchool);
        assert_eq!(matriculation_for("202380", "2022"), Matriculation::NotFromHighSchool);
        assert_eq!(matriculation_for("202380", "0"), Matriculation::NotFromHighSchool);
        assert_eq!(matriculation_for("", ""), Matriculation::NotFromHighSchool);
    }

    #[test]
    fn prepare_and_label() {
        let raw = DataFrame::new(vec![
            Series::new("STDTID".into(), vec!["1", "2", "3"]).into_column(),
            Series::new("TERMENTERED".into(), vec!["202380", "202380", "202280"]).into_column(),
            Series::new("HSGRADDTE".into(), vec![Some("5/25/2023"), Some("2022-05-20"), None])
                .into_column(),
        ])
        .unwrap();
        let prepared = prepare_retention_extract(&raw, DateParseMode::Strict).unwrap();
        let names: Vec<&str> = prepared
            .get_column_names()
            .into_iter()
            .map(|n| n.as_str())
            .collect();
        assert_eq!(names, vec!["id", "term", "hsgraddte", "grad_year"]);
        assert_eq!(
            column_values(&prepared, GRAD_YEAR).unwrap(),
            vec![
                Some("2023".to_string()),
                Some("2022".to_string()),
                Some("0".to_string())
            ]
        );

        let labelled = label_hs_matriculation(&prepared).unwrap();
        assert_eq!(
            column_values(&labelled, HS_MATRICULATION).unwrap(),
            vec![
                Some("From HS".to_string()),
                Some("Not From HS".to_string()),
                Some("Not From HS".to_string()),
            ]
        );
    }

    #[test]
    fn strict_mode_rejects_bad_grad_date() {
        let raw = extract(vec![Some("5/25/2023"), Some("2023-13-45")]);
        let err = prepare_retention_extract(&raw, DateParseMode::Strict).unwrap_err();
        match err {
            TransformError::TypeCoercion {
                column, row, value, ..
            } => {
                assert_eq!(column, HS_GRAD_DATE);
                assert_eq!(row, 1);
                assert_eq!(value, "2023-13-45");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn lossy_mode_nulls_bad_grad_date() {
        let raw = extract(vec![Some("2023-13-45"), Some("")]);
        let prepared = prepare_retention_extract(&raw, DateParseMode::Lossy).unwrap();
        assert_eq!(column_values(&prepared, HS_GRAD_DATE).unwrap(), vec![None, None]);
        assert_eq!(
            column_values(&prepared, GRAD_YEAR).unwrap(),
            vec![Some("0".to_string()), Some("0".to_string())]
        );
    }
}
