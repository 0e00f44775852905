//! Tests for location schema normalization.

mod common;

use adv_model::PipelineOptions;
use adv_model::schema::canonical_column_names;
use adv_transform::{SchemaIssue, TransformError, normalize_location};
use polars::prelude::*;

use common::{SignIn, location_sheet, names, text};

#[test]
fn output_has_canonical_columns_in_order() {
    let sheet = location_sheet(&[SignIn::new("1/5/2023", "1", "Ann", "9:30 AM")], true);
    let out = normalize_location(&sheet, "BOA", &PipelineOptions::default()).unwrap();

    let expected: Vec<String> = canonical_column_names().map(String::from).collect();
    assert_eq!(names(&out), expected);
    assert_eq!(text(&out, "LOCATION"), vec![Some("BOA".to_string())]);
    assert_eq!(text(&out, "TIME OF CONTACT"), vec![Some("9:30 AM".to_string())]);
    assert_eq!(text(&out, "TIME RANGE"), vec![Some(String::new())]);
    assert_eq!(out.column("#").unwrap().dtype(), &DataType::Int64);
}

#[test]
fn missing_athlete_is_injected_empty() {
    let sheet = location_sheet(&[SignIn::new("1/5/2023", "1", "Ann", "9:30 AM")], false);
    let out = normalize_location(&sheet, "BOE", &PipelineOptions::default()).unwrap();
    assert_eq!(text(&out, "ATHLETE"), vec![Some(String::new())]);
}

#[test]
fn indicator_cells_outside_allow_list_are_cleared() {
    let rows = [
        SignIn::new("1/5/2023", "1", "Ann", "9:30 AM")
            .with_indicator(0, "Zoom")
            .with_indicator(1, "maybe")
            .with_indicator(2, "x"),
        SignIn::new("1/5/2023", "2", "Bob", "9:45 AM").with_indicator(0, "zoom"),
    ];
    let out = normalize_location(&location_sheet(&rows, true), "BOA", &PipelineOptions::default())
        .unwrap();

    assert_eq!(
        text(&out, "APPT"),
        vec![Some("Zoom".to_string()), Some(String::new())]
    );
    assert_eq!(
        text(&out, "DISTANCE"),
        vec![Some(String::new()), Some(String::new())]
    );
    assert_eq!(
        text(&out, "CURRENT STUDENT"),
        vec![Some("x".to_string()), Some(String::new())]
    );
    // Free-text columns outside the governed range pass through.
    assert_eq!(
        text(&out, "ADVISOR SIGN"),
        vec![Some("JD".to_string()), Some("JD".to_string())]
    );
}

#[test]
fn null_indicator_cells_become_empty() {
    let mut source = location_sheet(&[SignIn::new("1/5/2023", "1", "Ann", "9:30")], true);
    source
        .with_column(Series::new("APPT".into(), vec![None::<&str>]))
        .unwrap();

    let out = normalize_location(&source, "BOA", &PipelineOptions::default()).unwrap();
    assert_eq!(text(&out, "APPT"), vec![Some(String::new())]);
}

#[test]
fn missing_required_columns_are_all_reported() {
    let sheet = location_sheet(&[SignIn::new("1/5/2023", "1", "Ann", "9:30 AM")], true);
    let trimmed = sheet.drop("Name").unwrap().drop("ADV TIME").unwrap();

    let err = normalize_location(&trimmed, "BOA", &PipelineOptions::default()).unwrap_err();
    match err {
        TransformError::Schema {
            context,
            issue: SchemaIssue::MissingColumns(columns),
        } => {
            assert_eq!(context, "location BOA");
            assert_eq!(columns, vec!["NAME".to_string(), "ADV TIME".to_string()]);
        }
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[test]
fn non_numeric_sequence_is_fatal() {
    let rows = [
        SignIn::new("1/5/2023", "1", "Ann", "9:30 AM"),
        SignIn::new("1/5/2023", "two", "Bob", "9:45 AM"),
    ];
    let err = normalize_location(&location_sheet(&rows, true), "BOA", &PipelineOptions::default())
        .unwrap_err();
    assert!(matches!(
        err,
        TransformError::TypeCoercion { row: 1, ref value, .. } if value == "two"
    ));
}

#[test]
fn blank_sequence_is_fatal() {
    let rows = [SignIn::new("1/5/2023", "", "Ann", "9:30 AM")];
    let err = normalize_location(&location_sheet(&rows, true), "BOA", &PipelineOptions::default())
        .unwrap_err();
    assert!(matches!(err, TransformError::TypeCoercion { .. }));
}

#[test]
fn float_sequence_text_is_accepted() {
    let rows = [SignIn::new("1/5/2023", "3.0", "Ann", "9:30 AM")];
    let out = normalize_location(&location_sheet(&rows, true), "BOA", &PipelineOptions::default())
        .unwrap();
    assert_eq!(text(&out, "#"), vec![Some("3".to_string())]);
}

#[test]
fn normalization_is_idempotent() {
    let rows = [
        SignIn::new("1/5/2023", "1", "Ann", "9:30 AM").with_indicator(3, "Phone"),
        SignIn::new("1/6/2023", "2", "Bob", "").with_indicator(4, "bogus"),
    ];
    let options = PipelineOptions::default();
    let once = normalize_location(&location_sheet(&rows, false), "BOE", &options).unwrap();
    let twice = normalize_location(&once, "BOE", &options).unwrap();
    assert!(once.equals_missing(&twice));
}

#[test]
fn indicator_range_outside_schema_is_rejected() {
    let mut options = PipelineOptions::default();
    options.indicator_range = 6..30;
    let sheet = location_sheet(&[SignIn::new("1/5/2023", "1", "Ann", "9:30 AM")], true);
    let err = normalize_location(&sheet, "BOA", &options).unwrap_err();
    assert!(matches!(
        err,
        TransformError::Schema {
            issue: SchemaIssue::IndicatorRange { .. },
            ..
        }
    ));
}
