//! Frame builders shared by the integration tests.

#![allow(dead_code)]

use polars::prelude::*;

/// Indicator headers as they appear on a location sign-in sheet.
pub const SHEET_INDICATORS: [&str; 14] = [
    "APPT",
    "DISTANCE",
    "Current\nStudent",
    "NEW STUDENT",
    "RETURNING STUDENT",
    "HIGH SCHOOL",
    "WORKFORCE",
    "VETERAN",
    "ENROLL",
    "ADD/DROP",
    "QUESTIONS",
    "MAJOR CHANGE",
    "DEGREE CHECK",
    "SUSPENSION",
];

/// One sign-in row: date, sequence, name, time, and per-indicator cells.
pub struct SignIn<'a> {
    pub date: &'a str,
    pub seq: &'a str,
    pub name: &'a str,
    pub time: &'a str,
    pub indicators: [&'a str; 14],
    pub athlete: &'a str,
}

impl<'a> SignIn<'a> {
    pub fn new(date: &'a str, seq: &'a str, name: &'a str, time: &'a str) -> Self {
        Self {
            date,
            seq,
            name,
            time,
            indicators: [""; 14],
            athlete: "",
        }
    }

    pub fn with_indicator(mut self, position: usize, value: &'a str) -> Self {
        self.indicators[position] = value;
        self
    }
}

/// Build a raw location table the way ingest reads it: every column is text.
pub fn location_sheet(rows: &[SignIn<'_>], with_athlete: bool) -> DataFrame {
    let mut columns: Vec<Column> = vec![
        Series::new("Date".into(), rows.iter().map(|r| r.date).collect::<Vec<_>>()).into(),
        Series::new("#".into(), rows.iter().map(|r| r.seq).collect::<Vec<_>>()).into(),
        Series::new("Name".into(), rows.iter().map(|r| r.name).collect::<Vec<_>>()).into(),
        Series::new("TIME\nIN".into(), rows.iter().map(|r| r.time).collect::<Vec<_>>()).into(),
    ];
    for (position, header) in SHEET_INDICATORS.iter().enumerate() {
        let values: Vec<&str> = rows.iter().map(|r| r.indicators[position]).collect();
        columns.push(Series::new((*header).into(), values).into());
    }
    if with_athlete {
        let values: Vec<&str> = rows.iter().map(|r| r.athlete).collect();
        columns.push(Series::new("Athlete".into(), values).into());
    }
    columns.push(Series::new("ADVISOR SIGN".into(), vec!["JD"; rows.len()]).into());
    columns.push(Series::new("ADV TIME".into(), vec!["15"; rows.len()]).into());
    columns.push(Series::new("NOTES".into(), vec!["scratch"; rows.len()]).into());
    DataFrame::new(columns).unwrap()
}

pub fn names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(|n| n.to_string())
        .collect()
}

pub fn text(df: &DataFrame, column: &str) -> Vec<Option<String>> {
    adv_transform::data_utils::column_values(df, column).unwrap()
}
