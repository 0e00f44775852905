//! Parsing of hand-typed dates and contact times.
//!
//! Sign-in sheets are filled in by many advisors, so the same column carries
//! `1/5/2023`, `2023-01-05`, `Jan 5, 2023` and spreadsheet date-times such as
//! `1/5/2023 0:00`. Times appear as `9:30 AM`, `09:30`, `13:05:00` or as a
//! full date-time whose time part is meant.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use adv_model::schema::{month_abbreviation, weekday_abbreviation};

/// Date-only formats, tried in order. Two-digit years come before four-digit
/// ones because `%Y` would otherwise read `23` as the year 23.
const DATE_FORMATS: [&str; 10] = [
    "%m/%d/%y",
    "%m/%d/%Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m-%d-%Y",
    "%d-%b-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%B %d %Y",
];

const DATETIME_FORMATS: [&str; 12] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%y %I:%M:%S %p",
    "%m/%d/%y %I:%M %p",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
];

const TIME_FORMATS: [&str; 6] = [
    "%H:%M:%S%.f",
    "%H:%M",
    "%I:%M:%S %p",
    "%I:%M %p",
    "%I:%M:%S%p",
    "%I:%M%p",
];

fn try_parse_datetime(value: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

fn try_parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// Parse a contact date. Returns `None` for blank or unrecognised text.
pub fn parse_contact_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    try_parse_date(trimmed).or_else(|| try_parse_datetime(trimmed).map(|dt| dt.date()))
}

/// Parse a time of contact. Returns `None` for blank or unrecognised text.
pub fn parse_contact_time(value: &str) -> Option<NaiveTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let upper = trimmed.to_uppercase();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(&upper, fmt).ok())
        .or_else(|| try_parse_datetime(&upper).map(|dt| dt.time()))
}

/// Whole days from `epoch` to `date`; negative before the epoch.
pub fn day_offset(date: NaiveDate, epoch: NaiveDate) -> i64 {
    date.signed_duration_since(epoch).num_days()
}

/// One-hour bucket label, e.g. `9:00-9:59` or `13:00-13:59`.
pub fn hour_bucket(time: NaiveTime) -> String {
    let hour = time.hour();
    format!("{hour}:00-{hour}:59")
}

/// Month abbreviation of a date (`Jan`..`Dec`).
pub fn month_label(date: NaiveDate) -> &'static str {
    month_abbreviation(date.month()).unwrap_or_default()
}

/// Weekday abbreviation of a date (`Mon`..`Sun`).
pub fn weekday_label(date: NaiveDate) -> &'static str {
    weekday_abbreviation(date.weekday().num_days_from_monday()).unwrap_or_default()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}
