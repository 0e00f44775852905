//! Canonical foot-traffic schema.
//!
//! Every advising location exports its own spreadsheet layout. The pipeline
//! reconciles them onto the fixed, ordered field set defined here. Each field
//! declares how it is sourced so that normalization can always emit the full
//! shape: required fields must come from the source file, defaulted fields are
//! filled with an empty value when the source lacks them, and derived fields
//! are always computed by the pipeline.

use std::ops::Range;

/// Contact date as typed by the advisor (free text until parsed).
pub const DATE: &str = "DATE";
/// Per-batch sequence number.
pub const SEQUENCE: &str = "#";
/// Student name.
pub const NAME: &str = "NAME";
/// Time of contact as typed by the advisor (free text until parsed).
pub const TIME_OF_CONTACT: &str = "TIME OF CONTACT";
/// Hour bucket derived from the time of contact.
pub const TIME_RANGE: &str = "TIME RANGE";
/// Advising location label.
pub const LOCATION: &str = "LOCATION";
/// Athlete indicator; missing from several location layouts.
pub const ATHLETE: &str = "ATHLETE";

/// Header used by older sign-in sheets for the time of contact.
pub const TIME_IN_ALIAS: &str = "TIME IN";

/// Month abbreviation derived from [`DATE`].
pub const MONTH: &str = "MONTH";
/// Weekday abbreviation derived from [`DATE`].
pub const DAY: &str = "DAY";
/// Synthetic contact identifier.
pub const ID: &str = "ID";

/// How a canonical field is sourced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPresence {
    /// Must be present in the source table.
    Required,
    /// Taken from the source when present, otherwise filled with `""`.
    Defaulted,
    /// Always computed by the pipeline; source values are ignored.
    Derived,
}

/// Value shape of a canonical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text carried through as-is.
    Text,
    /// Integer sequence number.
    Sequence,
    /// Single-marker indicator cell (`x`, `Phone`, ...).
    Indicator,
}

/// A single field of the canonical schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalField {
    pub name: &'static str,
    pub kind: FieldKind,
    pub presence: FieldPresence,
}

const fn field(name: &'static str, kind: FieldKind, presence: FieldPresence) -> CanonicalField {
    CanonicalField {
        name,
        kind,
        presence,
    }
}

/// The canonical fields in output order.
pub const CANONICAL_FIELDS: [CanonicalField; 23] = [
    field(DATE, FieldKind::Text, FieldPresence::Required),
    field(SEQUENCE, FieldKind::Sequence, FieldPresence::Required),
    field(NAME, FieldKind::Text, FieldPresence::Required),
    field(TIME_OF_CONTACT, FieldKind::Text, FieldPresence::Required),
    field(TIME_RANGE, FieldKind::Text, FieldPresence::Derived),
    field(LOCATION, FieldKind::Text, FieldPresence::Derived),
    field("APPT", FieldKind::Indicator, FieldPresence::Required),
    field("DISTANCE", FieldKind::Indicator, FieldPresence::Required),
    field("CURRENT STUDENT", FieldKind::Indicator, FieldPresence::Required),
    field("NEW STUDENT", FieldKind::Indicator, FieldPresence::Required),
    field("RETURNING STUDENT", FieldKind::Indicator, FieldPresence::Required),
    field("HIGH SCHOOL", FieldKind::Indicator, FieldPresence::Required),
    field("WORKFORCE", FieldKind::Indicator, FieldPresence::Required),
    field("VETERAN", FieldKind::Indicator, FieldPresence::Required),
    field("ENROLL", FieldKind::Indicator, FieldPresence::Required),
    field("ADD/DROP", FieldKind::Indicator, FieldPresence::Required),
    field("QUESTIONS", FieldKind::Indicator, FieldPresence::Required),
    field("MAJOR CHANGE", FieldKind::Indicator, FieldPresence::Required),
    field("DEGREE CHECK", FieldKind::Indicator, FieldPresence::Required),
    field("SUSPENSION", FieldKind::Indicator, FieldPresence::Required),
    field(ATHLETE, FieldKind::Indicator, FieldPresence::Defaulted),
    field("ADVISOR SIGN", FieldKind::Text, FieldPresence::Required),
    field("ADV TIME", FieldKind::Text, FieldPresence::Required),
];

/// Positions of the indicator columns whose cells are restricted to
/// [`INDICATOR_MARKERS`].
pub const DEFAULT_INDICATOR_RANGE: Range<usize> = 6..21;

/// Cell values accepted in governed indicator columns.
pub const INDICATOR_MARKERS: [&str; 7] = [
    "x",
    "X",
    "Phone",
    "In Person",
    "Zoom",
    "Email",
    "Central Adv",
];

/// Markers that count as "set" when collapsing indicator columns.
pub const TRUTHY_MARKERS: [&str; 2] = ["x", "X"];

/// Month abbreviations, January first.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Weekday abbreviations, Monday first.
pub const WEEKDAY_ABBREVIATIONS: [&str; 7] = ["Mon", "Tues", "Wed", "Thur", "Fri", "Sat", "Sun"];

/// Canonical column names in output order.
pub fn canonical_column_names() -> impl Iterator<Item = &'static str> {
    CANONICAL_FIELDS.iter().map(|field| field.name)
}

/// Abbreviation for a 1-based month number.
pub fn month_abbreviation(month: u32) -> Option<&'static str> {
    let idx = usize::try_from(month.checked_sub(1)?).ok()?;
    MONTH_ABBREVIATIONS.get(idx).copied()
}

/// Abbreviation for a weekday counted from Monday = 0.
pub fn weekday_abbreviation(days_from_monday: u32) -> Option<&'static str> {
    let idx = usize::try_from(days_from_monday).ok()?;
    WEEKDAY_ABBREVIATIONS.get(idx).copied()
}
