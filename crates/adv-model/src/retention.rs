//! Enrollment, hold and matriculation vocabulary.

use std::fmt;

/// Student identifier column shared by enrollment and contact extracts.
pub const STUDENT_ID: &str = "ID";
/// Term code column of a multi-term enrollment extract.
pub const TERM: &str = "TERM";
/// Residency column as spelled by some enrollment extracts.
pub const RESIDENCY_ALIAS: &str = "RESD";
/// Canonical residency column.
pub const RESIDENCY: &str = "RESCODE";
/// Label column produced by the enrollment comparison.
pub const ENROLLED: &str = "ENROLLED";
/// Label column produced by the hold resolver.
pub const HOLDS: &str = "HOLDS";

/// Flag value that marks a hold as active.
pub const HOLD_FLAG_SET: &str = "Y";

/// Contact columns carried from the holds extract onto the merged table.
pub const CONTACT_FIELDS: [&str; 5] = ["PRPHONE", "BRPHONE", "CARPHONE", "EMAIL", "OTHEREMAIL"];

/// Whether a previous-term student shows up in the upcoming term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollmentStatus {
    Enrolled,
    NotEnrolled,
}

impl EnrollmentStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Enrolled => "Enrolled",
            Self::NotEnrolled => "Not Enrolled",
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Administrative hold types, declared in resolution priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HoldKind {
    /// Accounts-receivable balance hold.
    ArBalance,
    /// Academic suspension hold.
    AcademicSuspension,
    /// TB test / college health hold.
    CollegeHealth,
    /// Vice president of student services hold.
    StudentServices,
}

impl HoldKind {
    /// All hold kinds, highest priority first.
    pub const PRIORITY: [HoldKind; 4] = [
        HoldKind::ArBalance,
        HoldKind::AcademicSuspension,
        HoldKind::CollegeHealth,
        HoldKind::StudentServices,
    ];

    /// Column of the holds extract carrying this flag.
    pub fn flag_column(self) -> &'static str {
        match self {
            Self::ArBalance => "ARNOENRHOLD",
            Self::AcademicSuspension => "SUSPHOLD",
            Self::CollegeHealth => "COLLHLTHHOLD",
            Self::StudentServices => "VPSSHOLD",
        }
    }

    /// Dashboard label written to [`HOLDS`].
    pub fn label(self) -> &'static str {
        match self {
            Self::ArBalance => "A/R Hold",
            Self::AcademicSuspension => "Acad Sus Hold",
            Self::CollegeHealth => "TB Test Hold",
            Self::StudentServices => "VP Stdt Svcs",
        }
    }
}

impl fmt::Display for HoldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw student id column of the high-school retention extract.
pub const RAW_STUDENT_ID: &str = "STDTID";
/// Raw term-entered column of the high-school retention extract.
pub const RAW_TERM_ENTERED: &str = "TERMENTERED";
/// High-school graduation date column (lower-cased extract).
pub const HS_GRAD_DATE: &str = "hsgraddte";
/// Graduation year derived from [`HS_GRAD_DATE`].
pub const GRAD_YEAR: &str = "grad_year";
/// Matriculation label column.
pub const HS_MATRICULATION: &str = "hs_matriculation";

/// Whether a student entered directly from high school.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matriculation {
    FromHighSchool,
    NotFromHighSchool,
}

impl Matriculation {
    pub fn label(self) -> &'static str {
        match self {
            Self::FromHighSchool => "From HS",
            Self::NotFromHighSchool => "Not From HS",
        }
    }
}
