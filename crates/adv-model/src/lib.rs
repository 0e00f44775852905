//! Shared data model for the advising reconciliation pipeline.
//!
//! - **schema**: the canonical foot-traffic field set and its vocabularies
//! - **retention**: enrollment, hold and matriculation labels
//! - **options**: run configuration (date policy, ID epoch, marker lists)

pub mod error;
pub mod options;
pub mod retention;
pub mod schema;

pub use error::{ModelError, Result};
pub use options::{DEFAULT_ID_EPOCH, DateParseMode, PipelineOptions};
pub use retention::{EnrollmentStatus, HoldKind, Matriculation};
pub use schema::{CANONICAL_FIELDS, CanonicalField, FieldKind, FieldPresence};
