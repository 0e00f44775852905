//! Schema reconciliation and record linkage for advising datasets.
//!
//! - **normalize**: per-location header and indicator normalization onto the
//!   canonical schema
//! - **identity**: date parts, contact time buckets and synthetic contact IDs
//! - **collapse**: one-hot indicator columns to a single categorical column
//! - **enrollment**: term selection and retained/lapsed labelling
//! - **holds**: hold priority resolution and the contact/hold merge
//! - **summary**: per-value contribution counts
//! - **matriculation**: high-school matriculation labels
//! - **pipeline**: end-to-end builders used by the CLI

pub mod collapse;
pub mod data_utils;
pub mod datetime;
pub mod enrollment;
pub mod error;
pub mod holds;
pub mod identity;
pub mod matriculation;
pub mod normalize;
pub mod pipeline;
pub mod summary;

pub use collapse::collapse_indicators;
pub use enrollment::{compare_enrollment, select_term};
pub use error::{Result, SchemaIssue, TransformError};
pub use holds::{HoldFlags, hold_label, merge_holds, resolve_hold};
pub use identity::{ContactId, derive_contact_ids, derive_date_parts};
pub use matriculation::{label_hs_matriculation, prepare_retention_extract};
pub use normalize::{normalize_header, normalize_location};
pub use pipeline::{LocationTable, build_foot_traffic, build_hs_matriculation, build_retention};
pub use summary::{ContributionRow, contribution_rows, contribution_summary};
