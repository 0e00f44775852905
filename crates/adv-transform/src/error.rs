//! Error types for pipeline transforms.

use polars::prelude::PolarsError;
use thiserror::Error;

/// What is wrong with a table's shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaIssue {
    /// One or more required columns are absent.
    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// The governed indicator range does not fit the canonical schema.
    #[error("indicator range {start}..{end} is outside the {width}-field canonical schema")]
    IndicatorRange {
        start: usize,
        end: usize,
        width: usize,
    },
}

/// Errors that abort a pipeline stage.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Input table does not have the shape the stage needs.
    #[error("schema error in {context}: {issue}")]
    Schema { context: String, issue: SchemaIssue },

    /// A cell cannot be coerced to the column's target type.
    #[error(
        "type coercion error in {context}: {column} value '{value}' at row {row} is not a valid {target}"
    )]
    TypeCoercion {
        context: String,
        column: String,
        row: usize,
        value: String,
        target: &'static str,
    },

    /// Underlying DataFrame operation failed.
    #[error("DataFrame operation failed: {0}")]
    Polars(#[from] PolarsError),
}

impl TransformError {
    pub(crate) fn missing_columns(context: impl Into<String>, columns: Vec<String>) -> Self {
        Self::Schema {
            context: context.into(),
            issue: SchemaIssue::MissingColumns(columns),
        }
    }

    pub(crate) fn missing_column(context: impl Into<String>, column: &str) -> Self {
        Self::missing_columns(context, vec![column.to_string()])
    }

    /// True for errors caused by table shape rather than cell values.
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;
