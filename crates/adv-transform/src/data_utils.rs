//! DataFrame value extraction and construction helpers.
//!
//! Every stage reads cells as optional text and writes whole columns back, so
//! these helpers are the only place that touches Polars cell access.

use polars::prelude::{
    AnyValue, BooleanChunked, Column, DataFrame, IntoColumn, NamedFrom, NewChunkedArray, Series,
};

use adv_ingest::any_to_opt_string;

use crate::error::{Result, TransformError};

/// Extract all values of a column as optional strings; `None` if the column is absent.
pub fn column_values(df: &DataFrame, name: &str) -> Option<Vec<Option<String>>> {
    let column = df.column(name).ok()?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(any_to_opt_string(column.get(idx).unwrap_or(AnyValue::Null)));
    }
    Some(values)
}

/// Like [`column_values`] but reports a missing column as a schema error.
pub fn require_values(df: &DataFrame, name: &str, context: &str) -> Result<Vec<Option<String>>> {
    column_values(df, name).ok_or_else(|| TransformError::missing_column(context, name))
}

/// Finds a column by name ignoring ASCII case; returns the stored name.
pub fn find_column(df: &DataFrame, name: &str) -> Option<String> {
    df.get_column_names()
        .into_iter()
        .find(|candidate| candidate.as_str().eq_ignore_ascii_case(name))
        .map(|candidate| candidate.to_string())
}

/// Like [`find_column`] but reports a missing column as a schema error.
pub fn require_column(df: &DataFrame, name: &str, context: &str) -> Result<String> {
    find_column(df, name).ok_or_else(|| TransformError::missing_column(context, name))
}

/// Trimmed, non-empty text of a cell.
pub fn trimmed(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Build a `String` column.
pub fn text_column(name: &str, values: Vec<String>) -> Column {
    Series::new(name.into(), values).into_column()
}

/// Build a nullable `String` column.
pub fn nullable_text_column(name: &str, values: Vec<Option<String>>) -> Column {
    Series::new(name.into(), values).into_column()
}

/// Build an `Int64` column.
pub fn int_column(name: &str, values: Vec<i64>) -> Column {
    Series::new(name.into(), values).into_column()
}

/// Keep the rows whose mask entry is true.
pub fn filter_rows(df: &DataFrame, keep: &[bool]) -> Result<DataFrame> {
    let mask = BooleanChunked::from_slice("keep".into(), keep);
    Ok(df.filter(&mask)?)
}

/// Stack tables by column name.
///
/// Columns are ordered by first appearance; a table lacking a column
/// contributes nulls. All output columns are `String`.
pub fn union_by_name(frames: &[DataFrame]) -> Result<DataFrame> {
    let mut names: Vec<String> = Vec::new();
    for df in frames {
        for name in df.get_column_names() {
            if !names.iter().any(|existing| existing == name.as_str()) {
                names.push(name.to_string());
            }
        }
    }

    let total: usize = frames.iter().map(DataFrame::height).sum();
    let mut columns = Vec::with_capacity(names.len());
    for name in &names {
        let mut values: Vec<Option<String>> = Vec::with_capacity(total);
        for df in frames {
            match column_values(df, name) {
                Some(existing) => values.extend(existing),
                None => values.extend(std::iter::repeat_n(None, df.height())),
            }
        }
        columns.push(nullable_text_column(name, values));
    }

    Ok(DataFrame::new(columns)?)
}
