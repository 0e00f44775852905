//! Per-value contribution counts for dashboard feeds.

use std::collections::HashMap;

use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};

use crate::data_utils::{require_values, text_column};
use crate::error::Result;

pub const COUNT: &str = "Count";
pub const PERCENT_CONTRIBUTION: &str = "% Contribution";

/// One value of the summarized column.
#[derive(Debug, Clone, PartialEq)]
pub struct ContributionRow {
    pub value: String,
    pub count: u64,
    pub percent: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Count non-null values of `column`, most frequent first (ties by value).
pub fn contribution_rows(df: &DataFrame, column: &str) -> Result<Vec<ContributionRow>> {
    let values = require_values(df, column, "contribution summary")?;
    let mut counts: HashMap<String, u64> = HashMap::new();
    for value in values.into_iter().flatten() {
        *counts.entry(value).or_default() += 1;
    }
    let total: u64 = counts.values().sum();

    let mut rows: Vec<ContributionRow> = counts
        .into_iter()
        .map(|(value, count)| ContributionRow {
            value,
            count,
            percent: round2(count as f64 / total as f64 * 100.0),
        })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    Ok(rows)
}

/// [`contribution_rows`] as a table: `<column>`, `Count`, `% Contribution`.
pub fn contribution_summary(df: &DataFrame, column: &str) -> Result<DataFrame> {
    let rows = contribution_rows(df, column)?;
    let values: Vec<String> = rows.iter().map(|row| row.value.clone()).collect();
    let counts: Vec<u64> = rows.iter().map(|row| row.count).collect();
    let percents: Vec<f64> = rows.iter().map(|row| row.percent).collect();
    Ok(DataFrame::new(vec![
        text_column(column, values),
        Series::new(COUNT.into(), counts).into_column(),
        Series::new(PERCENT_CONTRIBUTION.into(), percents).into_column(),
    ])?)
}
