//! Collapse one-hot indicator columns into a single categorical column.

use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};
use tracing::debug;

use adv_model::PipelineOptions;

use crate::data_utils::{require_values, text_column};
use crate::error::Result;

/// Name of the row-position column in collapsed output.
pub const ROW_INDEX: &str = "index";

/// Build `(index, <output>)` from an ordered list of indicator columns.
///
/// A row is claimed by the first listed column whose cell is a truthy marker;
/// later columns never override it. Unclaimed rows get `""`. The output has
/// one row per input row, ordered by row position.
///
/// # Errors
///
/// Returns [`TransformError::Schema`](crate::TransformError::Schema) if a
/// listed column is absent.
pub fn collapse_indicators<S: AsRef<str>>(
    df: &DataFrame,
    columns: &[S],
    output: &str,
    options: &PipelineOptions,
) -> Result<DataFrame> {
    let context = format!("collapse into {output}");
    let mut claimed: Vec<Option<usize>> = vec![None; df.height()];

    for (position, column) in columns.iter().enumerate() {
        let column = column.as_ref();
        let values = require_values(df, column, &context)?;
        let mut newly_claimed = 0usize;
        for (slot, value) in claimed.iter_mut().zip(&values) {
            if slot.is_none() && value.as_deref().is_some_and(|v| options.is_truthy_marker(v)) {
                *slot = Some(position);
                newly_claimed += 1;
            }
        }
        debug!(column, newly_claimed, "collapsed indicator column");
    }

    let labels: Vec<String> = claimed
        .iter()
        .map(|slot| {
            slot.and_then(|position| columns.get(position))
                .map(|column| column.as_ref().to_string())
                .unwrap_or_default()
        })
        .collect();
    let index: Vec<u64> = (0..df.height() as u64).collect();

    Ok(DataFrame::new(vec![
        Series::new(ROW_INDEX.into(), index).into_column(),
        text_column(output, labels),
    ])?)
}
