//! File-level runners behind each subcommand.
//!
//! Each runner loads its inputs, calls the matching `adv-transform` builder
//! and writes the export. Errors carry the path or stage that failed.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span, trace};

use adv_ingest::{discover_location_files, read_csv_dir, read_csv_table};
use adv_model::PipelineOptions;
use adv_model::retention::{HOLDS, STUDENT_ID};
use adv_output::{CsvExportOptions, write_csv_with};
use adv_transform::data_utils::{column_values, find_column};
use adv_transform::{
    ContributionRow, LocationTable, build_foot_traffic, build_hs_matriculation, build_retention,
    collapse_indicators, contribution_rows, derive_date_parts,
};

use crate::logging::redact_value;
use crate::types::{ExportResult, InputSummary};

fn load(path: &Path) -> Result<DataFrame> {
    read_csv_table(path).with_context(|| format!("read {}", path.display()))
}

fn export(
    dataset: &'static str,
    df: &DataFrame,
    output: &Path,
    inputs: Vec<InputSummary>,
    export_options: &CsvExportOptions,
) -> Result<ExportResult> {
    write_csv_with(df, output, export_options).with_context(|| format!("write {}", output.display()))?;
    Ok(ExportResult {
        dataset,
        output: output.to_path_buf(),
        inputs,
        rows: df.height(),
        columns: df.width(),
    })
}

/// Normalize every location export in `dir` and write the foot-traffic table.
pub fn run_foot_traffic(
    dir: &Path,
    output: &Path,
    options: &PipelineOptions,
    export_options: &CsvExportOptions,
) -> Result<ExportResult> {
    let ingest_span = info_span!("ingest", dir = %dir.display());
    let ingest_start = Instant::now();
    let (tables, inputs) = ingest_span.in_scope(|| -> Result<_> {
        let files = discover_location_files(dir)
            .with_context(|| format!("discover location files in {}", dir.display()))?;
        let mut tables = Vec::with_capacity(files.len());
        let mut inputs = Vec::with_capacity(files.len());
        for file in files {
            let data = load(&file.path)?;
            debug!(location = %file.location, rows = data.height(), "loaded location");
            inputs.push(InputSummary {
                label: file.location.clone(),
                path: file.path,
                rows: data.height(),
            });
            tables.push(LocationTable::new(file.location, data));
        }
        Ok((tables, inputs))
    })?;
    info!(
        locations = tables.len(),
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );

    let table = build_foot_traffic(&tables, options).context("build foot traffic table")?;
    export("foot traffic", &table, output, inputs, export_options)
}

/// Append `MONTH` and `DAY` to a single location export.
pub fn run_date_parts(
    input: &Path,
    output: &Path,
    options: &PipelineOptions,
    export_options: &CsvExportOptions,
) -> Result<ExportResult> {
    let table = load(input)?;
    let dated = derive_date_parts(&table, options.date_mode)
        .with_context(|| format!("derive date parts for {}", input.display()))?;
    let inputs = vec![InputSummary {
        label: "table".to_string(),
        path: input.to_path_buf(),
        rows: table.height(),
    }];
    export("date parts", &dated, output, inputs, export_options)
}

/// Default export path for a collapsed column: `<stem>_<name>.csv` beside the input.
pub fn default_collapse_output(input: &Path, name: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("table");
    let slug: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    input.with_file_name(format!("{stem}_{slug}.csv"))
}

/// Collapse indicator `columns` of `input` into a single `name` column.
pub fn run_collapse(
    input: &Path,
    columns: &[String],
    name: &str,
    output: Option<&Path>,
    options: &PipelineOptions,
    export_options: &CsvExportOptions,
) -> Result<ExportResult> {
    if columns.is_empty() {
        bail!("at least one indicator column is required");
    }
    let table = load(input)?;
    let collapsed = collapse_indicators(&table, columns, name, options)
        .with_context(|| format!("collapse {} into {name}", input.display()))?;
    let output = output.map_or_else(|| default_collapse_output(input, name), Path::to_path_buf);
    let inputs = vec![InputSummary {
        label: "table".to_string(),
        path: input.to_path_buf(),
        rows: table.height(),
    }];
    export("collapsed indicators", &collapsed, &output, inputs, export_options)
}

/// Term codes compared by the retention export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermPair {
    pub previous: i64,
    pub upcoming: i64,
}

/// Label previous-term students by upcoming enrollment, optionally with holds.
pub fn run_retention(
    enrollment: &Path,
    terms: TermPair,
    holds: Option<&Path>,
    output: &Path,
    export_options: &CsvExportOptions,
) -> Result<ExportResult> {
    let extract = load(enrollment)?;
    let mut inputs = vec![InputSummary {
        label: "enrollment".to_string(),
        path: enrollment.to_path_buf(),
        rows: extract.height(),
    }];
    let contacts = match holds {
        Some(path) => {
            let contacts = load(path)?;
            inputs.push(InputSummary {
                label: "holds".to_string(),
                path: path.to_path_buf(),
                rows: contacts.height(),
            });
            Some(contacts)
        }
        None => None,
    };

    let table = build_retention(&extract, terms.previous, terms.upcoming, contacts.as_ref())
        .with_context(|| {
            format!(
                "compare enrollment between terms {} and {}",
                terms.previous, terms.upcoming
            )
        })?;

    if contacts.is_some() {
        log_students_without_holds_record(&table);
    }
    export("retention", &table, output, inputs, export_options)
}

fn log_students_without_holds_record(table: &DataFrame) {
    let (Some(id_column), Some(holds)) = (find_column(table, STUDENT_ID), column_values(table, HOLDS))
    else {
        return;
    };
    let Some(ids) = column_values(table, &id_column) else {
        return;
    };
    for (id, hold) in ids.iter().zip(&holds) {
        if hold.is_none() {
            trace!(
                student_id = redact_value(id.as_deref().unwrap_or("")),
                "no holds record for student"
            );
        }
    }
}

/// Union the high-school extracts in `dir` and label matriculation.
pub fn run_hs_matriculation(
    dir: &Path,
    output: &Path,
    options: &PipelineOptions,
    export_options: &CsvExportOptions,
) -> Result<ExportResult> {
    let tables = read_csv_dir(dir).with_context(|| format!("read extracts in {}", dir.display()))?;
    let inputs: Vec<InputSummary> = tables
        .iter()
        .map(|(path, df)| InputSummary {
            label: path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string(),
            path: path.clone(),
            rows: df.height(),
        })
        .collect();
    let frames: Vec<DataFrame> = tables.into_iter().map(|(_, df)| df).collect();
    let table = build_hs_matriculation(&frames, options.date_mode)
        .context("label high-school matriculation")?;
    export("high-school matriculation", &table, output, inputs, export_options)
}

/// Contribution counts of one column of an exported table.
pub fn run_summary(input: &Path, column: &str) -> Result<Vec<ContributionRow>> {
    let table = load(input)?;
    let rows = contribution_rows(&table, column)
        .with_context(|| format!("summarize {column} of {}", input.display()))?;
    if let Some(top) = rows.first() {
        debug!(
            column,
            distinct = rows.len(),
            top = redact_value(&top.value),
            "summarized column"
        );
    }
    Ok(rows)
}
