use std::path::PathBuf;

/// One source table that fed an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSummary {
    /// Location label or role of the table (e.g. `BOA`, `holds`).
    pub label: String,
    pub path: PathBuf,
    pub rows: usize,
}

/// Outcome of a command that writes a CSV export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    pub dataset: &'static str,
    pub output: PathBuf,
    pub inputs: Vec<InputSummary>,
    pub rows: usize,
    pub columns: usize,
}
