//! CLI argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "adv",
    version,
    about = "Advising data pipeline - reconcile location sign-in sheets and enrollment extracts",
    long_about = "Reconcile per-location advising sign-in exports and enrollment extracts\n\
                  into consolidated CSV tables for reporting dashboards."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Prefix pretty and compact log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Append logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow student names and IDs in trace-level logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// TOML file with pipeline options (date mode, ID epoch, indicator markers).
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Text written for empty cells in exported CSV files.
    #[arg(
        long = "null-value",
        value_name = "TEXT",
        default_value = "",
        hide_default_value = true,
        global = true
    )]
    pub null_value: String,
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize every location export in a folder and derive contact IDs.
    FootTraffic(FootTrafficArgs),

    /// Append MONTH and DAY to a single location export.
    DateParts(DatePartsArgs),

    /// Collapse indicator columns into one categorical column.
    Collapse(CollapseArgs),

    /// Label previous-term students as enrolled or not in the upcoming term.
    Retention(RetentionArgs),

    /// Label students who entered directly from high school.
    HsMatriculation(HsMatriculationArgs),

    /// Print per-value counts and percent contribution of one column.
    Summary(SummaryArgs),
}

#[derive(Parser)]
pub struct FootTrafficArgs {
    /// Folder containing one CSV export per location.
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Destination CSV file (overwritten).
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: PathBuf,

    /// Replace unparseable dates with empty values instead of failing.
    #[arg(long = "lossy-dates")]
    pub lossy_dates: bool,

    /// Day zero for contact IDs (default 1900-01-01).
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub epoch: Option<NaiveDate>,
}

#[derive(Parser)]
pub struct DatePartsArgs {
    /// Location export with a DATE column.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Destination CSV file (overwritten).
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: PathBuf,

    /// Replace unparseable dates with empty values instead of failing.
    #[arg(long = "lossy-dates")]
    pub lossy_dates: bool,
}

#[derive(Parser)]
pub struct CollapseArgs {
    /// CSV table containing the indicator columns.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Indicator columns in priority order; the first marked column wins.
    #[arg(long, value_delimiter = ',', required = true, num_args = 1..)]
    pub columns: Vec<String>,

    /// Name of the collapsed column.
    #[arg(long)]
    pub name: String,

    /// Destination CSV file (default: <FILE stem>_<name>.csv).
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct RetentionArgs {
    /// Multi-term enrollment extract.
    #[arg(value_name = "ENROLLMENT")]
    pub enrollment: PathBuf,

    /// Term code of the semester in progress or just concluded.
    #[arg(long, value_name = "TERM")]
    pub previous: i64,

    /// Term code of the semester about to start.
    #[arg(long, value_name = "TERM")]
    pub upcoming: i64,

    /// Contact and holds extract to merge onto the result.
    #[arg(long, value_name = "FILE")]
    pub holds: Option<PathBuf>,

    /// Destination CSV file (overwritten).
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: PathBuf,
}

#[derive(Parser)]
pub struct HsMatriculationArgs {
    /// Folder of yearly high-school enrollment extracts.
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Destination CSV file (overwritten).
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: PathBuf,

    /// Replace unparseable graduation dates with empty values instead of failing.
    #[arg(long = "lossy-dates")]
    pub lossy_dates: bool,
}

#[derive(Parser)]
pub struct SummaryArgs {
    /// CSV table to summarize.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Column to group by.
    #[arg(long)]
    pub column: String,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
