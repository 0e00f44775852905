use std::path::Path;

use anyhow::Result;
use tracing::info_span;

use adv_cli::config::{OptionOverrides, resolve_options};
use adv_cli::pipeline::{
    TermPair, run_collapse, run_date_parts, run_foot_traffic, run_hs_matriculation, run_retention,
    run_summary,
};
use adv_output::CsvExportOptions;

use crate::cli::{
    Cli, CollapseArgs, Command, DatePartsArgs, FootTrafficArgs, HsMatriculationArgs, RetentionArgs,
    SummaryArgs,
};
use crate::summary::{print_contribution_table, print_export_summary};

pub fn run(cli: &Cli) -> Result<()> {
    let config = cli.config.as_deref();
    let export = CsvExportOptions {
        null_value: cli.null_value.clone(),
        ..CsvExportOptions::default()
    };
    match &cli.command {
        Command::FootTraffic(args) => foot_traffic(args, config, &export),
        Command::DateParts(args) => date_parts(args, config, &export),
        Command::Collapse(args) => collapse(args, config, &export),
        Command::Retention(args) => retention(args, &export),
        Command::HsMatriculation(args) => hs_matriculation(args, config, &export),
        Command::Summary(args) => summary(args),
    }
}

fn lossy_only(lossy_dates: bool) -> OptionOverrides {
    OptionOverrides {
        lossy_dates,
        ..OptionOverrides::default()
    }
}

fn foot_traffic(
    args: &FootTrafficArgs,
    config: Option<&Path>,
    export: &CsvExportOptions,
) -> Result<()> {
    let _span = info_span!("foot_traffic", dir = %args.dir.display()).entered();
    let options = resolve_options(
        config,
        OptionOverrides {
            lossy_dates: args.lossy_dates,
            epoch: args.epoch,
        },
    )?;
    let result = run_foot_traffic(&args.dir, &args.output, &options, export)?;
    print_export_summary(&result);
    Ok(())
}

fn date_parts(args: &DatePartsArgs, config: Option<&Path>, export: &CsvExportOptions) -> Result<()> {
    let _span = info_span!("date_parts", input = %args.input.display()).entered();
    let options = resolve_options(config, lossy_only(args.lossy_dates))?;
    let result = run_date_parts(&args.input, &args.output, &options, export)?;
    print_export_summary(&result);
    Ok(())
}

fn collapse(args: &CollapseArgs, config: Option<&Path>, export: &CsvExportOptions) -> Result<()> {
    let _span = info_span!("collapse", name = %args.name).entered();
    let options = resolve_options(config, OptionOverrides::default())?;
    let result = run_collapse(
        &args.input,
        &args.columns,
        &args.name,
        args.output.as_deref(),
        &options,
        export,
    )?;
    print_export_summary(&result);
    Ok(())
}

fn retention(args: &RetentionArgs, export: &CsvExportOptions) -> Result<()> {
    let _span = info_span!(
        "retention",
        previous = args.previous,
        upcoming = args.upcoming
    )
    .entered();
    let terms = TermPair {
        previous: args.previous,
        upcoming: args.upcoming,
    };
    let result = run_retention(
        &args.enrollment,
        terms,
        args.holds.as_deref(),
        &args.output,
        export,
    )?;
    print_export_summary(&result);
    Ok(())
}

fn hs_matriculation(
    args: &HsMatriculationArgs,
    config: Option<&Path>,
    export: &CsvExportOptions,
) -> Result<()> {
    let _span = info_span!("hs_matriculation", dir = %args.dir.display()).entered();
    let options = resolve_options(config, lossy_only(args.lossy_dates))?;
    let result = run_hs_matriculation(&args.dir, &args.output, &options, export)?;
    print_export_summary(&result);
    Ok(())
}

fn summary(args: &SummaryArgs) -> Result<()> {
    let rows = run_summary(&args.input, &args.column)?;
    print_contribution_table(&args.column, &rows);
    Ok(())
}
