//! Student risk dashboard CLI.

use clap::{ColorChoice, Parser};
use soit_cli::commands::{ReportRequest, render_payload, run_report, run_roles, write_payload};
use soit_cli::logging::{LogConfig, LogFormat, init_logging};
use soit_cli::summary::{print_report_summary, print_roles};
use soit_ingest::SheetSelection;
use soit_report::ReportOptions;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, ReportArgs, RolesArgs};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match &cli.command {
        Command::Report(args) => report(args),
        Command::Roles(args) => roles(args),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn report(args: &ReportArgs) -> anyhow::Result<()> {
    let mut options = ReportOptions::default();
    if let Some(limit) = args.top_modules {
        options = options.with_module_limit(limit);
    }
    let request = ReportRequest {
        file: args.file.clone(),
        sheet: SheetSelection::from_name(args.sheet.as_deref()),
        options,
    };
    let report = run_report(&request)?;
    let json = render_payload(&report.payload, args.compact)?;
    if let Some(path) = &args.output {
        write_payload(path, &json)?;
    }
    if args.summary {
        print_report_summary(&args.file, &report);
    } else if args.output.is_none() {
        println!("{json}");
    }
    Ok(())
}

fn roles(args: &RolesArgs) -> anyhow::Result<()> {
    let summary = run_roles(&args.file, &SheetSelection::from_name(args.sheet.as_deref()))?;
    print_roles(&args.file, &summary);
    Ok(())
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
