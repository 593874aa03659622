//! CLI argument definitions for the dashboard report builder.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "soit-dashboard",
    version,
    about = "Student engagement/risk dashboard - summarize flag exports",
    long_about = "Summarize a student engagement/risk export as dashboard JSON.\n\n\
                  Reads .xlsx/.xls workbooks or .csv exports, infers the student,\n\
                  module, week, reason, risk and resolved columns from their headers,\n\
                  and builds risk distributions, module rankings and weekly trends."
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

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the dashboard report for an export.
    Report(ReportArgs),

    /// Show which column was chosen for each role.
    Roles(RolesArgs),
}

#[derive(Parser)]
pub struct ReportArgs {
    /// Export file (.xlsx, .xls or .csv).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Workbook sheet to read (default: the first readable sheet).
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,

    /// Write the JSON report to a file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Emit single-line JSON instead of pretty-printed JSON.
    #[arg(long = "compact")]
    pub compact: bool,

    /// Keep only the N largest modules in the module ranking.
    #[arg(long = "top-modules", value_name = "N")]
    pub top_modules: Option<usize>,

    /// Print a summary table instead of the JSON (JSON still goes to --output).
    #[arg(long = "summary")]
    pub summary: bool,
}

#[derive(Parser)]
pub struct RolesArgs {
    /// Export file (.xlsx, .xls or .csv).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Workbook sheet to read (default: the first readable sheet).
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,
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
