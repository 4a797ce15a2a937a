//! CLI argument definitions for the ticket report.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "ticket-report",
    version,
    about = "Build the pending tickets report from a ticket system export",
    long_about = "Build the pending tickets report from a ticket system export.\n\n\
                  Tickets are classified by customer and queue, sorted by priority and age,\n\
                  written to a copy of the report template and routed into group sheets.\n\
                  Urgent tickets are highlighted on every sheet."
)]
pub struct Cli {
    /// Ticket export to process (.xlsx, .xlsm, .xls, .ods or .csv).
    #[arg(value_name = "EXPORT")]
    pub export: PathBuf,

    /// TOML file overriding the default file names, sheets and groups.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory receiving the report (overrides the configuration).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for humans, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Prefix log lines with a timestamp (pretty and compact formats).
    #[arg(long = "log-timestamps")]
    pub log_timestamps: bool,

    /// Include the emitting module in log lines.
    #[arg(long = "log-target")]
    pub log_target: bool,

    /// Allow ticket content (numbers, subjects) in trace logs.
    #[arg(long = "log-data")]
    pub log_data: bool,
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
