//! CLI argument definitions for crm-normalize.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use crm_model::DateOrder;

#[derive(Parser)]
#[command(
    name = "crm-normalize",
    version,
    about = "Normalize a batch of raw customer records",
    long_about = "Normalize a spreadsheet export of customer records.\n\n\
                  Splits names, canonicalizes phones and dates, classifies VIP customers,\n\
                  removes duplicates and separates rows with invalid dates or region codes."
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

    /// Allow customer names and phones in trace-level logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize one input file into accepted and rejected tables.
    Run(RunArgs),

    /// List the valid region codes.
    Regions(RegionsArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Delimited text export of the customer spreadsheet.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// TOML configuration file. Flags override its values.
    #[arg(long = "config", short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output directory for the accepted and rejected tables.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Origin identifier stamped on every record (default: the input path).
    #[arg(long = "origin", value_name = "NAME")]
    pub origin: Option<String>,

    /// SQLite database receiving the accepted records.
    #[arg(long = "database", value_name = "FILE")]
    pub database: Option<PathBuf>,

    /// Interpretation of ambiguous a/b/yyyy dates.
    #[arg(long = "date-order", value_enum)]
    pub date_order: Option<DateOrderArg>,

    /// Input field delimiter.
    #[arg(long = "delimiter", value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Write a JSON batch report to this file.
    #[arg(long = "report", value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Run the pipeline and print the summary without writing anything.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct RegionsArgs {
    /// TOML configuration file overriding the default code set.
    #[arg(long = "config", short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// CLI date order choices.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DateOrderArg {
    /// Month first (12/31/2023).
    Mdy,
    /// Day first (31/12/2023).
    Dmy,
}

impl From<DateOrderArg> for DateOrder {
    fn from(arg: DateOrderArg) -> Self {
        match arg {
            DateOrderArg::Mdy => DateOrder::MonthFirst,
            DateOrderArg::Dmy => DateOrder::DayFirst,
        }
    }
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
