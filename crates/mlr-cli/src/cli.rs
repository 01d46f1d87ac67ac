//! CLI argument definitions for the MLR report.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "mlr",
    version,
    about = "Medical Loss Ratio report - cost against premium per group and retail plan",
    long_about = "Compute Medical Loss Ratio metrics from a warehouse snapshot.\n\n\
                  Reads one CSV export per source table, computes PA-based and\n\
                  claims-based MLR per client group and the retail plan rollups,\n\
                  and flags groups above the risk threshold."
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
    /// Compute the MLR report for a snapshot directory.
    Run(RunArgs),

    /// List the source tables a snapshot must contain.
    Tables,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Directory holding one CSV export per source table.
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// Output directory for result files (default: <DATA_DIR>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// JSON engine configuration; missing fields take their defaults.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// MLR percentage above which a group is flagged.
    #[arg(long = "threshold", value_name = "PERCENT")]
    pub threshold: Option<f64>,

    /// Group name of the retail product line (case-insensitive).
    #[arg(long = "product-line", value_name = "NAME")]
    pub product_line: Option<String>,

    /// Compute and print without writing result files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
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
