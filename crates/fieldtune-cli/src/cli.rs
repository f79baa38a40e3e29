//! CLI argument definitions for fieldtune.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "fieldtune",
    version,
    about = "Field configuration tuning for entity export pipelines",
    long_about = "Tune which fields of an export configuration are included in output.\n\n\
                  Classifies fields from coverage statistics, simulates disable-sets\n\
                  against the expansion dependency graph, and applies validated changes\n\
                  atomically."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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

    /// Allow sampled field values (potentially personal data) in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Classify every field and produce the recommendation report.
    Recommend(RecommendArgs),

    /// Simulate a disable-set and, when safe, apply and persist it.
    Apply(ApplyArgs),

    /// Run the configuration integrity check only.
    Check(CheckArgs),
}

#[derive(Parser)]
pub struct RecommendArgs {
    /// Path to the field-configuration JSON document.
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Coverage report from the profiler (.json or .csv). Falls back to
    /// statistics embedded in the configuration when omitted.
    #[arg(long = "coverage", value_name = "FILE")]
    pub coverage: Option<PathBuf>,

    /// Save the recommendation report as CSV.
    #[arg(long = "out", value_name = "CSV")]
    pub out: Option<PathBuf>,

    /// Save the recommendation report as Markdown.
    #[arg(long = "markdown", value_name = "MD")]
    pub markdown: Option<PathBuf>,

    /// Additional field paths to treat as technical identifiers.
    #[arg(long = "technical-field", value_name = "PATH")]
    pub technical_fields: Vec<String>,

    /// Do not auto-treat reference fields (objectId + relationship
    /// target) as technical identifiers.
    #[arg(long = "no-derived-identifiers")]
    pub no_derived_identifiers: bool,
}

#[derive(Parser)]
pub struct ApplyArgs {
    /// Path to the field-configuration JSON document.
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Coverage report from the profiler (.json or .csv), used only for
    /// context in logs.
    #[arg(long = "coverage", value_name = "FILE")]
    pub coverage: Option<PathBuf>,

    /// Field path to disable; repeatable.
    #[arg(long = "disable", value_name = "PATH")]
    pub disable: Vec<String>,

    /// File with one field path per line ('#' comments allowed).
    #[arg(long = "disable-file", value_name = "FILE")]
    pub disable_file: Option<PathBuf>,

    /// Simulate and report without mutating the configuration.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Apply even when the simulation reports broken expansions.
    ///
    /// The accepted breaks are recorded in the change log; expansions of
    /// the disabled bases will stop resolving until re-pointed.
    #[arg(long = "accept-broken")]
    pub accept_broken: bool,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Path to the field-configuration JSON document.
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,
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
