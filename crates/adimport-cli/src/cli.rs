//! CLI argument definitions for the bulk importer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use adimport_model::ImportKind;

#[derive(Parser)]
#[command(
    name = "adimport",
    version,
    about = "Bulk ad data importer - map, validate, and load campaign spreadsheets",
    long_about = "Map spreadsheet columns onto ad entity fields, validate every row,\n\
                  and import the records that survive.\n\n\
                  Reads CSV and JSON files holding campaigns, audiences, keywords,\n\
                  creatives, or budgets."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Map and validate an input file without importing anything.
    Check(CheckArgs),

    /// Map, validate, and import an input file.
    Import(ImportArgs),

    /// List the supported import kinds and their required fields.
    Kinds,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Kind of records the file contains.
    #[arg(value_enum)]
    pub kind: KindArg,

    /// Path to the CSV or JSON input file.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// JSON mapping file (source header -> target field) to use instead of
    /// the suggestions. Entries naming no schema field are dropped.
    #[arg(long = "mapping", value_name = "PATH")]
    pub mapping: Option<PathBuf>,

    /// TOML file overriding the built-in field schemas.
    #[arg(long = "schema", value_name = "PATH")]
    pub schema: Option<PathBuf>,

    /// Write the full report as JSON to a file.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ImportArgs {
    #[command(flatten)]
    pub check: CheckArgs,

    /// Where to write the imported records (default: <FILE>.imported.jsonl).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Import even when validation reports errors.
    ///
    /// By default the import is blocked as soon as validation finds any
    /// error. Warnings never block.
    #[arg(long = "force")]
    pub force: bool,

    /// Map and validate, then stop before writing any records.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// Import kinds accepted on the command line.
#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Campaigns,
    Audiences,
    Keywords,
    Creatives,
    Budgets,
}

impl From<KindArg> for ImportKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Campaigns => ImportKind::Campaigns,
            KindArg::Audiences => ImportKind::Audiences,
            KindArg::Keywords => ImportKind::Keywords,
            KindArg::Creatives => ImportKind::Creatives,
            KindArg::Budgets => ImportKind::Budgets,
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
