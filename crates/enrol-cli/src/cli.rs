//! CLI argument definitions for the bulk registration uploader.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use enrol_ingest::DEFAULT_SHEET_NAME;
use enrol_pipeline::DEFAULT_TABLE_NAME;

#[derive(Parser)]
#[command(
    name = "enrol",
    version,
    about = "Bulk-register children from a CSV or Excel upload",
    long_about = "Bulk-register children from a CSV or Excel upload.\n\n\
                  Each row is checked for duplicates, schema conformance, age range\n\
                  and parent email before it is committed to the registry."
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

    /// Include names, ages and emails in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate an upload and register the rows that pass.
    Upload(UploadArgs),

    /// Print the registration schema as JSON.
    Schema(SchemaArgs),
}

#[derive(Parser)]
pub struct UploadArgs {
    /// Upload file (.csv or .xlsx).
    #[arg(value_name = "INPUT", default_value = "data.csv")]
    pub input: PathBuf,

    /// Worksheet to read from an Excel upload.
    #[arg(long = "sheet", value_name = "NAME", default_value = DEFAULT_SHEET_NAME)]
    pub sheet: String,

    /// JSON schema to validate against instead of the built-in one.
    #[arg(long = "schema", value_name = "PATH")]
    pub schema: Option<PathBuf>,

    /// Name of the table accepted rows are committed to.
    #[arg(long = "table", value_name = "NAME", default_value = DEFAULT_TABLE_NAME)]
    pub table: String,

    /// Youngest accepted age (inclusive).
    #[arg(long = "min-age", value_name = "YEARS", default_value_t = 5)]
    pub min_age: i64,

    /// Oldest accepted age (inclusive).
    #[arg(long = "max-age", value_name = "YEARS", default_value_t = 15)]
    pub max_age: i64,

    /// Only treat a row as a duplicate when one stored record matches every
    /// identity field.
    ///
    /// By default the email, first name and last name may each match a
    /// different stored record.
    #[arg(long = "same-row-duplicates")]
    pub same_row_duplicates: bool,

    /// Print the stored records after the upload.
    #[arg(long = "list")]
    pub list: bool,
}

#[derive(Parser)]
pub struct SchemaArgs {
    /// Load and print this schema file instead of the built-in one.
    #[arg(long = "schema", value_name = "PATH")]
    pub schema: Option<PathBuf>,
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
