//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "invgrid",
    version,
    about = "Filter, sort, and page tabular datasets",
    long_about = "Apply an inventory-admin filter schema to a local dataset\n\
                  (JSON array or CSV) and print one page of the result."
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

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Filter a dataset and print one page of the result.
    List(ListArgs),

    /// Validate a filter schema and print its fields.
    Schema(SchemaArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Dataset file: a JSON array of objects, or CSV with a header row.
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    /// Filter schema (JSON array of field specs). Required for --filter.
    #[arg(long, value_name = "SCHEMA")]
    pub schema: Option<PathBuf>,

    /// Free-text search across all string attributes.
    #[arg(long, default_value = "")]
    pub search: String,

    /// Field filter, repeatable. Date ranges are written START..END.
    #[arg(long = "filter", value_name = "KEY=VALUE")]
    pub filters: Vec<String>,

    /// Sort column.
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending.
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// 1-based page to print.
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page.
    #[arg(long = "page-size", default_value_t = 10)]
    pub page_size: usize,
}

#[derive(Args)]
pub struct SchemaArgs {
    /// Filter schema file (JSON array of field specs).
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
