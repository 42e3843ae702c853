//! CLI argument parsing for simblog
//!
//! Global flags: --db, --config, --format, --quiet, --verbose, --log-level, --log-json

pub mod args;
pub mod parse;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::{CreateArgs, ShowArgs};
pub use simblog_core::format::OutputFormat;
use parse::parse_output_format;

/// Simblog - offline related-content engine for a small document corpus
#[derive(Parser, Debug)]
#[command(name = "simblog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// SQLite database path
    #[arg(long, global = true, env = "SIMBLOG_DB")]
    pub db: Option<PathBuf>,

    /// Configuration file (TOML); a missing file means defaults
    #[arg(long, global = true, env = "SIMBLOG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format (human or json)
    #[arg(long, global = true, default_value = "human", value_parser = parse_output_format)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log filter directive, e.g. `simblog=trace`
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a document from a file or stdin
    Create(CreateArgs),

    /// Show a document and its related documents
    Show(ShowArgs),

    /// List documents ordered by path
    List {
        /// Only documents in this category
        #[arg(long, short)]
        category: Option<String>,
    },

    /// Insert the sample corpus, skipping existing paths
    Seed,
}
