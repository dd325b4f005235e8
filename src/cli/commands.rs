//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Paddock registry CLI
#[derive(Parser, Debug)]
#[command(name = "paddock")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Registry configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend to select (duckdb, dataframe, postgres); configured default when omitted
    #[arg(short, long, global = true)]
    pub backend: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the backend identifiers the registry knows
    Backends,

    /// List the tables visible through the selected backend
    Tables,

    /// Probe the selected backend for liveness
    Check,

    /// Run a SQL query against the selected backend
    Query {
        /// SQL text to execute
        sql: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one record per line)
    Json,
    /// Human-readable output
    Pretty,
}
