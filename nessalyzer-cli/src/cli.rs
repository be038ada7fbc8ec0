//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's
//! derive macros. It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Nessalyzer -- Nessus scan report parser and analysis tool.
///
/// Use `nessalyzer <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "nessalyzer", version, about, long_about = None)]
pub struct Cli {
    /// Path to the nessalyzer.toml configuration file.
    #[arg(short, long, default_value = "nessalyzer.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table / text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a .nessus file and show its contents.
    Parse(ParseArgs),

    /// Export a parsed report to a file (csv, json).
    Export(ExportArgs),

    /// List findings with a known public exploit.
    Exploitable(ExploitableArgs),
}

// ---- parse ----

/// Parse a .nessus file and display hosts and findings.
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Path to the .nessus file.
    pub file: PathBuf,

    /// Show only the per-severity summary.
    #[arg(short, long)]
    pub summary: bool,
}

// ---- export ----

/// Export a parsed report to another format.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Path to the .nessus file.
    pub file: PathBuf,

    /// Export format (csv, json). Defaults to the configured format.
    #[arg(short, long)]
    pub format: Option<String>,

    /// Output file path. Defaults to the input file name with the
    /// format extension, in the configured output directory.
    #[arg(short = 'o', long = "out")]
    pub out: Option<PathBuf>,
}

// ---- exploitable ----

/// List only findings with `exploit_available = true`.
#[derive(Args, Debug)]
pub struct ExploitableArgs {
    /// Path to the .nessus file.
    pub file: PathBuf,
}
