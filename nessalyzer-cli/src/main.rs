//! Nessalyzer CLI entry point
//!
//! Thin binary shell: parse arguments, load configuration, initialise
//! tracing, then dispatch to the command handlers. All domain logic
//! lives in the library crates.

mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use nessalyzer_core::config::NessalyzerConfig;
use nessalyzer_core::error::{ConfigError, NessalyzerError};

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(err.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(&cli.config)?;

    let log_level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.general.log_level);
    init_tracing(log_level, &config.general.log_format);

    tracing::debug!(config = %cli.config.display(), "nessalyzer starting");

    let writer = OutputWriter::new(cli.output);
    match cli.command {
        Commands::Parse(args) => commands::parse::execute(args, &config, &writer),
        Commands::Export(args) => commands::export::execute(args, &config, &writer),
        Commands::Exploitable(args) => commands::exploitable::execute(args, &config, &writer),
    }
}

/// Load the configuration file, falling back to defaults when the file
/// does not exist. Environment overrides apply in both cases.
fn load_config(path: &std::path::Path) -> Result<NessalyzerConfig, CliError> {
    match NessalyzerConfig::load(path) {
        Ok(config) => Ok(config),
        Err(NessalyzerError::Config(ConfigError::FileNotFound { .. })) => {
            let mut config = NessalyzerConfig::default();
            config.apply_env_overrides();
            config
                .validate()
                .map_err(|e| CliError::Config(e.to_string()))?;
            Ok(config)
        }
        Err(e) => Err(CliError::Config(e.to_string())),
    }
}

/// Initialise the global tracing subscriber.
///
/// Diagnostics go to stderr so stdout stays clean for command output.
fn init_tracing(level: &str, format: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    // a subscriber may already be installed (tests); ignore quietly
    if format == "json" {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.try_init();
    }
}
