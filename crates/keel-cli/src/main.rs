//! Keel CLI - Component Runtime
//!
//! Validates component deployments offline and inspects the resolved
//! runtime configuration.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use keel_telemetry::{LogConfig, LogFormat, LogTarget};

mod commands;
mod output;

use commands::{check, config};

/// Keel - Component Runtime
#[derive(Parser)]
#[command(name = "keel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format: pretty, compact, json or full
    #[arg(long, global = true)]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the components declared under the given directories
    Check {
        /// Directories to scan for Component.toml (defaults to current directory)
        dirs: Vec<PathBuf>,

        /// Name of the host the components will run in
        #[arg(long, default_value = "host")]
        host_name: String,

        /// Capability the host provides natively (repeatable)
        #[arg(long = "provides", value_name = "CAPABILITY")]
        provides: Vec<String>,
    },

    /// View and validate configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show resolved configuration with source annotations
    Show {
        /// Output format (toml or json)
        #[arg(short, long, default_value = "toml")]
        format: String,
    },
    /// Validate the current configuration
    Validate,
}

fn log_config(cli: &Cli) -> LogConfig {
    let from_file = keel_config::Config::load(cli.config.as_deref())
        .ok()
        .and_then(|r| LogConfig::from_section(&r.config.logging).ok());

    let mut lc = from_file.unwrap_or_else(|| LogConfig::new("warn").with_format(LogFormat::Compact));
    if cli.verbose {
        "debug".clone_into(&mut lc.level);
    }
    if let Some(format) = cli.log_format.as_deref() {
        match format.parse() {
            Ok(format) => lc.format = format,
            Err(e) => eprintln!("Ignoring --log-format: {e}"),
        }
    }
    lc.with_target(LogTarget::Stderr)
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Check {
            dirs,
            host_name,
            provides,
        } => check::run_check(dirs, &host_name, &provides),
        Commands::Config { command } => match command {
            ConfigCommands::Show { format } => config::show_config(cli.config.as_deref(), &format),
            ConfigCommands::Validate => config::validate_config(cli.config.as_deref()),
        },
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = keel_telemetry::setup_logging(&log_config(&cli)) {
        eprintln!("Failed to initialize logging: {e}");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", output::failure(&e));
            ExitCode::FAILURE
        },
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check_arguments() {
        let cli = Cli::parse_from([
            "keel",
            "check",
            "components",
            "--host-name",
            "Jetty",
            "--provides",
            "servlet",
            "--provides",
            "websocket",
        ]);
        match cli.command {
            Commands::Check {
                dirs,
                host_name,
                provides,
            } => {
                assert_eq!(dirs, vec![PathBuf::from("components")]);
                assert_eq!(host_name, "Jetty");
                assert_eq!(provides, vec!["servlet", "websocket"]);
            },
            Commands::Config { .. } => panic!("expected check"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["keel", "config", "show", "-v", "--log-format", "json"]);
        assert!(cli.verbose);
        assert_eq!(cli.log_format.as_deref(), Some("json"));
    }
}
