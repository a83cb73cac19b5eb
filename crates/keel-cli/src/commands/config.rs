//! CLI handlers for the `keel config` subcommand.

use std::path::Path;

use anyhow::{Context, Result};
use keel_config::{Config, ShowFormat};

use crate::output;

/// Show the resolved configuration with source annotations.
pub(crate) fn show_config(explicit: Option<&Path>, format: &str) -> Result<()> {
    let resolved = Config::load(explicit)?;

    let show_format = match format {
        "json" => ShowFormat::Json,
        _ => ShowFormat::Toml,
    };

    let output = resolved
        .show(show_format)
        .context("failed to format config")?;

    println!("{output}");
    Ok(())
}

/// Validate the current configuration and list the files it came from.
pub(crate) fn validate_config(explicit: Option<&Path>) -> Result<()> {
    let resolved = Config::load(explicit)?;

    println!("{}", output::config_valid(&resolved.loaded_files));
    Ok(())
}
