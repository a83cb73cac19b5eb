//! Errors raised while resolving the layered configuration.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::merge::ConfigLayer;

/// Configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file exists but could not be read, or a required one is
    /// missing.
    #[error("Failed to read config file {} [{layer}]: {source}", .path.display())]
    ReadError {
        /// Layer the file belongs to.
        layer: ConfigLayer,
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A config file is not valid TOML or does not match the schema.
    #[error("Failed to parse config file {} [{layer}]: {source}", .path.display())]
    ParseError {
        /// Layer the file belongs to.
        layer: ConfigLayer,
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// A config file exceeds the size limit.
    #[error("Config file {} is {len} bytes, exceeding the {limit} byte limit", .path.display())]
    FileTooLarge {
        /// Offending file.
        path: PathBuf,
        /// Its size.
        len: u64,
        /// Maximum accepted size.
        limit: u64,
    },

    /// The defaults compiled into the binary do not parse.
    #[error("Embedded default configuration is invalid: {0}")]
    InvalidDefaults(#[source] toml::de::Error),

    /// The merged layers hold a value of the wrong type or range.
    #[error("Resolved configuration has an invalid value: {0}")]
    InvalidValue(#[source] toml::de::Error),

    /// Configuration validation failed.
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// Field that failed validation.
        field: String,
        /// Validation failure description.
        message: String,
    },

    /// Could not determine home directory.
    #[error("Could not determine home directory")]
    NoHomeDir,
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
