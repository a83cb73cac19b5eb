#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
//! Unified configuration system for the Keel runtime.
//!
//! This crate provides a single [`Config`] type holding the settings that
//! the kernel hands, unmodified, to the host and to every component.
//!
//! # Usage
//!
//! ```rust,no_run
//! use keel_config::Config;
//!
//! // Load with full precedence chain (defaults → user → explicit → env).
//! let resolved = Config::load(None).unwrap();
//! println!("Listening on port {}", resolved.config.server.port);
//! ```
//!
//! # Configuration Precedence
//!
//! From highest to lowest priority:
//!
//! 1. **Explicit** (the file passed with `-c`)
//! 2. **User** (`~/.keel/config.toml`)
//! 3. **Environment variables** (`PORT`, `MIN_THREADS`, `MAX_THREADS`,
//!    `CONTEXT_PATH`, `WEBAPP_PATH`, `KEEL_LOG_LEVEL`), fallback only
//! 4. **Embedded defaults** (`defaults.toml` compiled into binary)
//!
//! This crate has **no dependencies on other internal keel crates**.

/// Environment variable fallback resolution.
pub mod env;
/// Configuration error types.
pub mod error;
/// Configuration file discovery and loading.
pub mod loader;
/// Layered configuration merging with provenance.
pub mod merge;
/// Resolved configuration display and serialization.
pub mod show;
/// Configuration struct definitions.
pub mod types;
/// Configuration validation rules.
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use merge::ConfigLayer;
pub use show::{ResolvedConfig, ShowFormat};
pub use types::*;

impl Config {
    /// Load configuration with full precedence chain.
    ///
    /// See [`loader::load`] for the full algorithm.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any config file is malformed or the final
    /// configuration fails validation.
    pub fn load(explicit: Option<&std::path::Path>) -> ConfigResult<ResolvedConfig> {
        loader::load(explicit)
    }

    /// Load configuration from a single file (no layering).
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read, parsed, or fails
    /// validation.
    pub fn load_file(path: &std::path::Path) -> ConfigResult<Self> {
        loader::load_file(path)
    }
}
