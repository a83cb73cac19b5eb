//! Configuration types for the Keel runtime.
//!
//! Every struct implements [`Default`] with the same values as the embedded
//! `defaults.toml`, so that a bare `[section]` header in TOML produces a
//! working configuration.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration for the Keel runtime.
///
/// The kernel does not interpret the `server` section itself; it is handed
/// unmodified to the host and to every component during initialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Settings for the request-serving host.
    pub server: ServerSection,
    /// Logging level, format, and per-crate directives.
    pub logging: LoggingSection,
}

// ---------------------------------------------------------------------------
// ServerSection
// ---------------------------------------------------------------------------

/// Network, thread pool, and resource settings for the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// TCP port the host listens on.
    pub port: u16,
    /// Context path under which the application is mounted.
    pub context_path: String,
    /// Idle connection timeout in milliseconds.
    pub idle_timeout_ms: u64,
    /// `SO_LINGER` value in seconds; `-1` disables lingering.
    pub so_linger_time: i32,
    /// Lower bound of the request thread pool.
    pub min_threads: u32,
    /// Upper bound of the request thread pool.
    pub max_threads: u32,
    /// Resource root served by the host.
    pub webapp_path: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            port: 8080,
            context_path: "/".to_owned(),
            idle_timeout_ms: 60 * 60 * 1000,
            so_linger_time: -1,
            min_threads: 5,
            max_threads: 100,
            webapp_path: "webapp".to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// LoggingSection
// ---------------------------------------------------------------------------

/// Logging configuration as read from file. Converted to a telemetry
/// `LogConfig` at the binary boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level filter (`trace`, `debug`, `info`, `warn`, `error`).
    pub level: String,
    /// Output format (`pretty`, `compact`, `json`, `full`).
    pub format: String,
    /// Per-crate directive overrides (e.g. `keel_kernel=debug`).
    pub directives: Vec<String>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: "pretty".to_owned(),
            directives: Vec::new(),
        }
    }
}
