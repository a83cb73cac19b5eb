//! Post-merge configuration validation.
//!
//! Validates that deserialized [`Config`](crate::Config) values are within
//! acceptable ranges and that cross-field invariants hold.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

/// Validate a fully-merged and deserialized configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_server(config)?;
    validate_logging(config)?;
    Ok(())
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.to_owned(),
        message: message.into(),
    }
}

fn validate_server(config: &Config) -> ConfigResult<()> {
    let s = &config.server;

    if s.port == 0 {
        return Err(invalid("server.port", "port must be between 1 and 65535"));
    }

    if s.min_threads == 0 {
        return Err(invalid("server.min_threads", "min_threads must be at least 1"));
    }

    if s.max_threads < s.min_threads {
        return Err(invalid(
            "server.max_threads",
            format!(
                "max_threads ({}) must not be lower than min_threads ({})",
                s.max_threads, s.min_threads
            ),
        ));
    }

    if !s.context_path.starts_with('/') {
        return Err(invalid(
            "server.context_path",
            format!("context path '{}' must start with '/'", s.context_path),
        ));
    }

    if s.webapp_path.trim().is_empty() {
        return Err(invalid("server.webapp_path", "webapp_path must not be empty"));
    }

    if s.idle_timeout_ms == 0 {
        return Err(invalid(
            "server.idle_timeout_ms",
            "idle_timeout_ms must be greater than zero",
        ));
    }

    if s.so_linger_time < -1 {
        return Err(invalid(
            "server.so_linger_time",
            format!(
                "so_linger_time ({}) must be -1 (disabled) or a non-negative number of seconds",
                s.so_linger_time
            ),
        ));
    }

    Ok(())
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    let l = &config.logging;

    if !matches!(
        l.level.as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    ) {
        return Err(invalid(
            "logging.level",
            format!(
                "unsupported level '{}'; expected one of: trace, debug, info, warn, error",
                l.level
            ),
        ));
    }

    if !matches!(l.format.as_str(), "pretty" | "compact" | "json" | "full") {
        return Err(invalid(
            "logging.format",
            format!(
                "unsupported format '{}'; expected one of: pretty, compact, json, full",
                l.format
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_invalid_port_zero() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::ValidationError { field, .. }) if field == "server.port"
        ));
    }

    #[test]
    fn test_invalid_min_threads_zero() {
        let mut config = Config::default();
        config.server.min_threads = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_max_threads_below_min() {
        let mut config = Config::default();
        config.server.min_threads = 10;
        config.server.max_threads = 4;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::ValidationError { field, .. }) if field == "server.max_threads"
        ));
    }

    #[test]
    fn test_equal_thread_bounds_allowed() {
        let mut config = Config::default();
        config.server.min_threads = 8;
        config.server.max_threads = 8;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_relative_context_path_rejected() {
        let mut config = Config::default();
        config.server.context_path = "api".to_owned();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_webapp_path_rejected() {
        let mut config = Config::default();
        config.server.webapp_path = "  ".to_owned();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_invalid_linger_rejected() {
        let mut config = Config::default();
        config.server.so_linger_time = -5;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_owned();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "yaml".to_owned();
        assert!(validate(&config).is_err());
    }
}
