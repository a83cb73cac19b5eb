//! Environment variable fallbacks.
//!
//! Env vars are **fallback**, not override: they are only applied to fields
//! that no config file set.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::merge::{ConfigLayer, FieldSources};

/// Mapping from environment variable name to config field path.
struct EnvMapping {
    var_name: &'static str,
    field_path: &'static str,
    kind: FieldKind,
}

/// Target type of a field; numeric values outside its range are rejected.
#[derive(Clone, Copy)]
enum FieldKind {
    U16,
    U32,
    String,
}

/// All supported env var mappings.
const ENV_MAPPINGS: &[EnvMapping] = &[
    EnvMapping {
        var_name: "PORT",
        field_path: "server.port",
        kind: FieldKind::U16,
    },
    EnvMapping {
        var_name: "MIN_THREADS",
        field_path: "server.min_threads",
        kind: FieldKind::U32,
    },
    EnvMapping {
        var_name: "MAX_THREADS",
        field_path: "server.max_threads",
        kind: FieldKind::U32,
    },
    EnvMapping {
        var_name: "CONTEXT_PATH",
        field_path: "server.context_path",
        kind: FieldKind::String,
    },
    EnvMapping {
        var_name: "WEBAPP_PATH",
        field_path: "server.webapp_path",
        kind: FieldKind::String,
    },
    EnvMapping {
        var_name: "KEEL_LOG_LEVEL",
        field_path: "logging.level",
        kind: FieldKind::String,
    },
];

/// Apply environment variable fallbacks to fields that were **not** set by
/// any config file layer.
///
/// Numeric variables that do not parse, or do not fit the field's type, are
/// skipped with a warning.
/// Returns the number of env vars applied.
pub fn apply_env_fallbacks<S: ::std::hash::BuildHasher>(
    merged: &mut toml::Value,
    sources: &mut FieldSources,
    env_vars: &HashMap<String, String, S>,
) -> usize {
    let mut count: usize = 0;

    for mapping in ENV_MAPPINGS {
        if sources
            .get(mapping.field_path)
            .is_some_and(|layer| *layer != ConfigLayer::Defaults)
        {
            continue;
        }

        let Some(raw) = env_vars.get(mapping.var_name) else {
            continue;
        };

        let Some(value) = coerce(mapping.kind, raw) else {
            warn!(
                var = mapping.var_name,
                value = %raw,
                "ignoring environment variable with out-of-range or non-numeric value"
            );
            continue;
        };

        debug!(
            var = mapping.var_name,
            field = mapping.field_path,
            "applying env var fallback"
        );
        set_field(merged, mapping.field_path, value);
        sources.insert(mapping.field_path.to_owned(), ConfigLayer::Environment);
        count = count.saturating_add(1);
    }

    count
}

fn coerce(kind: FieldKind, raw: &str) -> Option<toml::Value> {
    match kind {
        FieldKind::U16 => raw
            .trim()
            .parse::<u16>()
            .ok()
            .map(|v| toml::Value::Integer(i64::from(v))),
        FieldKind::U32 => raw
            .trim()
            .parse::<u32>()
            .ok()
            .map(|v| toml::Value::Integer(i64::from(v))),
        FieldKind::String => Some(toml::Value::String(raw.to_owned())),
    }
}

/// Set a dotted-path field in the TOML tree, creating intermediate tables.
fn set_field(root: &mut toml::Value, path: &str, value: toml::Value) {
    let mut current = root;
    let mut segments = path.split('.').peekable();

    while let Some(segment) = segments.next() {
        let Some(table) = current.as_table_mut() else {
            return;
        };
        if segments.peek().is_none() {
            table.insert(segment.to_owned(), value);
            return;
        }
        current = table
            .entry(segment.to_owned())
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    }
}

/// Collect all current environment variables into a map.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars().collect()
}
