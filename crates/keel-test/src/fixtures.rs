//! Test fixtures for common types.

use std::path::Path;

use keel_component::{Capability, ComponentDef, Dependency};
use keel_config::Config;
use tempfile::TempDir;

/// Build a component definition.
///
/// # Panics
///
/// Panics if `capability` is not a valid capability id.
#[must_use]
pub fn component_def(capability: &str, name: &str) -> ComponentDef {
    ComponentDef::new(capability_of(capability), name)
}

/// A dependency on `capability` satisfied by any provider.
///
/// # Panics
///
/// Panics if `capability` is not a valid capability id.
#[must_use]
pub fn dependency(capability: &str) -> Dependency {
    Dependency::on(capability_of(capability))
}

/// A configuration whose web root is `webapp`.
#[must_use]
pub fn test_config(webapp: &Path) -> Config {
    let mut config = Config::default();
    config.server.webapp_path = webapp.display().to_string();
    config
}

/// A temporary directory to use as web root.
///
/// # Panics
///
/// Panics if the directory cannot be created.
#[must_use]
pub fn temp_webroot() -> TempDir {
    tempfile::tempdir().expect("create temporary web root")
}

fn capability_of(id: &str) -> Capability {
    Capability::new(id).expect("valid capability id")
}
