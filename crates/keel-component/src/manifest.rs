//! Component metadata types.
//!
//! A [`ComponentDef`] is what discovery reports for each component: the
//! capability it implements, its implementation name, and its required and
//! optional dependencies. The same data can be written to disk as a
//! `Component.toml` manifest, which [`ComponentManifest`] mirrors.

use serde::{Deserialize, Serialize};

use crate::capability::Capability;

/// A dependency on another capability, optionally restricted to a set of
/// implementation names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// The capability that must (or may) be present.
    pub capability: Capability,
    /// Accepted implementation names. Empty accepts any provider.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implementations: Vec<String>,
}

impl Dependency {
    /// A dependency on `capability`, satisfied by any provider.
    #[must_use]
    pub fn on(capability: Capability) -> Self {
        Self {
            capability,
            implementations: Vec::new(),
        }
    }

    /// Restrict the dependency to the given implementation names.
    #[must_use]
    pub fn implemented_by<I, S>(mut self, implementations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.implementations = implementations.into_iter().map(Into::into).collect();
        self
    }

    /// Whether a provider named `provider` satisfies the allow-list.
    #[must_use]
    pub fn accepts(&self, provider: &str) -> bool {
        self.implementations.is_empty() || self.implementations.iter().any(|i| i == provider)
    }
}

/// Metadata a component declares about itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDef {
    /// The capability this component implements.
    pub capability: Capability,
    /// Human-readable implementation name (e.g. "Jersey").
    pub name: String,
    /// Free-form description, shown by `keel check`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Dependencies that must be satisfied.
    #[serde(default)]
    pub requires: Vec<Dependency>,
    /// Dependencies that are used when present.
    #[serde(default)]
    pub optional: Vec<Dependency>,
}

impl ComponentDef {
    #[must_use]
    pub fn new(capability: Capability, name: impl Into<String>) -> Self {
        Self {
            capability,
            name: name.into(),
            description: None,
            requires: Vec::new(),
            optional: Vec::new(),
        }
    }

    /// Add a required dependency.
    #[must_use]
    pub fn requires(mut self, dependency: Dependency) -> Self {
        self.requires.push(dependency);
        self
    }

    /// Add an optional dependency.
    #[must_use]
    pub fn optional(mut self, dependency: Dependency) -> Self {
        self.optional.push(dependency);
        self
    }
}

/// On-disk form of a component declaration (`Component.toml`).
///
/// ```toml
/// [component]
/// capability = "persistence"
/// name = "EclipseLink"
///
/// [[requires]]
/// capability = "security"
///
/// [[optional]]
/// capability = "cdi"
/// implementations = ["Weld"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentManifest {
    pub component: ComponentSection,
    #[serde(default)]
    pub requires: Vec<Dependency>,
    #[serde(default)]
    pub optional: Vec<Dependency>,
}

/// The `[component]` table of a manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentSection {
    pub capability: Capability,
    pub name: String,
    /// Optional free-form description, shown by `keel check`.
    pub description: Option<String>,
}

impl From<ComponentManifest> for ComponentDef {
    fn from(manifest: ComponentManifest) -> Self {
        Self {
            capability: manifest.component.capability,
            name: manifest.component.name,
            description: manifest.component.description,
            requires: manifest.requires,
            optional: manifest.optional,
        }
    }
}
