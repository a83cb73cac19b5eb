//! Capability identifiers.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{ComponentError, ComponentResult};

/// Display names for the extension points Keel ships with. Any other id is
/// accepted and displayed verbatim.
const WELL_KNOWN: &[(&str, &str)] = &[
    ("servlet", "Servlet"),
    ("websocket", "WebSocket"),
    ("jsp", "JSP"),
    ("el", "EL"),
    ("jsf", "JSF"),
    ("persistence", "Persistence"),
    ("cdi", "CDI"),
    ("jax-rs", "JAX-RS"),
    ("jax-ws", "JAX-WS"),
    ("bean-validation", "Bean Validation"),
    ("json-p", "JSON-P"),
    ("transactions", "Transactions"),
    ("security", "Security"),
];

/// A named extension point that a component can implement.
///
/// Two capabilities are equal when their ids are equal; the display name is
/// presentation only.
#[derive(Debug, Clone, Serialize)]
#[serde(into = "String")]
pub struct Capability {
    id: String,
    display_name: String,
}

impl<'de> Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

impl Capability {
    /// Create a capability from its id.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::InvalidCapability`] if the id is empty or
    /// contains anything other than lowercase ASCII letters, digits, `-`
    /// and `.`.
    pub fn new(id: impl Into<String>) -> ComponentResult<Self> {
        let id = id.into();
        Self::validate(&id)?;
        let display_name = WELL_KNOWN
            .iter()
            .find(|(known, _)| *known == id)
            .map_or_else(|| id.clone(), |(_, name)| (*name).to_owned());
        Ok(Self { id, display_name })
    }

    /// Create a capability from an id known to be valid at compile time.
    ///
    /// An invalid id panics in debug builds. Release builds skip the check
    /// and keep the id verbatim as both id and display name; use
    /// [`Capability::new`] for ids that are not literals.
    #[must_use]
    pub fn from_static(id: &'static str) -> Self {
        debug_assert!(Self::validate(id).is_ok(), "invalid capability id: {id}");
        Self::new(id).unwrap_or_else(|_| Self {
            id: id.to_owned(),
            display_name: id.to_owned(),
        })
    }

    /// Override the human-readable name.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    fn validate(id: &str) -> ComponentResult<()> {
        if id.is_empty() {
            return Err(ComponentError::InvalidCapability(
                "capability id must not be empty".into(),
            ));
        }
        if !id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
        {
            return Err(ComponentError::InvalidCapability(format!(
                "capability id must contain only lowercase alphanumeric characters, '-' and '.', got: {id}"
            )));
        }
        Ok(())
    }
}

impl PartialEq for Capability {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Capability {}

impl Hash for Capability {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name)
    }
}

impl From<Capability> for String {
    fn from(capability: Capability) -> Self {
        capability.id
    }
}

impl std::str::FromStr for Capability {
    type Err = ComponentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
