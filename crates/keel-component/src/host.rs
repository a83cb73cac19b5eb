//! The hosting runtime contract.
//!
//! Exactly one host exists per process. It natively provides some
//! capabilities (a servlet container provides `servlet`, for instance), is
//! initialized before any component, and is started after all of them.

use std::collections::HashSet;

use keel_config::Config;

use crate::capability::Capability;
use crate::error::ComponentResult;

/// The host's identity and the capabilities it provides without a separate
/// component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostDescriptor {
    name: String,
    provided: HashSet<Capability>,
}

impl HostDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            provided: HashSet::new(),
        }
    }

    /// Declare a natively provided capability.
    #[must_use]
    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.provided.insert(capability);
        self
    }

    /// Declare several natively provided capabilities.
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: impl IntoIterator<Item = Capability>) -> Self {
        self.provided.extend(capabilities);
        self
    }

    /// The name the host identifies itself by (e.g. "Jetty").
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn provides(&self, capability: &Capability) -> bool {
        self.provided.contains(capability)
    }

    #[must_use]
    pub fn provided(&self) -> &HashSet<Capability> {
        &self.provided
    }
}

/// The request-serving facet of a host, for hosts that need a web context
/// set up between server initialization and component initialization.
pub trait RequestServer {
    /// Initialize the request-serving context.
    ///
    /// # Errors
    ///
    /// Returns an error if the context cannot be created.
    fn init_request_context(&mut self) -> ComponentResult<()>;
}

/// The single hosting runtime instance.
pub trait Host: Send {
    /// Identity and natively provided capabilities.
    fn descriptor(&self) -> HostDescriptor;

    /// Apply `config` and initialize the server. Called once, before any
    /// component is initialized.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be initialized.
    fn init_server(&mut self, config: &Config) -> ComponentResult<()>;

    /// The request-serving facet, if this host has one.
    fn request_server(&mut self) -> Option<&mut dyn RequestServer> {
        None
    }

    /// Start serving. Called once, after every component has loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to start.
    fn start_server(&mut self) -> ComponentResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_provides() {
        let host = HostDescriptor::new("Jetty").with_capabilities([
            Capability::from_static("servlet"),
            Capability::from_static("websocket"),
        ]);

        assert_eq!(host.name(), "Jetty");
        assert!(host.provides(&Capability::from_static("servlet")));
        assert!(!host.provides(&Capability::from_static("persistence")));
        assert_eq!(host.provided().len(), 2);
    }
}
