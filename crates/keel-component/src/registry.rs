//! Capability registry.
//!
//! Maps each capability to the single component that implements it. The
//! registry is built once from the discovered components and is read-only
//! afterwards; iteration follows discovery order.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, error, info};

use crate::capability::Capability;
use crate::component::{Component, ComponentDescriptor};
use crate::error::{ComponentError, ComponentResult};
use crate::host::HostDescriptor;

/// Who satisfies a capability lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider<'a> {
    /// A registered peer component.
    Component { implementation: &'a str },
    /// The host itself.
    Host { name: &'a str },
}

impl<'a> Provider<'a> {
    /// The provider's name, matched against implementation allow-lists.
    #[must_use]
    pub fn name(&self) -> &'a str {
        match *self {
            Self::Component { implementation } => implementation,
            Self::Host { name } => name,
        }
    }
}

/// Registry of accepted components, keyed by capability.
pub struct ComponentRegistry {
    descriptors: Vec<ComponentDescriptor>,
    index: HashMap<Capability, usize>,
}

impl ComponentRegistry {
    /// Build the registry from discovered components.
    ///
    /// Components without metadata are skipped. The host is only consulted
    /// for the capabilities it provides.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::DuplicateCapability`] if two components
    /// claim the same capability, or a component claims one the host
    /// already provides.
    pub fn build(
        components: Vec<Box<dyn Component>>,
        host: &HostDescriptor,
    ) -> ComponentResult<Self> {
        let mut registry = Self {
            descriptors: Vec::with_capacity(components.len()),
            index: HashMap::with_capacity(components.len()),
        };

        for component in components {
            let Some(def) = component.metadata() else {
                debug!("Skipping discovered object without component metadata");
                continue;
            };

            let existing = if let Some(&idx) = registry.index.get(&def.capability) {
                registry
                    .descriptors
                    .get(idx)
                    .map(|d| d.implementation_name().to_owned())
            } else if host.provides(&def.capability) {
                Some(host.name().to_owned())
            } else {
                None
            };

            if let Some(existing) = existing {
                let err = ComponentError::DuplicateCapability {
                    capability: def.capability,
                    existing,
                    duplicate: def.name,
                };
                error!(error = %err, "Rejected component set");
                return Err(err);
            }

            debug!(
                capability = %def.capability.id(),
                implementation = %def.name,
                "Registered component"
            );
            registry
                .index
                .insert(def.capability.clone(), registry.descriptors.len());
            registry
                .descriptors
                .push(ComponentDescriptor::new(def, component));
        }

        info!(count = registry.len(), "Component registry built");
        Ok(registry)
    }

    /// Get the descriptor registered for a capability.
    #[must_use]
    pub fn get(&self, capability: &Capability) -> Option<&ComponentDescriptor> {
        self.index
            .get(capability)
            .and_then(|&idx| self.descriptors.get(idx))
    }

    #[must_use]
    pub fn contains(&self, capability: &Capability) -> bool {
        self.index.contains_key(capability)
    }

    /// Iterate descriptors in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentDescriptor> {
        self.descriptors.iter()
    }

    /// Iterate descriptors mutably in discovery order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ComponentDescriptor> {
        self.descriptors.iter_mut()
    }

    /// Registered capabilities in discovery order.
    #[must_use]
    pub fn capabilities(&self) -> Vec<&Capability> {
        self.descriptors.iter().map(ComponentDescriptor::capability).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Find who provides `capability`: a peer component first, then the
    /// host.
    #[must_use]
    pub fn resolve<'a>(
        &'a self,
        capability: &Capability,
        host: &'a HostDescriptor,
    ) -> Option<Provider<'a>> {
        if let Some(descriptor) = self.get(capability) {
            return Some(Provider::Component {
                implementation: descriptor.implementation_name(),
            });
        }
        host.provides(capability)
            .then_some(Provider::Host { name: host.name() })
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field(
                "components",
                &self
                    .descriptors
                    .iter()
                    .map(|d| (d.capability().id(), d.implementation_name()))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use keel_config::Config;

    use super::*;
    use crate::host::Host;
    use crate::manifest::ComponentDef;

    struct Stub(Option<ComponentDef>);

    impl Component for Stub {
        fn metadata(&self) -> Option<ComponentDef> {
            self.0.clone()
        }

        fn init(&mut self, _host: &dyn Host, _config: &Config) -> ComponentResult<()> {
            Ok(())
        }

        fn load(&mut self) -> ComponentResult<()> {
            Ok(())
        }
    }

    fn stub(capability: &'static str, name: &str) -> Box<dyn Component> {
        Box::new(Stub(Some(ComponentDef::new(
            Capability::from_static(capability),
            name,
        ))))
    }

    #[test]
    fn test_build_preserves_discovery_order() {
        let host = HostDescriptor::new("Jetty");
        let registry = ComponentRegistry::build(
            vec![
                stub("persistence", "EclipseLink"),
                stub("cdi", "Weld"),
                stub("jax-rs", "Jersey"),
            ],
            &host,
        )
        .unwrap();

        let ids: Vec<&str> = registry.iter().map(|d| d.capability().id()).collect();
        assert_eq!(ids, vec!["persistence", "cdi", "jax-rs"]);
        assert_eq!(registry.capabilities().len(), 3);
        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry
                .get(&Capability::from_static("cdi"))
                .unwrap()
                .implementation_name(),
            "Weld"
        );
    }

    #[test]
    fn test_skips_components_without_metadata() {
        let host = HostDescriptor::new("Jetty");
        let registry = ComponentRegistry::build(
            vec![Box::new(Stub(None)) as Box<dyn Component>, stub("cdi", "Weld")],
            &host,
        )
        .unwrap();

        assert_eq!(registry.len(), 1);
        assert!(registry.contains(&Capability::from_static("cdi")));
    }

    #[test]
    fn test_duplicate_between_components() {
        let host = HostDescriptor::new("Jetty");
        let err = ComponentRegistry::build(
            vec![stub("web", "Alpha"), stub("web", "Beta")],
            &host,
        )
        .unwrap_err();

        match err {
            ComponentError::DuplicateCapability {
                capability,
                existing,
                duplicate,
            } => {
                assert_eq!(capability.id(), "web");
                assert_eq!(existing, "Alpha");
                assert_eq!(duplicate, "Beta");
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_with_host() {
        let host =
            HostDescriptor::new("Jetty").with_capability(Capability::from_static("servlet"));
        let err =
            ComponentRegistry::build(vec![stub("servlet", "Undertow")], &host).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Found multiple implementations (Jetty, Undertow) of the same component \
             capability (Servlet). Please check to make sure you only include a single \
             implementation of a specific capability."
        );
    }

    #[test]
    fn test_resolve_prefers_peer() {
        let host = HostDescriptor::new("Jetty").with_capability(Capability::from_static("cdi"));
        let registry = ComponentRegistry::build(vec![stub("jax-rs", "Jersey")], &host).unwrap();

        assert_eq!(
            registry.resolve(&Capability::from_static("jax-rs"), &host),
            Some(Provider::Component {
                implementation: "Jersey"
            })
        );
        let by_host = registry
            .resolve(&Capability::from_static("cdi"), &host)
            .unwrap();
        assert_eq!(by_host.name(), "Jetty");
        assert!(
            registry
                .resolve(&Capability::from_static("security"), &host)
                .is_none()
        );
    }

    #[test]
    fn test_empty_registry() {
        let registry = ComponentRegistry::build(Vec::new(), &HostDescriptor::new("Jetty")).unwrap();
        assert!(registry.is_empty());
        assert_eq!(registry.iter().count(), 0);
    }
}
