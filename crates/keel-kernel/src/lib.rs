#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![allow(clippy::module_name_repetitions)]

//! Keel Kernel - The bootstrap sequence.
//!
//! Checks the environment, discovers components, builds and validates the
//! capability registry, and then drives the host and every component
//! through startup. Nothing is started unless the whole component set is
//! valid.

/// Error types for the bootstrap.
pub mod error;
/// Lifecycle sequencing.
pub mod orchestrator;
/// Environment checks run before discovery.
pub mod requirements;

pub use error::{KernelError, KernelResult};
pub use orchestrator::orchestrate;
pub use requirements::check_requirements;

use keel_component::{
    Component, ComponentDiscovery, ComponentRegistry, Host, HostDescriptor, validate,
};
use keel_config::Config;
use tracing::info;

/// A started application: the running host and the loaded components.
pub struct Application {
    host: Box<dyn Host>,
    host_descriptor: HostDescriptor,
    registry: ComponentRegistry,
    config: Config,
}

impl Application {
    /// Run the whole bootstrap and return the started application.
    ///
    /// # Errors
    ///
    /// Returns an error if the web root is missing, discovery fails, the
    /// component set is rejected, or any lifecycle call fails. Registry and
    /// validation failures happen before the host is touched.
    pub fn bootstrap(
        config: Config,
        mut host: Box<dyn Host>,
        discovery: &mut dyn ComponentDiscovery,
    ) -> KernelResult<Self> {
        info!("Initializing Keel");

        check_requirements(&config)?;

        let host_descriptor = host.descriptor();
        info!(host = %host_descriptor.name(), "Host resolved");

        let components = discovery.discover()?;
        let mut registry = Self::prepare(&host_descriptor, components)?;

        orchestrate(host.as_mut(), &mut registry, &config)?;

        info!(
            host = %host_descriptor.name(),
            components = registry.len(),
            "Keel started"
        );
        Ok(Self {
            host,
            host_descriptor,
            registry,
            config,
        })
    }

    /// Build the registry and validate it, without starting anything.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::Component`] on a duplicate capability or an
    /// unsatisfied dependency.
    pub fn prepare(
        host: &HostDescriptor,
        components: Vec<Box<dyn Component>>,
    ) -> KernelResult<ComponentRegistry> {
        let registry = ComponentRegistry::build(components, host)?;
        validate(&registry, host)?;
        Ok(registry)
    }

    /// The running host.
    #[must_use]
    pub fn host(&self) -> &dyn Host {
        self.host.as_ref()
    }

    /// The host's identity, as captured before discovery.
    #[must_use]
    pub fn host_descriptor(&self) -> &HostDescriptor {
        &self.host_descriptor
    }

    /// The loaded components.
    #[must_use]
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// The configuration the application was started with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("host", &self.host_descriptor.name())
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
