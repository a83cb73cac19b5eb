//! Component trait and descriptor.

use std::fmt;

use keel_config::Config;

use crate::capability::Capability;
use crate::error::ComponentResult;
use crate::host::Host;
use crate::manifest::{ComponentDef, Dependency};

/// Where a component is in its two-phase lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentState {
    Discovered,
    Initialized,
    Loaded,
    Failed(String),
}

/// A pluggable unit implementing one capability.
///
/// Components are driven strictly sequentially: `init` is called once with
/// the host and configuration, then `load`, before the next component is
/// touched.
pub trait Component: Send {
    /// Capability metadata. `None` marks an object that is not a Keel
    /// extension; the registry skips it.
    fn metadata(&self) -> Option<ComponentDef>;

    /// First lifecycle phase.
    ///
    /// # Errors
    ///
    /// Returns an error if the component cannot initialize; the bootstrap
    /// aborts.
    fn init(&mut self, host: &dyn Host, config: &Config) -> ComponentResult<()>;

    /// Second lifecycle phase.
    ///
    /// # Errors
    ///
    /// Returns an error if the component cannot load; the bootstrap aborts.
    fn load(&mut self) -> ComponentResult<()>;
}

/// A discovered component together with the metadata it declared.
///
/// Created by [`ComponentRegistry::build`](crate::ComponentRegistry::build).
/// The metadata is fixed at creation.
pub struct ComponentDescriptor {
    def: ComponentDef,
    component: Box<dyn Component>,
}

impl ComponentDescriptor {
    pub(crate) fn new(def: ComponentDef, component: Box<dyn Component>) -> Self {
        Self { def, component }
    }

    #[must_use]
    pub fn capability(&self) -> &Capability {
        &self.def.capability
    }

    #[must_use]
    pub fn implementation_name(&self) -> &str {
        &self.def.name
    }

    #[must_use]
    pub fn required(&self) -> &[Dependency] {
        &self.def.requires
    }

    #[must_use]
    pub fn optional(&self) -> &[Dependency] {
        &self.def.optional
    }

    #[must_use]
    pub fn definition(&self) -> &ComponentDef {
        &self.def
    }

    /// The component instance, for lifecycle calls.
    pub fn component_mut(&mut self) -> &mut dyn Component {
        self.component.as_mut()
    }
}

impl fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("capability", &self.def.capability.id())
            .field("implementation", &self.def.name)
            .field("requires", &self.def.requires.len())
            .field("optional", &self.def.optional.len())
            .finish_non_exhaustive()
    }
}
