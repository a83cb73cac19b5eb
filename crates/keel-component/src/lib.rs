//! Capability registry, dependency validation, and component contracts for
//! the Keel runtime.
//!
//! A component declares the single capability it implements together with
//! the capabilities it requires and optionally uses. This crate turns a
//! discovered, unordered set of components into a [`ComponentRegistry`]
//! keyed by capability, rejects duplicate implementations, and checks that
//! every dependency is satisfied either by a peer component or by the host.
//! Driving the lifecycle is left to `keel-kernel`.

pub mod capability;
pub mod component;
pub mod discovery;
pub mod error;
pub mod host;
pub mod manifest;
pub mod registry;
pub mod validate;

pub use capability::Capability;
pub use component::{Component, ComponentDescriptor, ComponentState};
pub use discovery::{ComponentDiscovery, ManifestComponent, ManifestDiscovery, StaticDiscovery};
pub use error::{ComponentError, ComponentResult};
pub use host::{Host, HostDescriptor, RequestServer};
pub use manifest::{ComponentDef, ComponentManifest, Dependency};
pub use registry::{ComponentRegistry, Provider};
pub use validate::validate;
