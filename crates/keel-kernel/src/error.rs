//! Error types for the bootstrap.

use std::path::PathBuf;

use keel_component::{Capability, ComponentError};
use thiserror::Error;

/// Kernel error type.
///
/// Lifecycle failures are tagged with the phase and the identity of the
/// host or component that failed.
#[derive(Debug, Error)]
pub enum KernelError {
    /// Registry build or dependency validation failed.
    #[error(transparent)]
    Component(#[from] ComponentError),

    /// The configured web root is missing.
    #[error(
        "Web application directory {} does not exist. The directory must be present even if \
         it is empty.",
        .path.display()
    )]
    MissingWebRoot {
        /// The configured path.
        path: PathBuf,
    },

    /// The host failed to initialize.
    #[error("host {host} failed to initialize: {source}")]
    HostInit {
        /// Host name.
        host: String,
        /// Underlying failure.
        source: ComponentError,
    },

    /// The host failed to set up its request context.
    #[error("host {host} failed to initialize its request context: {source}")]
    RequestContext {
        /// Host name.
        host: String,
        /// Underlying failure.
        source: ComponentError,
    },

    /// A component failed in `init`.
    #[error("component {capability} implemented by {implementation} failed to initialize: {source}")]
    ComponentInit {
        /// Capability the component implements.
        capability: Capability,
        /// Implementation name.
        implementation: String,
        /// Underlying failure.
        source: ComponentError,
    },

    /// A component failed in `load`.
    #[error("component {capability} implemented by {implementation} failed to load: {source}")]
    ComponentLoad {
        /// Capability the component implements.
        capability: Capability,
        /// Implementation name.
        implementation: String,
        /// Underlying failure.
        source: ComponentError,
    },

    /// The host failed to start.
    #[error("host {host} failed to start: {source}")]
    HostStart {
        /// Host name.
        host: String,
        /// Underlying failure.
        source: ComponentError,
    },
}

/// Result type for kernel operations.
pub type KernelResult<T> = Result<T, KernelError>;
