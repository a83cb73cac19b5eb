use std::path::PathBuf;
use thiserror::Error;

use crate::capability::Capability;

/// Errors raised while registering, validating, or driving components.
///
/// The first three variants abort the bootstrap; their messages are shown
/// to operators verbatim.
#[derive(Debug, Error)]
pub enum ComponentError {
    /// Two providers claim the same capability. `existing` is either the
    /// already registered implementation or the host's name.
    #[error(
        "Found multiple implementations ({existing}, {duplicate}) of the same component \
         capability ({capability}). Please check to make sure you only include a single \
         implementation of a specific capability."
    )]
    DuplicateCapability {
        capability: Capability,
        existing: String,
        duplicate: String,
    },

    /// A required capability has no provider in the registry or the host.
    #[error(
        "Component dependency unfulfilled. The component {capability} implemented by \
         {implementation} requires {missing}, which was not found. Please make sure to \
         include the required component."
    )]
    UnsatisfiedDependency {
        capability: Capability,
        implementation: String,
        missing: Capability,
    },

    /// A provider exists but is not in the dependency's allow-list.
    #[error(
        "Component implementation dependency unfulfilled. The component {capability} \
         implemented by {implementation} requires {required} implemented by one of the \
         following implementations: [{allowed_list}], but it is provided by {provided_by}. \
         Please make sure you use one of the implementations required by this component.",
        allowed_list = .allowed.join(", ")
    )]
    ImplementationMismatch {
        capability: Capability,
        implementation: String,
        required: Capability,
        allowed: Vec<String>,
        provided_by: String,
    },

    #[error("Invalid capability: {0}")]
    InvalidCapability(String),

    /// Failed to parse a `Component.toml` manifest.
    #[error("Failed to parse manifest at {path}: {message}")]
    ManifestParseError {
        /// Path to the invalid manifest.
        path: PathBuf,
        /// The parse error message.
        message: String,
    },

    /// A component or host entry point reported a failure.
    #[error("Lifecycle failure: {0}")]
    Lifecycle(String),
}

/// A specialized Result type for component operations.
pub type ComponentResult<T> = Result<T, ComponentError>;
