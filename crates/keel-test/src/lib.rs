//! Keel Test - Shared test utilities for the Keel runtime.
//!
//! Recording mocks for the host and component contracts, plus fixtures for
//! configs and temporary web roots. Use as a dev-dependency:
//!
//! ```toml
//! [dev-dependencies]
//! keel-test.workspace = true
//! ```
//!
//! ```rust,ignore
//! let log = EventLog::new();
//! let host = MockHost::new("Jetty", log.clone());
//! let component = MockComponent::new(component_def("cdi", "Weld"), log.clone());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
