//! Lifecycle sequencing.
//!
//! Host first, then every component in registry order, then host start.
//! Each component completes `init` and `load` before the next one begins.
//! A failure stops the sequence; components already loaded are left as
//! they are.

use keel_component::{ComponentRegistry, Host};
use keel_config::Config;
use tracing::{debug, error, info};

use crate::error::{KernelError, KernelResult};

/// Drive the host and every registered component through startup.
///
/// # Errors
///
/// Returns the first lifecycle failure, tagged with its phase.
pub fn orchestrate(
    host: &mut dyn Host,
    registry: &mut ComponentRegistry,
    config: &Config,
) -> KernelResult<()> {
    let host_name = host.descriptor().name().to_owned();

    info!(host = %host_name, "Initializing host");
    host.init_server(config)
        .map_err(|source| KernelError::HostInit {
            host: host_name.clone(),
            source,
        })
        .inspect_err(log_failure)?;

    if let Some(server) = host.request_server() {
        debug!(host = %host_name, "Initializing request context");
        server
            .init_request_context()
            .map_err(|source| KernelError::RequestContext {
                host: host_name.clone(),
                source,
            })
            .inspect_err(log_failure)?;
    }

    for descriptor in registry.iter_mut() {
        let capability = descriptor.capability().clone();
        let implementation = descriptor.implementation_name().to_owned();
        info!(
            capability = %capability.id(),
            implementation = %implementation,
            "Found component {capability} implemented by {implementation}"
        );

        let component = descriptor.component_mut();
        if let Err(source) = component.init(&*host, config) {
            let err = KernelError::ComponentInit {
                capability,
                implementation,
                source,
            };
            log_failure(&err);
            return Err(err);
        }
        if let Err(source) = component.load() {
            let err = KernelError::ComponentLoad {
                capability,
                implementation,
                source,
            };
            log_failure(&err);
            return Err(err);
        }
        debug!(capability = %capability.id(), "Component loaded");
    }

    info!(host = %host_name, "Starting host");
    host.start_server()
        .map_err(|source| KernelError::HostStart {
            host: host_name,
            source,
        })
        .inspect_err(log_failure)
}

fn log_failure(err: &KernelError) {
    error!(error = %err, "Bootstrap aborted");
}

#[cfg(test)]
mod tests {
    use keel_component::{ComponentRegistry, Host};
    use keel_config::Config;
    use keel_test::{EventLog, HostPhase, MockComponent, MockHost, component_def};

    use super::*;

    fn registry(host: &MockHost, components: Vec<MockComponent>) -> ComponentRegistry {
        ComponentRegistry::build(
            components.into_iter().map(MockComponent::boxed).collect(),
            &host.descriptor(),
        )
        .unwrap()
    }

    #[test]
    fn test_sequence() {
        let log = EventLog::new();
        let mut host = MockHost::new("Jetty", log.clone()).serving_requests();
        let mut registry = registry(
            &host,
            vec![
                MockComponent::new(component_def("cdi", "Weld"), log.clone()),
                MockComponent::new(component_def("jax-rs", "Jersey"), log.clone()),
            ],
        );

        orchestrate(&mut host, &mut registry, &Config::default()).unwrap();

        assert_eq!(
            log.events(),
            vec![
                "host:init_server",
                "host:init_request_context",
                "Weld:init",
                "Weld:load",
                "Jersey:init",
                "Jersey:load",
                "host:start_server",
            ]
        );
    }

    #[test]
    fn test_host_without_request_server() {
        let log = EventLog::new();
        let mut host = MockHost::new("Jetty", log.clone());
        let mut registry = registry(&host, Vec::new());

        orchestrate(&mut host, &mut registry, &Config::default()).unwrap();
        assert_eq!(log.events(), vec!["host:init_server", "host:start_server"]);
    }

    #[test]
    fn test_load_failure_is_tagged() {
        let log = EventLog::new();
        let mut host = MockHost::new("Jetty", log.clone());
        let mut registry = registry(
            &host,
            vec![MockComponent::new(component_def("cdi", "Weld"), log.clone()).failing_load()],
        );

        let err = orchestrate(&mut host, &mut registry, &Config::default()).unwrap_err();
        match err {
            KernelError::ComponentLoad {
                capability,
                implementation,
                ..
            } => {
                assert_eq!(capability.id(), "cdi");
                assert_eq!(implementation, "Weld");
            },
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(log.count("host:start_server"), 0);
    }

    #[test]
    fn test_host_init_failure_touches_no_component() {
        let log = EventLog::new();
        let mut host = MockHost::new("Jetty", log.clone()).failing_on(HostPhase::InitServer);
        let mut registry = registry(
            &host,
            vec![MockComponent::new(component_def("cdi", "Weld"), log.clone())],
        );

        let err = orchestrate(&mut host, &mut registry, &Config::default()).unwrap_err();
        assert!(matches!(err, KernelError::HostInit { .. }));
        assert_eq!(log.events(), vec!["host:init_server"]);
    }

    #[test]
    fn test_request_context_failure_touches_no_component() {
        let log = EventLog::new();
        let mut host = MockHost::new("Jetty", log.clone())
            .serving_requests()
            .failing_on(HostPhase::RequestContext);
        let mut registry = registry(
            &host,
            vec![MockComponent::new(component_def("cdi", "Weld"), log.clone())],
        );

        let err = orchestrate(&mut host, &mut registry, &Config::default()).unwrap_err();
        match err {
            KernelError::RequestContext { ref host, .. } => assert_eq!(host, "Jetty"),
            ref other => panic!("unexpected error: {other}"),
        }
        assert_eq!(
            log.events(),
            vec!["host:init_server", "host:init_request_context"]
        );
        assert_eq!(log.count("Weld:init"), 0);
    }

    #[test]
    fn test_start_failure() {
        let log = EventLog::new();
        let mut host = MockHost::new("Jetty", log.clone()).failing_on(HostPhase::StartServer);
        let mut registry = registry(&host, Vec::new());

        let err = orchestrate(&mut host, &mut registry, &Config::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "host Jetty failed to start: Lifecycle failure: mock failure in host:start_server"
        );
    }
}
