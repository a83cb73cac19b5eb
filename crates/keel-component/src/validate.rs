//! Dependency validation.
//!
//! Every required dependency must resolve to a peer component or to the
//! host. Optional dependencies may be absent, but when one is present its
//! provider must still satisfy the allow-list.

use tracing::{debug, error, info};

use crate::component::ComponentDescriptor;
use crate::error::{ComponentError, ComponentResult};
use crate::host::HostDescriptor;
use crate::manifest::Dependency;
use crate::registry::{ComponentRegistry, Provider};

/// Check the dependencies of every registered component. The first failure
/// is returned.
///
/// # Errors
///
/// Returns [`ComponentError::UnsatisfiedDependency`] if a required
/// capability has no provider, or [`ComponentError::ImplementationMismatch`]
/// if a provider is not in a dependency's allow-list.
pub fn validate(registry: &ComponentRegistry, host: &HostDescriptor) -> ComponentResult<()> {
    info!("Processing component dependencies");

    let result = registry.iter().try_for_each(|descriptor| {
        for dependency in descriptor.required() {
            let Some(provider) = registry.resolve(&dependency.capability, host) else {
                return Err(ComponentError::UnsatisfiedDependency {
                    capability: descriptor.capability().clone(),
                    implementation: descriptor.implementation_name().to_owned(),
                    missing: dependency.capability.clone(),
                });
            };
            check_allowed(descriptor, dependency, provider)?;
        }

        for dependency in descriptor.optional() {
            match registry.resolve(&dependency.capability, host) {
                Some(provider) => check_allowed(descriptor, dependency, provider)?,
                None => debug!(
                    capability = %descriptor.capability().id(),
                    optional = %dependency.capability.id(),
                    "Optional dependency not present"
                ),
            }
        }
        Ok(())
    });

    if let Err(ref e) = result {
        error!(error = %e, "Component dependency check failed");
    }
    result
}

fn check_allowed(
    descriptor: &ComponentDescriptor,
    dependency: &Dependency,
    provider: Provider<'_>,
) -> ComponentResult<()> {
    if dependency.accepts(provider.name()) {
        return Ok(());
    }
    Err(ComponentError::ImplementationMismatch {
        capability: descriptor.capability().clone(),
        implementation: descriptor.implementation_name().to_owned(),
        required: dependency.capability.clone(),
        allowed: dependency.implementations.clone(),
        provided_by: provider.name().to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use keel_config::Config;

    use super::*;
    use crate::capability::Capability;
    use crate::component::Component;
    use crate::host::Host;
    use crate::manifest::ComponentDef;

    struct Stub(ComponentDef);

    impl Component for Stub {
        fn metadata(&self) -> Option<ComponentDef> {
            Some(self.0.clone())
        }

        fn init(&mut self, _host: &dyn Host, _config: &Config) -> ComponentResult<()> {
            Ok(())
        }

        fn load(&mut self) -> ComponentResult<()> {
            Ok(())
        }
    }

    fn cap(id: &'static str) -> Capability {
        Capability::from_static(id)
    }

    fn check(defs: Vec<ComponentDef>, host: &HostDescriptor) -> ComponentResult<()> {
        let components = defs
            .into_iter()
            .map(|d| Box::new(Stub(d)) as Box<dyn Component>)
            .collect();
        let registry = ComponentRegistry::build(components, host)?;
        validate(&registry, host)
    }

    #[test]
    fn test_required_satisfied_by_peer() {
        let host = HostDescriptor::new("Jetty");
        let defs = vec![
            ComponentDef::new(cap("jax-rs"), "Jersey").requires(Dependency::on(cap("cdi"))),
            ComponentDef::new(cap("cdi"), "Weld"),
        ];
        assert!(check(defs, &host).is_ok());
    }

    #[test]
    fn test_required_satisfied_by_host() {
        let host = HostDescriptor::new("Jetty").with_capability(cap("servlet"));
        let defs =
            vec![ComponentDef::new(cap("jsp"), "Jasper").requires(Dependency::on(cap("servlet")))];
        assert!(check(defs, &host).is_ok());
    }

    #[test]
    fn test_required_missing() {
        let host = HostDescriptor::new("Jetty");
        let defs = vec![
            ComponentDef::new(cap("persistence"), "EclipseLink")
                .requires(Dependency::on(cap("security"))),
        ];
        let err = check(defs, &host).unwrap_err();
        assert!(matches!(err, ComponentError::UnsatisfiedDependency { .. }));
        assert_eq!(
            err.to_string(),
            "Component dependency unfulfilled. The component Persistence implemented by \
             EclipseLink requires Security, which was not found. Please make sure to include \
             the required component."
        );
    }

    #[test]
    fn test_required_peer_not_in_allow_list() {
        let host = HostDescriptor::new("Jetty");
        let defs = vec![
            ComponentDef::new(cap("jax-rs"), "Jersey")
                .requires(Dependency::on(cap("cdi")).implemented_by(["Weld", "OpenWebBeans"])),
            ComponentDef::new(cap("cdi"), "Other"),
        ];
        let err = check(defs, &host).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Component implementation dependency unfulfilled. The component JAX-RS implemented \
             by Jersey requires CDI implemented by one of the following implementations: [Weld, \
             OpenWebBeans], but it is provided by Other. Please make sure you use one of the \
             implementations required by this component."
        );
    }

    #[test]
    fn test_required_host_not_in_allow_list() {
        let host = HostDescriptor::new("Jetty").with_capability(cap("servlet"));
        let defs = vec![
            ComponentDef::new(cap("websocket"), "Tyrus")
                .requires(Dependency::on(cap("servlet")).implemented_by(["Undertow"])),
        ];
        match check(defs, &host).unwrap_err() {
            ComponentError::ImplementationMismatch {
                provided_by,
                allowed,
                ..
            } => {
                assert_eq!(provided_by, "Jetty");
                assert_eq!(allowed, vec!["Undertow"]);
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_optional_absent_passes() {
        let host = HostDescriptor::new("Jetty");
        let defs = vec![
            ComponentDef::new(cap("persistence"), "EclipseLink")
                .optional(Dependency::on(cap("cdi")).implemented_by(["Weld"])),
        ];
        assert!(check(defs, &host).is_ok());
    }

    #[test]
    fn test_optional_peer_mismatch() {
        let host = HostDescriptor::new("Jetty");
        let defs = vec![
            ComponentDef::new(cap("persistence"), "EclipseLink")
                .optional(Dependency::on(cap("cdi")).implemented_by(["Weld"])),
            ComponentDef::new(cap("cdi"), "OpenWebBeans"),
        ];
        assert!(matches!(
            check(defs, &host),
            Err(ComponentError::ImplementationMismatch { .. })
        ));
    }

    #[test]
    fn test_optional_host_mismatch() {
        let host = HostDescriptor::new("Jetty").with_capability(cap("servlet"));
        let defs = vec![
            ComponentDef::new(cap("jsf"), "Mojarra")
                .optional(Dependency::on(cap("servlet")).implemented_by(["Undertow"])),
        ];
        match check(defs, &host).unwrap_err() {
            ComponentError::ImplementationMismatch { provided_by, .. } => {
                assert_eq!(provided_by, "Jetty");
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_optional_host_allowed() {
        let host = HostDescriptor::new("Jetty").with_capability(cap("servlet"));
        let defs = vec![
            ComponentDef::new(cap("jsf"), "Mojarra")
                .optional(Dependency::on(cap("servlet")).implemented_by(["Jetty"])),
        ];
        assert!(check(defs, &host).is_ok());
    }

    #[test]
    fn test_first_failure_wins() {
        let host = HostDescriptor::new("Jetty");
        let defs = vec![
            ComponentDef::new(cap("jax-rs"), "Jersey").requires(Dependency::on(cap("cdi"))),
            ComponentDef::new(cap("persistence"), "EclipseLink")
                .requires(Dependency::on(cap("security"))),
        ];
        match check(defs, &host).unwrap_err() {
            ComponentError::UnsatisfiedDependency { missing, .. } => {
                assert_eq!(missing.id(), "cdi");
            },
            other => panic!("unexpected error: {other}"),
        }
    }
}
