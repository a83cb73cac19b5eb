//! `keel check`: validate a deployment offline.
//!
//! Reads `Component.toml` manifests, builds the capability registry against
//! a described host, and validates every dependency. Nothing is started.
//! A manifest that cannot be read or parsed fails the check.

use std::path::PathBuf;

use anyhow::{Context, Result};
use keel_component::{Capability, ComponentDiscovery, HostDescriptor, ManifestDiscovery};
use keel_kernel::Application;
use tracing::debug;

use crate::output;

/// One accepted component, in lifecycle order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CheckedComponent {
    pub(crate) capability: String,
    pub(crate) implementation: String,
    pub(crate) description: Option<String>,
}

/// Build the host description from `--host-name` and `--provides`.
pub(crate) fn host_descriptor(name: &str, provides: &[String]) -> Result<HostDescriptor> {
    let capabilities = provides
        .iter()
        .map(|id| Capability::new(id.as_str()).with_context(|| format!("--provides {id}")))
        .collect::<Result<Vec<_>>>()?;
    Ok(HostDescriptor::new(name).with_capabilities(capabilities))
}

/// Discover, register and validate the components under `dirs`.
pub(crate) fn check_components(
    dirs: &[PathBuf],
    host: &HostDescriptor,
) -> Result<Vec<CheckedComponent>> {
    let components = ManifestDiscovery::new(dirs.to_vec()).strict().discover()?;
    let registry = Application::prepare(host, components)?;
    debug!(count = registry.len(), host = %host.name(), "Component set accepted");

    Ok(registry
        .iter()
        .map(|descriptor| CheckedComponent {
            capability: descriptor.capability().id().to_owned(),
            implementation: descriptor.implementation_name().to_owned(),
            description: descriptor.definition().description.clone(),
        })
        .collect())
}

/// Run `keel check` and print the result.
pub(crate) fn run_check(dirs: Vec<PathBuf>, host_name: &str, provides: &[String]) -> Result<()> {
    let dirs = if dirs.is_empty() {
        vec![std::env::current_dir().context("failed to resolve current directory")?]
    } else {
        dirs
    };
    let host = host_descriptor(host_name, provides)?;
    let accepted = check_components(&dirs, &host)?;

    println!("{}", output::title("Component check"));
    for (i, row) in accepted.iter().enumerate() {
        println!("{}", output::component_row(i.saturating_add(1), row));
    }
    println!("{}", output::accepted(accepted.len(), host.name()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use keel_component::{ComponentError, discovery};
    use keel_kernel::KernelError;

    use super::*;

    fn write_manifest(dir: &Path, body: &str) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(dir.join(discovery::MANIFEST_FILE_NAME), body).unwrap();
    }

    #[test]
    fn test_accepts_valid_deployment() {
        let tmp = tempfile::tempdir().unwrap();
        write_manifest(
            &tmp.path().join("jersey"),
            "[component]\ncapability = \"jax-rs\"\nname = \"Jersey\"\ndescription = \"REST\"\n\n\
             [[requires]]\ncapability = \"servlet\"\n",
        );
        write_manifest(
            &tmp.path().join("weld"),
            "[component]\ncapability = \"cdi\"\nname = \"Weld\"\n",
        );

        let host = host_descriptor("Jetty", &["servlet".to_owned()]).unwrap();
        let accepted = check_components(&[tmp.path().to_path_buf()], &host).unwrap();

        let names: Vec<&str> = accepted.iter().map(|r| r.implementation.as_str()).collect();
        assert_eq!(names, vec!["Jersey", "Weld"]);
        assert_eq!(accepted[0].description.as_deref(), Some("REST"));
    }

    #[test]
    fn test_rejects_duplicate() {
        let tmp = tempfile::tempdir().unwrap();
        write_manifest(
            &tmp.path().join("a"),
            "[component]\ncapability = \"web\"\nname = \"Alpha\"\n",
        );
        write_manifest(
            &tmp.path().join("b"),
            "[component]\ncapability = \"web\"\nname = \"Beta\"\n",
        );

        let host = host_descriptor("Jetty", &[]).unwrap();
        let err = check_components(&[tmp.path().to_path_buf()], &host).unwrap_err();
        let err = err.downcast::<KernelError>().unwrap();
        assert!(matches!(
            err,
            KernelError::Component(ComponentError::DuplicateCapability { .. })
        ));
    }

    #[test]
    fn test_unparseable_manifest_fails_check() {
        let tmp = tempfile::tempdir().unwrap();
        write_manifest(
            &tmp.path().join("weld"),
            "[component]\ncapability = \"cdi\"\nname = \"Weld\"\n",
        );
        write_manifest(&tmp.path().join("broken"), "[component\ncapability = ");

        let host = host_descriptor("Jetty", &[]).unwrap();
        let err = check_components(&[tmp.path().to_path_buf()], &host).unwrap_err();
        match err.downcast::<ComponentError>().unwrap() {
            ComponentError::ManifestParseError { path, .. } => {
                assert!(path.starts_with(tmp.path().join("broken")));
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_directory_fails_check() {
        let tmp = tempfile::tempdir().unwrap();
        let host = host_descriptor("Jetty", &[]).unwrap();
        assert!(check_components(&[tmp.path().join("nope")], &host).is_err());
    }

    #[test]
    fn test_invalid_provides_rejected() {
        assert!(host_descriptor("Jetty", &["Servlet".to_owned()]).is_err());
    }
}
