//! Component discovery.
//!
//! A [`ComponentDiscovery`] hands the bootstrap an unordered list of
//! component instances. Two sources are provided: an explicit list
//! ([`StaticDiscovery`]) and `Component.toml` manifests on disk
//! ([`ManifestDiscovery`]), which yield metadata-only components used to
//! check a deployment without starting it. Manifest discovery is lenient by
//! default; [`ManifestDiscovery::strict`] turns a missing directory or a bad
//! manifest into an error.

use std::path::{Path, PathBuf};

use keel_config::Config;
use tracing::{debug, info, warn};

use crate::component::{Component, ComponentState};
use crate::error::{ComponentError, ComponentResult};
use crate::host::Host;
use crate::manifest::{ComponentDef, ComponentManifest};

/// Standard component manifest file name.
pub const MANIFEST_FILE_NAME: &str = "Component.toml";

/// A source of component instances.
pub trait ComponentDiscovery {
    /// Produce every component this source knows about. Order is the
    /// discovery order used for the lifecycle.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read at all.
    fn discover(&mut self) -> ComponentResult<Vec<Box<dyn Component>>>;
}

/// Discovery over an explicit list of instances.
///
/// The list is handed over on the first call; later calls return nothing.
#[derive(Default)]
pub struct StaticDiscovery {
    components: Vec<Box<dyn Component>>,
}

impl StaticDiscovery {
    #[must_use]
    pub fn new(components: Vec<Box<dyn Component>>) -> Self {
        Self { components }
    }

    /// Append a component, builder style.
    #[must_use]
    pub fn with(mut self, component: impl Component + 'static) -> Self {
        self.components.push(Box::new(component));
        self
    }

    pub fn push(&mut self, component: Box<dyn Component>) {
        self.components.push(component);
    }
}

impl std::fmt::Debug for StaticDiscovery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticDiscovery")
            .field("components", &self.components.len())
            .finish()
    }
}

impl ComponentDiscovery for StaticDiscovery {
    fn discover(&mut self) -> ComponentResult<Vec<Box<dyn Component>>> {
        Ok(std::mem::take(&mut self.components))
    }
}

/// A component known only by its manifest.
///
/// Its lifecycle entry points record the phase and log; nothing is loaded.
#[derive(Debug, Clone)]
pub struct ManifestComponent {
    def: ComponentDef,
    dir: PathBuf,
    state: ComponentState,
}

impl ManifestComponent {
    #[must_use]
    pub fn new(manifest: ComponentManifest, dir: PathBuf) -> Self {
        Self {
            def: manifest.into(),
            dir,
            state: ComponentState::Discovered,
        }
    }

    #[must_use]
    pub fn definition(&self) -> &ComponentDef {
        &self.def
    }

    /// Directory the manifest was found in.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn state(&self) -> &ComponentState {
        &self.state
    }
}

impl Component for ManifestComponent {
    fn metadata(&self) -> Option<ComponentDef> {
        Some(self.def.clone())
    }

    fn init(&mut self, host: &dyn Host, _config: &Config) -> ComponentResult<()> {
        debug!(
            capability = %self.def.capability.id(),
            implementation = %self.def.name,
            host = %host.descriptor().name(),
            dir = %self.dir.display(),
            "Initialized manifest component"
        );
        self.state = ComponentState::Initialized;
        Ok(())
    }

    fn load(&mut self) -> ComponentResult<()> {
        if self.state != ComponentState::Initialized {
            let reason = format!("{} loaded before init", self.def.name);
            self.state = ComponentState::Failed(reason.clone());
            return Err(ComponentError::Lifecycle(reason));
        }
        debug!(
            capability = %self.def.capability.id(),
            implementation = %self.def.name,
            "Loaded manifest component"
        );
        self.state = ComponentState::Loaded;
        Ok(())
    }
}

/// Discovery over `Component.toml` manifests in a set of directories.
#[derive(Debug, Clone, Default)]
pub struct ManifestDiscovery {
    paths: Vec<PathBuf>,
    strict: bool,
}

impl ManifestDiscovery {
    #[must_use]
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self {
            paths,
            strict: false,
        }
    }

    /// Fail on the first missing directory or unparseable manifest instead
    /// of skipping it.
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl ComponentDiscovery for ManifestDiscovery {
    fn discover(&mut self) -> ComponentResult<Vec<Box<dyn Component>>> {
        let manifests = if self.strict {
            discover_manifests_strict(&self.paths)?
        } else {
            discover_manifests(&self.paths)
        };
        Ok(manifests
            .into_iter()
            .map(|(manifest, dir)| {
                Box::new(ManifestComponent::new(manifest, dir)) as Box<dyn Component>
            })
            .collect())
    }
}

/// Discover component manifests in each of `paths`.
///
/// Missing directories and unreadable manifests are logged and skipped.
/// Results are sorted by directory within each path so discovery order is
/// stable across platforms.
#[must_use]
pub fn discover_manifests(paths: &[PathBuf]) -> Vec<(ComponentManifest, PathBuf)> {
    let mut manifests = Vec::new();

    for path in paths {
        if !path.exists() {
            warn!(path = %path.display(), "Component directory does not exist");
            continue;
        }
        info!(path = %path.display(), "Discovering components");
        match load_manifests_from_dir(path) {
            Ok(found) => manifests.extend(found),
            Err(e) => warn!(error = %e, "Failed to load components from directory"),
        }
    }

    info!(count = manifests.len(), "Discovered component manifests");
    manifests
}

fn discover_manifests_strict(
    paths: &[PathBuf],
) -> ComponentResult<Vec<(ComponentManifest, PathBuf)>> {
    let mut manifests = Vec::new();

    for path in paths {
        info!(path = %path.display(), "Discovering components");
        for (manifest_path, component_dir) in manifest_candidates(path)? {
            manifests.push((load_manifest(&manifest_path)?, component_dir));
        }
    }

    info!(count = manifests.len(), "Discovered component manifests");
    Ok(manifests)
}

/// Manifest files under `dir` paired with their component directory,
/// sorted by path.
fn manifest_candidates(dir: &Path) -> ComponentResult<Vec<(PathBuf, PathBuf)>> {
    let read_err = |e: std::io::Error| ComponentError::ManifestParseError {
        path: dir.to_path_buf(),
        message: e.to_string(),
    };

    let mut candidates = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.is_dir() {
            let manifest_path = path.join(MANIFEST_FILE_NAME);
            if manifest_path.is_file() {
                candidates.push((manifest_path, path));
            }
        } else if path.file_name().and_then(|n| n.to_str()) == Some(MANIFEST_FILE_NAME) {
            candidates.push((path, dir.to_path_buf()));
        }
    }
    candidates.sort();
    Ok(candidates)
}

/// Load all component manifests from a directory.
///
/// Looks for subdirectories containing `Component.toml`, as well as a
/// `Component.toml` directly in the directory.
///
/// # Errors
///
/// Returns [`ComponentError::ManifestParseError`] if the directory cannot
/// be read. Individual manifests that fail to parse are skipped.
pub fn load_manifests_from_dir(dir: &Path) -> ComponentResult<Vec<(ComponentManifest, PathBuf)>> {
    let candidates = manifest_candidates(dir)?;

    let mut manifests = Vec::with_capacity(candidates.len());
    for (manifest_path, component_dir) in candidates {
        match load_manifest(&manifest_path) {
            Ok(manifest) => {
                debug!(
                    path = %manifest_path.display(),
                    capability = %manifest.component.capability.id(),
                    implementation = %manifest.component.name,
                    "Loaded component manifest"
                );
                manifests.push((manifest, component_dir));
            },
            Err(e) => {
                warn!(
                    path = %manifest_path.display(),
                    error = %e,
                    "Failed to load component manifest"
                );
            },
        }
    }

    Ok(manifests)
}

/// Load a single component manifest from a TOML file.
///
/// # Errors
///
/// Returns [`ComponentError::ManifestParseError`] if the file cannot be
/// read or is not a valid manifest.
pub fn load_manifest(path: &Path) -> ComponentResult<ComponentManifest> {
    let content =
        std::fs::read_to_string(path).map_err(|e| ComponentError::ManifestParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    toml::from_str(&content).map_err(|e| ComponentError::ManifestParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
