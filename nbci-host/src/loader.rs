//! Component detection and loading.
//!
//! Nothing here is process-wide: the hosting application calls
//! [`ComponentLoader::bootstrap`] explicitly at startup, keeps the
//! resulting registry, and calls bootstrap again after a successful
//! installation to refresh it.

use crate::contract::{ComponentManifest, MANIFEST_FILE};
use crate::error::{HostError, HostResult};
use crate::registry::ComponentRegistry;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Component root under the user's home directory.
pub const DEFAULT_COMPONENT_DIR: &str = ".nbci/components";

/// Package name of the gated runtime component.
pub const RUNTIME_PACKAGE: &str = "nbci-core";

/// Resolves the default component root, if a home directory exists.
#[must_use]
pub fn default_component_root() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DEFAULT_COMPONENT_DIR))
}

/// Outcome of a bootstrap attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// Component loaded; registry populated.
    Loaded {
        /// Version from the manifest.
        version: String,
        /// Number of capabilities admitted into the registry.
        capabilities: usize,
    },
    /// Component not present; guidance emitted.
    NotInstalled,
    /// Package directory exists but its manifest is not there yet — the
    /// expected state while an installation is still in flight.
    Pending,
    /// Component present but unusable; registry left empty.
    Degraded {
        /// What went wrong.
        warning: String,
    },
}

/// Detects and loads the installed gated component.
#[derive(Debug, Clone)]
pub struct ComponentLoader {
    component_root: PathBuf,
    package: String,
}

impl ComponentLoader {
    /// Creates a loader over `component_root` for the named package.
    #[must_use]
    pub fn new(component_root: impl Into<PathBuf>, package: impl Into<String>) -> Self {
        Self {
            component_root: component_root.into(),
            package: package.into(),
        }
    }

    /// Package name this loader looks for.
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Directory the package installs into.
    #[must_use]
    pub fn package_dir(&self) -> PathBuf {
        self.component_root.join(&self.package)
    }

    /// Reports whether the component is present in the local registry.
    ///
    /// A fresh filesystem probe on every call; nothing is cached across
    /// calls or processes.
    #[must_use]
    pub fn check_installation(&self) -> bool {
        self.package_dir().is_dir()
    }

    /// Reads the installed component's manifest.
    fn read_manifest(&self) -> HostResult<ComponentManifest> {
        let path = self.package_dir().join(MANIFEST_FILE);
        if !path.is_file() {
            return Err(HostError::ManifestMissing(path));
        }

        let raw = fs::read_to_string(&path)?;
        serde_json::from_str(&raw)
            .map_err(|e| HostError::ManifestInvalid(format!("{}: {e}", path.display())))
    }

    /// Version string of the installed component, if readable.
    #[must_use]
    pub fn installed_version(&self) -> Option<String> {
        self.read_manifest().ok().map(|m| m.version)
    }

    /// Loads the component and publishes its contract capabilities.
    ///
    /// Safe to call again after an install to refresh the registry.
    /// Never panics and never returns an error — the outcome reports
    /// what happened, and the registry is left empty on anything but
    /// [`BootstrapOutcome::Loaded`].
    pub fn bootstrap(&self, registry: &mut ComponentRegistry) -> BootstrapOutcome {
        if !self.check_installation() {
            info!(
                package = %self.package,
                "component not installed; run the installer with your license key"
            );
            registry.clear();
            return BootstrapOutcome::NotInstalled;
        }

        let manifest = match self.read_manifest() {
            Ok(m) => m,
            Err(HostError::ManifestMissing(path)) => {
                // Install still in flight; not worth a warning.
                debug!(path = %path.display(), "component manifest not present yet");
                registry.clear();
                return BootstrapOutcome::Pending;
            }
            Err(e) => {
                warn!("component present but could not be loaded: {e}");
                registry.clear();
                return BootstrapOutcome::Degraded {
                    warning: e.to_string(),
                };
            }
        };

        let capabilities = registry.populate(&manifest);
        if capabilities == 0 {
            let warning = format!(
                "component {} v{} exports nothing from the capability contract",
                manifest.name, manifest.version
            );
            warn!("{warning}");
            registry.clear();
            return BootstrapOutcome::Degraded { warning };
        }

        info!(
            package = %manifest.name,
            version = %manifest.version,
            capabilities,
            "component loaded"
        );
        BootstrapOutcome::Loaded {
            version: manifest.version,
            capabilities,
        }
    }
}
