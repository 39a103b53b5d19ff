//! Package manager adapter.
//!
//! Installation of the gated component is delegated to the external
//! `nbci-pkg` tool, which resolves, downloads, and unpacks the package
//! using the transport credential written during provisioning. The
//! trait keeps the orchestrator testable without the real binary.

use crate::error::{InstallerError, InstallerResult};
use async_trait::async_trait;
use nbci_host::ComponentLoader;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::{debug, info};

/// External package-manager binary invoked for installs.
pub const DEFAULT_PKG_COMMAND: &str = "nbci-pkg";

/// Abstract package-manager interface.
#[async_trait]
pub trait PackageManager: Send + Sync {
    /// Fetches and installs `package` into the local component root.
    async fn install(&self, package: &str) -> InstallerResult<()>;

    /// Returns the installed version of `package`, or `None` if absent.
    async fn installed_version(&self, package: &str) -> InstallerResult<Option<String>>;
}

/// Shells out to the external package-manager binary.
#[derive(Debug, Clone)]
pub struct CliPackageManager {
    command: String,
    component_root: PathBuf,
    credential_file: PathBuf,
}

impl CliPackageManager {
    /// Creates an adapter invoking `command` against `component_root`,
    /// pointing the tool at `credential_file` for authenticated fetches.
    #[must_use]
    pub fn new(
        command: impl Into<String>,
        component_root: impl Into<PathBuf>,
        credential_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            command: command.into(),
            component_root: component_root.into(),
            credential_file: credential_file.into(),
        }
    }
}

#[async_trait]
impl PackageManager for CliPackageManager {
    async fn install(&self, package: &str) -> InstallerResult<()> {
        info!(package, command = %self.command, "delegating install to package manager");

        let output = Command::new(&self.command)
            .arg("install")
            .arg(package)
            .arg("--root")
            .arg(&self.component_root)
            .env("NBCI_CREDENTIAL_FILE", &self.credential_file)
            .output()
            .await
            .map_err(|e| {
                InstallerError::InstallationFailed(format!("could not run {}: {e}", self.command))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(InstallerError::InstallationFailed(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        debug!(package, "package manager finished");
        Ok(())
    }

    async fn installed_version(&self, package: &str) -> InstallerResult<Option<String>> {
        let loader = ComponentLoader::new(&self.component_root, package);
        if !loader.check_installation() {
            return Ok(None);
        }
        Ok(loader.installed_version())
    }
}
