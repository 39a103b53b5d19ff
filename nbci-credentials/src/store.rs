//! Credential file writing and cleanup.

use crate::error::{CredentialError, CredentialResult};
use chrono::Utc;
use nbci_auth::AccessToken;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Directory under the user's home holding NBCI state.
const NBCI_DIR: &str = ".nbci";
/// Transport credential file name.
const CREDENTIAL_FILE: &str = "git-credentials";
/// Configuration file name.
const CONFIG_FILE: &str = "nbci.cfg";

/// Locations of the credential and configuration files.
#[derive(Debug, Clone)]
pub struct CredentialPaths {
    /// File receiving the transport credential line.
    pub credential_file: PathBuf,
    /// File receiving the key-value configuration.
    pub config_file: PathBuf,
    /// Host embedded in the credential line.
    pub host: String,
}

impl CredentialPaths {
    /// Resolves the default paths under `~/.nbci/`.
    ///
    /// # Errors
    ///
    /// Fails if the home directory cannot be determined.
    pub fn resolve() -> CredentialResult<Self> {
        let home = dirs::home_dir().ok_or(CredentialError::NoHomeDir)?;
        Ok(Self::in_dir(home.join(NBCI_DIR)))
    }

    /// Places both files inside `dir`. Used by tests and callers with a
    /// non-default layout.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            credential_file: dir.join(CREDENTIAL_FILE),
            config_file: dir.join(CONFIG_FILE),
            host: "github.com".to_string(),
        }
    }
}

/// Writes, rewrites, and removes the provisioning credential files.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    paths: CredentialPaths,
}

impl CredentialStore {
    /// Creates a store over the given paths.
    #[must_use]
    pub fn new(paths: CredentialPaths) -> Self {
        Self { paths }
    }

    /// Path of the transport credential file.
    #[must_use]
    pub fn credential_file(&self) -> &Path {
        &self.paths.credential_file
    }

    /// Path of the configuration file.
    #[must_use]
    pub fn config_file(&self) -> &Path {
        &self.paths.config_file
    }

    /// Writes the transport credential line for `token`.
    ///
    /// Overwrites any previous content; safe to call repeatedly. The
    /// file carries owner-only permissions from creation onward — it is
    /// never briefly world-readable.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors creating the directory or writing the file.
    pub fn persist_token(&self, token: &AccessToken) -> CredentialResult<()> {
        let line = format!(
            "https://{}:x-oauth-basic@{}\n",
            token.expose(),
            self.paths.host
        );
        write_private(&self.paths.credential_file, line.as_bytes())?;
        info!(path = %self.paths.credential_file.display(), "wrote transport credential");
        Ok(())
    }

    /// Records the raw license key in the configuration file, along with
    /// the activation timestamp.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors creating the directory or writing the file.
    pub fn persist_key(&self, api_key: &str) -> CredentialResult<()> {
        let contents = format!(
            "api_key = {api_key}\nactivated_at = {}\n",
            Utc::now().to_rfc3339()
        );
        write_private(&self.paths.config_file, contents.as_bytes())?;
        info!(path = %self.paths.config_file.display(), "recorded license key");
        Ok(())
    }

    /// Points the ambient git credential helper at the credential file.
    ///
    /// Best-effort: the credential file alone is enough for the package
    /// manager, so a missing or failing `git` binary only logs a
    /// warning. Returns whether the helper was configured.
    pub fn configure_helper(&self) -> bool {
        let helper = format!("store --file {}", self.paths.credential_file.display());
        match std::process::Command::new("git")
            .args(["config", "--global", "credential.helper", &helper])
            .output()
        {
            Ok(out) if out.status.success() => {
                debug!("configured git credential helper");
                true
            }
            Ok(out) => {
                warn!(status = %out.status, "git credential helper configuration failed, continuing without it");
                false
            }
            Err(e) => {
                warn!("could not run git to configure credential helper: {e}");
                false
            }
        }
    }

    /// Removes the transport credential file if present.
    ///
    /// Compensating action for a failed installation: best-effort, never
    /// raises. The configuration file is left alone — it carries the
    /// customer's own key, not the download secret.
    pub fn cleanup(&self) {
        match fs::remove_file(&self.paths.credential_file) {
            Ok(()) => info!("removed transport credential"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("failed to remove transport credential: {e}"),
        }
    }
}

/// Writes `contents` to `path` with owner-only permissions.
///
/// On Unix the 0o600 mode is set at open time, so the file never exists
/// with wider permissions. Truncates any previous content.
fn write_private(path: &Path, contents: &[u8]) -> CredentialResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(contents)?;

    // mode() only applies at creation; re-assert for rewrites of a
    // pre-existing file.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}
