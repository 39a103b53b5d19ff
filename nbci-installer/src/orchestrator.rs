//! Installation state machine.
//!
//! Credentials are persisted before installation; if installation or
//! verification then fails, the transport credential is removed again
//! so a valid secret never outlives a failed install. Failures surface
//! in the returned report, never as panics or raw errors.

use crate::error::InstallerError;
use crate::manager::PackageManager;
use nbci_auth::{AuthClient, Trust};
use nbci_credentials::CredentialStore;
use nbci_host::{BootstrapOutcome, ComponentLoader, ComponentRegistry};
use tracing::{info, warn};

/// States of the installation flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing started yet.
    Idle,
    /// Checking the license key against the licensing server.
    Validating,
    /// Trading the key for an access token.
    Exchanging,
    /// Persisting credentials for the package manager.
    ConfiguringCredentials,
    /// Package manager fetching and installing the component.
    Installing,
    /// Confirming the component is now detectable.
    Verifying,
    /// Flow finished successfully.
    Done,
    /// Flow aborted.
    Failed,
}

/// Result of running the installation flow.
#[derive(Debug, Clone)]
pub struct InstallReport {
    /// Terminal state: [`Phase::Done`] or [`Phase::Failed`].
    pub outcome: Phase,
    /// Last phase the flow entered before terminating.
    pub phase_reached: Phase,
    /// Human-readable failure description.
    pub error: Option<String>,
}

impl InstallReport {
    fn done(phase_reached: Phase) -> Self {
        Self {
            outcome: Phase::Done,
            phase_reached,
            error: None,
        }
    }

    fn failed(phase_reached: Phase, error: String) -> Self {
        Self {
            outcome: Phase::Failed,
            phase_reached,
            error: Some(error),
        }
    }

    /// True if the flow ended in [`Phase::Done`].
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.outcome == Phase::Done
    }
}

/// Orchestrates license validation, credential setup, and installation.
pub struct Installer {
    auth: AuthClient,
    store: CredentialStore,
    manager: Box<dyn PackageManager>,
    loader: ComponentLoader,
    package: String,
}

impl Installer {
    /// Wires an installer from its collaborators. The package name is
    /// taken from the loader.
    #[must_use]
    pub fn new(
        auth: AuthClient,
        store: CredentialStore,
        manager: Box<dyn PackageManager>,
        loader: ComponentLoader,
    ) -> Self {
        let package = loader.package().to_string();
        Self {
            auth,
            store,
            manager,
            loader,
            package,
        }
    }

    /// Runs the provisioning flow for `api_key`.
    ///
    /// Idempotent: when the component is already installed and `force`
    /// is false, returns `Done` immediately without touching the
    /// network. All failures land in the report; this method never
    /// panics and never returns an error.
    pub async fn install(&self, api_key: &str, force: bool) -> InstallReport {
        if self.loader.check_installation() && !force {
            info!(package = %self.package, "component already installed, nothing to do");
            return InstallReport::done(Phase::Idle);
        }

        info!(package = %self.package, force, "starting installation");

        match self.run(api_key).await {
            Ok(()) => {
                info!(package = %self.package, "installation complete");
                InstallReport::done(Phase::Verifying)
            }
            Err((phase, e)) => {
                let message = e.to_string();
                warn!(?phase, error = %message, "installation failed");
                InstallReport::failed(phase, message)
            }
        }
    }

    /// The flow proper. Errors carry the phase they occurred in;
    /// cleanup has already run by the time an error is returned.
    async fn run(&self, api_key: &str) -> Result<(), (Phase, InstallerError)> {
        // Validating
        let license = self.auth.validate(api_key).await;
        if !license.valid {
            return Err((Phase::Validating, InstallerError::InvalidLicense));
        }
        if license.trust == Trust::Degraded {
            warn!("license accepted offline with degraded trust");
        }
        info!(
            license_type = license.license_type.as_deref().unwrap_or("unknown"),
            "license validated"
        );

        // Exchanging — fatal on any error, nothing persisted yet.
        let token = self
            .auth
            .exchange(api_key)
            .await
            .map_err(|e| (Phase::Exchanging, e.into()))?;

        // ConfiguringCredentials
        self.store.persist_token(&token).map_err(|e| {
            // A partial file may exist; remove it before reporting.
            self.store.cleanup();
            (Phase::ConfiguringCredentials, e.into())
        })?;
        self.store.configure_helper();

        // Installing — from here on, failure must not leave the
        // credential behind.
        if let Err(e) = self.manager.install(&self.package).await {
            self.store.cleanup();
            return Err((Phase::Installing, e));
        }

        // Verifying
        if !self.loader.check_installation() {
            self.store.cleanup();
            return Err((Phase::Verifying, InstallerError::VerificationFailed));
        }
        if let Err(e) = self.store.persist_key(api_key) {
            // The component is installed and usable; the config record
            // is a convenience, not a gate.
            warn!("installed, but failed to record license key: {e}");
        }

        Ok(())
    }

    /// Reports whether the gated component is currently installed.
    ///
    /// A fresh probe on every call, identical to what the entry guard
    /// uses.
    #[must_use]
    pub fn check_installation(&self) -> bool {
        self.loader.check_installation()
    }

    /// Refreshes `registry` from the installed component, typically
    /// right after a successful install.
    pub fn bootstrap(&self, registry: &mut ComponentRegistry) -> BootstrapOutcome {
        self.loader.bootstrap(registry)
    }
}
