//! Error types for the installer.

use thiserror::Error;

/// Result type for installer operations.
pub type InstallerResult<T> = Result<T, InstallerError>;

/// Errors in the installation flow.
#[derive(Debug, Error)]
pub enum InstallerError {
    /// The licensing server rejected the key.
    #[error("invalid license key")]
    InvalidLicense,

    /// Token exchange failed.
    #[error(transparent)]
    Auth(#[from] nbci_auth::AuthError),

    /// Credential persistence failed.
    #[error(transparent)]
    Credential(#[from] nbci_credentials::CredentialError),

    /// The package manager did not complete the install.
    #[error("installation failed: {0}")]
    InstallationFailed(String),

    /// The component was still absent after the package manager
    /// reported success.
    #[error("component not detectable after installation")]
    VerificationFailed,
}
