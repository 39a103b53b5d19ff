//! Error types for credential persistence.

use thiserror::Error;

/// Result type for credential operations.
pub type CredentialResult<T> = Result<T, CredentialError>;

/// Errors writing or removing credential files.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Home directory could not be determined.
    #[error("could not determine home directory")]
    NoHomeDir,

    /// Filesystem error.
    #[error("credential file I/O error: {0}")]
    Io(#[from] std::io::Error),
}
