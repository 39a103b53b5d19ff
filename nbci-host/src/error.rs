//! Error types for component loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for host operations.
pub type HostResult<T> = Result<T, HostError>;

/// Errors reading an installed component.
#[derive(Debug, Error)]
pub enum HostError {
    /// The package directory exists but carries no manifest yet.
    #[error("component manifest missing: {}", .0.display())]
    ManifestMissing(PathBuf),

    /// The manifest exists but cannot be used.
    #[error("component manifest invalid: {0}")]
    ManifestInvalid(String),

    /// Filesystem error.
    #[error("component I/O error: {0}")]
    Io(#[from] std::io::Error),
}
