//! Error types for the auth client.

use thiserror::Error;

/// Result type for auth operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Errors talking to the licensing server.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Key fails the syntactic prefix/length check.
    #[error("malformed license key")]
    MalformedKey,

    /// Transport failure (unreachable host, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The server refused to issue a token.
    #[error("token exchange failed: {0}")]
    TokenExchange(String),

    /// The server answered with a body we cannot use.
    #[error("invalid server response: {0}")]
    InvalidResponse(String),
}
