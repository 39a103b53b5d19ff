//! Access token handling.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A repository-scoped access token obtained from the licensing server.
///
/// The token is secret material: `Debug` redacts it. Call
/// [`AccessToken::expose`] at the single point where the raw value is
/// needed (writing the transport credential file).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}
