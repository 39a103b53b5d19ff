//! HTTP client for the NBCI licensing server.
//!
//! Two endpoints matter to provisioning:
//! - `POST /auth/validate` checks a license key and reports its type and
//!   feature set.
//! - `POST /installer/github-token` exchanges a validated key for a
//!   repository-scoped access token.
//!
//! Validation degrades when the server is unreachable: a well-formed key
//! is accepted with [`Trust::Degraded`] so customers can provision while
//! offline. Token exchange never degrades — a token cannot be
//! synthesized locally.

use crate::error::{AuthError, AuthResult};
use crate::key;
use crate::token::AccessToken;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for the licensing server client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Base URL of the licensing server.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.nbci.io".to_string(),
            timeout_secs: 30,
        }
    }
}

/// How a validation verdict was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trust {
    /// Confirmed by the licensing server.
    Authoritative,
    /// Accepted by format inspection while the server was unreachable.
    Degraded,
}

/// Outcome of validating a license key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseInfo {
    /// Whether the key was accepted.
    pub valid: bool,
    /// License type reported by the server; `None` when unknown
    /// (rejected keys, degraded offline acceptance).
    pub license_type: Option<String>,
    /// Feature flags enabled for this license.
    pub features: BTreeSet<String>,
    /// How the verdict was reached.
    pub trust: Trust,
}

impl LicenseInfo {
    fn invalid() -> Self {
        Self {
            valid: false,
            license_type: None,
            features: BTreeSet::new(),
            trust: Trust::Authoritative,
        }
    }

    fn degraded() -> Self {
        Self {
            valid: true,
            license_type: None,
            features: BTreeSet::new(),
            trust: Trust::Degraded,
        }
    }
}

#[derive(Serialize)]
struct KeyRequest<'a> {
    api_key: &'a str,
}

#[derive(Deserialize)]
struct ValidateResponse {
    license_type: Option<String>,
    #[serde(default)]
    features: BTreeSet<String>,
}

#[derive(Deserialize)]
struct TokenResponse {
    github_token: String,
}

/// Client for the NBCI licensing server.
#[derive(Debug, Clone)]
pub struct AuthClient {
    config: AuthConfig,
    client: Client,
}

impl AuthClient {
    /// Creates a client with the given configuration.
    #[must_use]
    pub fn new(config: AuthConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to create HTTP client");

        Self { config, client }
    }

    /// Validates a license key against the licensing server.
    ///
    /// Never fails: rejected keys and unusable responses come back as
    /// `valid == false`, and a transport failure falls back to
    /// format-only acceptance with [`Trust::Degraded`]. Malformed keys
    /// are rejected before any request is made.
    pub async fn validate(&self, api_key: &str) -> LicenseInfo {
        if !key::is_well_formed(api_key) {
            debug!("license key failed format check, skipping server call");
            return LicenseInfo::invalid();
        }

        let response = self
            .client
            .post(format!("{}/auth/validate", self.config.base_url))
            .json(&KeyRequest { api_key })
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                warn!("licensing server unreachable ({e}), accepting well-formed key with degraded trust");
                return LicenseInfo::degraded();
            }
        };

        if !response.status().is_success() {
            debug!(status = %response.status(), "licensing server rejected key");
            return LicenseInfo::invalid();
        }

        match response.json::<ValidateResponse>().await {
            Ok(body) => LicenseInfo {
                valid: true,
                license_type: body.license_type,
                features: body.features,
                trust: Trust::Authoritative,
            },
            Err(e) => {
                // The server answered; an unusable answer is a rejection,
                // not a reason to degrade.
                warn!("unusable validate response: {e}");
                LicenseInfo::invalid()
            }
        }
    }

    /// Exchanges a validated key for a repository-scoped access token.
    ///
    /// No offline fallback here: a token only ever comes from the
    /// server, so any failure is fatal to the caller's flow.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MalformedKey`] for keys failing the format
    /// check, [`AuthError::Network`] on transport failure,
    /// [`AuthError::TokenExchange`] when the server refuses the key, and
    /// [`AuthError::InvalidResponse`] for an unusable 200 body.
    pub async fn exchange(&self, api_key: &str) -> AuthResult<AccessToken> {
        if !key::is_well_formed(api_key) {
            return Err(AuthError::MalformedKey);
        }

        let response = self
            .client
            .post(format!("{}/installer/github-token", self.config.base_url))
            .json(&KeyRequest { api_key })
            .send()
            .await
            .map_err(|e| AuthError::Network(format!("token exchange request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::TokenExchange(format!(
                "server returned {status}: {}",
                body.trim()
            )));
        }

        let body: TokenResponse = response.json().await.map_err(|e| {
            AuthError::InvalidResponse(format!("failed to parse token response: {e}"))
        })?;

        if body.github_token.is_empty() {
            return Err(AuthError::InvalidResponse(
                "empty token in response".to_string(),
            ));
        }

        debug!("token exchange succeeded");
        Ok(AccessToken::new(body.github_token))
    }
}
