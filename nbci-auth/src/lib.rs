//! License validation and token exchange for NBCI.
//!
//! This crate talks to the NBCI licensing server on behalf of the
//! installer:
//! - **Validation** checks a customer's license key and reports its type
//!   and feature set. When the server is unreachable, a syntactically
//!   well-formed key is accepted with degraded trust so provisioning
//!   still works offline.
//! - **Token exchange** trades a validated key for a repository-scoped
//!   access token. This step never degrades: tokens only exist
//!   server-side.
//!
//! # Example
//!
//! ```
//! use nbci_auth::{AuthClient, AuthConfig};
//!
//! let client = AuthClient::new(AuthConfig::default());
//! ```

mod client;
mod error;
pub mod key;
mod token;

pub use client::{AuthClient, AuthConfig, LicenseInfo, Trust};
pub use error::{AuthError, AuthResult};
pub use token::AccessToken;
