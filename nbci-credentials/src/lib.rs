//! Secure persistence of NBCI provisioning credentials.
//!
//! Two files live under the NBCI home directory (default `~/.nbci/`):
//! - `git-credentials` — a single transport credential line the package
//!   manager uses to fetch the gated component;
//! - `nbci.cfg` — key-value configuration recording the customer's
//!   license key and activation time.
//!
//! Both hold secret or customer-identifying material and carry
//! owner-only permissions from the moment they exist. Removing the
//! transport credential again is the installer's compensating action
//! when an installation fails after credentials were written.

mod error;
mod store;

pub use error::{CredentialError, CredentialResult};
pub use store::{CredentialPaths, CredentialStore};
