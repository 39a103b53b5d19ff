//! License-gated installation of the NBCI runtime component.
//!
//! The installer drives the whole provisioning flow as a state machine:
//!
//! ```text
//! Idle → Validating → Exchanging → ConfiguringCredentials
//!      → Installing → Verifying → {Done | Failed}
//! ```
//!
//! # Components
//!
//! - **Orchestrator** — owns the flow, enforces idempotency (an already
//!   installed component short-circuits to `Done` with no network
//!   traffic), and runs the compensating credential cleanup when a step
//!   after credential persistence fails.
//! - **Package manager adapter** — a trait over the external tool that
//!   actually fetches and unpacks the component, so the orchestrator
//!   never reimplements resolution or download.
//!
//! Failures never escape [`Installer::install`]: the returned
//! [`InstallReport`] carries the terminal state and a human-readable
//! message.

mod error;
mod manager;
mod orchestrator;

pub use error::{InstallerError, InstallerResult};
pub use manager::{CliPackageManager, PackageManager, DEFAULT_PKG_COMMAND};
pub use orchestrator::{InstallReport, Installer, Phase};
