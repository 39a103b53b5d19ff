//! Hosting layer for the license-gated NBCI runtime component.
//!
//! The runtime component ships separately from this workspace; the
//! installer fetches it through the package manager after licensing.
//! This crate is what the hosting application uses to work with the
//! installed copy:
//!
//! - **Contract** — the fixed, statically declared set of capabilities
//!   the component may expose. Nothing outside the contract ever enters
//!   the registry, no matter what an installed package declares.
//! - **Registry** — an explicit, caller-owned map from capability name
//!   to the component operation backing it. No process-wide state.
//! - **Loader** — detects the installed component, reads its manifest,
//!   and populates the registry. Invoked deliberately at application
//!   startup (and again after an install), returning an explicit
//!   [`BootstrapOutcome`] rather than relying on log output.

mod contract;
mod error;
mod loader;
mod registry;

pub use contract::{
    contract_spec, CapabilityExport, CapabilitySpec, ComponentManifest, COMPONENT_CONTRACT,
    MANIFEST_FILE,
};
pub use error::{HostError, HostResult};
pub use loader::{
    default_component_root, BootstrapOutcome, ComponentLoader, DEFAULT_COMPONENT_DIR,
    RUNTIME_PACKAGE,
};
pub use registry::{CapabilityBinding, ComponentRegistry};
