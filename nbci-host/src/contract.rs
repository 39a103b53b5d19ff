//! The gated component's capability contract.
//!
//! Only the operations named here, with matching signatures, are ever
//! exposed through the registry. An installed package may declare more;
//! the surplus is ignored.

use serde::{Deserialize, Serialize};

/// Name of the manifest file inside an installed component package.
pub const MANIFEST_FILE: &str = "component.json";

/// A single operation in the component contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilitySpec {
    /// Capability name.
    pub name: &'static str,
    /// Declared signature, as published in the component manifest.
    pub signature: &'static str,
}

/// The fixed capability surface of the NBCI runtime component.
pub const COMPONENT_CONTRACT: &[CapabilitySpec] = &[
    CapabilitySpec {
        name: "acquire",
        signature: "(session-config) -> session",
    },
    CapabilitySpec {
        name: "calibrate",
        signature: "(session, samples) -> calibration",
    },
    CapabilitySpec {
        name: "train",
        signature: "(calibration, dataset) -> model",
    },
    CapabilitySpec {
        name: "infer",
        signature: "(model, window) -> prediction",
    },
    CapabilitySpec {
        name: "export-model",
        signature: "(model) -> artifact",
    },
];

/// Looks up a contract entry by capability name.
#[must_use]
pub fn contract_spec(name: &str) -> Option<&'static CapabilitySpec> {
    COMPONENT_CONTRACT.iter().find(|spec| spec.name == name)
}

/// One exported operation as declared by an installed component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityExport {
    /// Exported capability name.
    pub name: String,
    /// Signature the component claims to implement.
    pub signature: String,
}

/// Sidecar manifest describing an installed component package.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentManifest {
    /// Package name.
    pub name: String,
    /// Installed version.
    pub version: String,
    /// Operations the component exports.
    pub capabilities: Vec<CapabilityExport>,
}
