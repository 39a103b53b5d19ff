//! Capability registry.

use crate::contract::{contract_spec, CapabilitySpec, ComponentManifest};
use std::collections::HashMap;
use tracing::debug;

/// A capability admitted into the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityBinding {
    /// The contract entry this binding satisfies.
    pub spec: &'static CapabilitySpec,
    /// Name of the component providing it.
    pub component: String,
    /// Version of that component.
    pub version: String,
}

/// Maps capability names to the component operations backing them.
///
/// Owned by the hosting application and passed explicitly — there is no
/// process-wide registry. Empty until a successful bootstrap populates
/// it.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    bindings: HashMap<String, CapabilityBinding>,
    version: Option<String>,
}

impl ComponentRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Populates the registry from a component manifest.
    ///
    /// Only exports whose name and signature match the fixed contract
    /// are admitted; anything else the manifest declares is skipped.
    /// Previous content is replaced. Returns the number of capabilities
    /// registered.
    pub fn populate(&mut self, manifest: &ComponentManifest) -> usize {
        self.clear();

        for export in &manifest.capabilities {
            match contract_spec(&export.name) {
                Some(spec) if spec.signature == export.signature => {
                    self.bindings.insert(
                        export.name.clone(),
                        CapabilityBinding {
                            spec,
                            component: manifest.name.clone(),
                            version: manifest.version.clone(),
                        },
                    );
                }
                Some(spec) => {
                    debug!(
                        capability = %export.name,
                        declared = %export.signature,
                        expected = %spec.signature,
                        "skipping export with mismatched signature"
                    );
                }
                None => {
                    debug!(capability = %export.name, "skipping export outside the contract");
                }
            }
        }

        if !self.bindings.is_empty() {
            self.version = Some(manifest.version.clone());
        }
        self.bindings.len()
    }

    /// Looks up a capability by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CapabilityBinding> {
        self.bindings.get(name)
    }

    /// Registered capability names, sorted.
    #[must_use]
    pub fn capability_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.bindings.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Version of the loaded component, if any.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// True if no capabilities are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Number of registered capabilities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Empties the registry.
    pub fn clear(&mut self) {
        self.bindings.clear();
        self.version = None;
    }
}
