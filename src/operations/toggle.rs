//! Enable/disable operation module
//!
//! Flips a package's enablement flag in the store. A package directory that
//! exists on disk but was never registered is registered on first enable.

use tracing::debug;

use crate::error::{self, Result};
use crate::project::Project;
use crate::registry::grammar;
use crate::store::{DEFAULT_VERSION, EnablementStore, PackageDescriptor};

/// What a toggle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The flag changed
    Changed,
    /// The flag already had the requested value
    Unchanged,
    /// The package had no descriptor and was registered enabled
    Registered,
}

/// High-level enable/disable operation
pub struct ToggleOperation<'a> {
    project: &'a Project,
}

impl<'a> ToggleOperation<'a> {
    pub fn new(project: &'a Project) -> Self {
        Self { project }
    }

    pub fn execute(&self, name: &str, enabled: bool) -> Result<ToggleOutcome> {
        let store = self.project.store();
        let index = store.load()?;

        if index.get(name).is_some() {
            let changed = store.set_enabled(name, enabled)?;
            return Ok(if changed {
                ToggleOutcome::Changed
            } else {
                ToggleOutcome::Unchanged
            });
        }

        // Only importable names can be written into the registry
        if !grammar::is_identifier(name) {
            return Err(error::package::invalid_name(name));
        }
        let dir = self.project.packages_dir().join(name);
        if !dir.is_dir() {
            return Err(error::package::not_found(name));
        }
        if !enabled {
            debug!(package = name, "Package never registered, nothing to disable");
            return Ok(ToggleOutcome::Unchanged);
        }

        let descriptor =
            PackageDescriptor::new(name, self.project.relative(&dir), true, DEFAULT_VERSION)?;
        store.register(descriptor, "Enabled Package")?;
        Ok(ToggleOutcome::Registered)
    }

    /// Whether the gate lets `name` through regardless of the store
    pub fn is_always_on(&self, name: &str) -> bool {
        self.project.config.always_on.iter().any(|n| n == name)
    }
}
