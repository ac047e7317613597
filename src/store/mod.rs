//! Package enablement store
//!
//! The store is the source of truth for which packages are active. The
//! registry pipeline only reads it through [`EnablementStore::list_enabled`];
//! operator commands flip flags through [`EnablementStore::set_enabled`].
//!
//! [`JsonPackageStore`] keeps descriptors and an action log in one JSON file:
//!
//! ```json
//! {
//!   "packages": [
//!     { "name": "widgets", "path": "src/modules/widgets", "enabled": true, "version": "1.0.0" }
//!   ],
//!   "log": [
//!     { "action": "Enabled Package", "package": "widgets", "timestamp": "2024-05-01T12:00:00Z" }
//!   ]
//! }
//! ```

#![allow(clippy::expect_used)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::common;
use crate::error::{self, RegistrarError, Result};

/// Version given to packages registered without one
pub const DEFAULT_VERSION: &str = "1.0.0";

static SEMVER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(0|[1-9]\d*)\.(0|[1-9]\d*)\.(0|[1-9]\d*)(?:-[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*)?(?:\+[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*)?$",
    )
    .expect("static pattern")
});

/// Check if a version string is a semantic version
pub fn is_semver(version: &str) -> bool {
    SEMVER.is_match(version)
}

/// A package known to the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDescriptor {
    /// Package directory name
    pub name: String,
    /// Package directory, relative to the project root
    pub path: String,
    pub enabled: bool,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

impl PackageDescriptor {
    /// Create a descriptor, validating the version
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        enabled: bool,
        version: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        let version = version.into();
        if !is_semver(&version) {
            return Err(RegistrarError::InvalidVersion { name, version });
        }
        Ok(Self {
            name,
            path: path.into(),
            enabled,
            version,
        })
    }
}

/// An entry in the store's action log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub action: String,
    pub package: String,
    pub timestamp: DateTime<Utc>,
}

/// Contents of the store file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageIndex {
    #[serde(default)]
    pub packages: Vec<PackageDescriptor>,
    #[serde(default)]
    pub log: Vec<LogEntry>,
}

impl PackageIndex {
    pub fn get(&self, name: &str) -> Option<&PackageDescriptor> {
        self.packages.iter().find(|p| p.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut PackageDescriptor> {
        self.packages.iter_mut().find(|p| p.name == name)
    }

    /// Insert a descriptor or replace the one with the same name
    pub fn upsert(&mut self, descriptor: PackageDescriptor) {
        match self.get_mut(&descriptor.name) {
            Some(existing) => *existing = descriptor,
            None => {
                self.packages.push(descriptor);
                self.packages.sort_by(|a, b| a.name.cmp(&b.name));
            }
        }
    }

    /// Append an action to the log
    pub fn record(&mut self, action: impl Into<String>, package: impl Into<String>) {
        self.log.push(LogEntry {
            action: action.into(),
            package: package.into(),
            timestamp: Utc::now(),
        });
    }
}

/// Read/write contract of the enablement store
pub trait EnablementStore {
    /// List every package currently marked enabled
    fn list_enabled(&self) -> Result<Vec<PackageDescriptor>>;

    /// Set the enabled flag of a package
    ///
    /// Returns whether the flag changed.
    fn set_enabled(&self, name: &str, enabled: bool) -> Result<bool>;
}

/// Enablement store backed by a JSON file
#[derive(Debug, Clone)]
pub struct JsonPackageStore {
    path: PathBuf,
}

impl JsonPackageStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the index; a missing file is an empty store
    pub fn load(&self) -> Result<PackageIndex> {
        if !self.path.exists() {
            return Ok(PackageIndex::default());
        }
        let content = fs::read_to_string(&self.path)
            .map_err(|e| error::store::unavailable(&self.path, e))?;
        serde_json::from_str(&content).map_err(|e| error::store::unavailable(&self.path, e))
    }

    /// Save the index atomically
    pub fn save(&self, index: &PackageIndex) -> Result<()> {
        let mut content = serde_json::to_string_pretty(index)?;
        content.push('\n');
        common::fs::write_atomic(&self.path, content.as_bytes())
    }

    /// Insert or replace a descriptor and log the action
    pub fn register(&self, descriptor: PackageDescriptor, action: &str) -> Result<()> {
        let mut index = self.load()?;
        debug!(package = %descriptor.name, action, "Registering package");
        index.record(action, &descriptor.name);
        index.upsert(descriptor);
        self.save(&index)
    }
}

impl EnablementStore for JsonPackageStore {
    fn list_enabled(&self) -> Result<Vec<PackageDescriptor>> {
        Ok(self
            .load()?
            .packages
            .into_iter()
            .filter(|p| p.enabled)
            .collect())
    }

    fn set_enabled(&self, name: &str, enabled: bool) -> Result<bool> {
        let mut index = self.load()?;
        let descriptor = index
            .get_mut(name)
            .ok_or_else(|| error::package::not_found(name))?;
        if descriptor.enabled == enabled {
            return Ok(false);
        }
        descriptor.enabled = enabled;

        let action = if enabled {
            "Enabled Package"
        } else {
            "Disabled Package"
        };
        index.record(action, name);
        self.save(&index)?;
        debug!(package = name, enabled, "Updated enablement flag");
        Ok(true)
    }
}
