//! Project configuration (registrar.yaml) data structures

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{self, Result};
use crate::registry::grammar;

/// Project config filename
pub const CONFIG_FILE: &str = "registrar.yaml";

/// Project configuration from registrar.yaml
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Directory that module paths are computed relative to
    pub source_root: String,

    /// Directory holding package directories, relative to `source_root`
    pub packages_dir: String,

    /// Glob matched against file names to find definitions files
    pub definitions_file: String,

    /// Registry (aggregator) file, relative to `source_root`
    pub registry_file: String,

    /// Import line that must be present exactly once in the registry
    pub base_import: String,

    /// Symbol always exported by the registry
    pub base_symbol: String,

    /// Packages merged regardless of the enablement store
    pub always_on: Vec<String>,

    /// Enablement store file, relative to the project root
    pub store: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            source_root: "src".to_string(),
            packages_dir: "modules".to_string(),
            definitions_file: "models.py".to_string(),
            registry_file: "database/__init__.py".to_string(),
            base_import: "from app.extensions import db".to_string(),
            base_symbol: "db".to_string(),
            always_on: Vec::new(),
            store: ".registrar/packages.json".to_string(),
        }
    }
}

impl ProjectConfig {
    /// Parse project configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not a map
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize project configuration to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|e| error::config::read_failed(path, e))?;
        Self::from_yaml(&content).map_err(|e| match e {
            crate::error::RegistrarError::ConfigParseFailed { reason, .. } => {
                error::config::parse_failed(path, reason)
            }
            other => other,
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !grammar::is_identifier(&self.base_symbol) {
            return Err(error::config::invalid(format!(
                "base_symbol '{}' must be an identifier",
                self.base_symbol
            )));
        }

        let Some((_, symbols)) = grammar::parse_import(&self.base_import) else {
            return Err(error::config::invalid(format!(
                "base_import '{}' must have the form 'from MODULE import NAME'",
                self.base_import
            )));
        };
        if !symbols.contains(&self.base_symbol) {
            return Err(error::config::invalid(format!(
                "base_import '{}' does not import base_symbol '{}'",
                self.base_import, self.base_symbol
            )));
        }

        if self.definitions_file.trim().is_empty() {
            return Err(error::config::invalid("definitions_file must not be empty"));
        }
        if wax::Glob::new(&self.definitions_file).is_err() {
            return Err(error::config::invalid(format!(
                "definitions_file '{}' is not a valid glob",
                self.definitions_file
            )));
        }

        if self.registry_file.trim().is_empty() {
            return Err(error::config::invalid("registry_file must not be empty"));
        }

        Ok(())
    }
}
