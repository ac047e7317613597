//! Fixture resolution
//!
//! Fixture files seed a database with records. Each file is a JSON array:
//!
//! ```json
//! [
//!   { "models": "User", "fields": [{ "email": "admin@example.com" }] }
//! ]
//! ```
//!
//! A fixture only loads if the registry exports its model symbol, so
//! resolution here goes through the registry rather than the packages.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{self, Result};
use crate::registry::RegistryDocument;

/// One model's records in a fixture file
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FixtureEntry {
    #[serde(rename = "models")]
    pub symbol: String,
    #[serde(default)]
    pub fields: Vec<Map<String, Value>>,
}

/// Where a fixture symbol comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub symbol: String,
    pub records: usize,
    /// Module providing the symbol, `None` when the registry does not export it
    pub provider: Option<String>,
}

/// Resolutions for one fixture file, in file order
#[derive(Debug, Clone)]
pub struct FixtureReport {
    pub file: PathBuf,
    pub resolutions: Vec<Resolution>,
}

impl FixtureReport {
    pub fn unresolved(&self) -> impl Iterator<Item = &Resolution> {
        self.resolutions.iter().filter(|r| r.provider.is_none())
    }
}

/// Read and parse a fixture file
pub fn load_fixture(path: &Path) -> Result<Vec<FixtureEntry>> {
    if !path.is_file() {
        return Err(error::fs::not_found(path));
    }
    let content = fs::read_to_string(path).map_err(|e| error::fs::read_failed(path, e))?;
    serde_json::from_str(&content).map_err(|e| error::fixture::parse_failed(path, e))
}

/// Resolve each entry's symbol through the registry
pub fn resolve(
    entries: &[FixtureEntry],
    registry: &RegistryDocument,
    base_import: &str,
) -> Vec<Resolution> {
    entries
        .iter()
        .map(|entry| {
            let provider = registry.provider_of(&entry.symbol, base_import);
            match &provider {
                Some(module) => {
                    debug!(symbol = %entry.symbol, module = %module, "Resolved fixture symbol")
                }
                None => {
                    warn!(symbol = %entry.symbol, "Fixture symbol not exported by the registry")
                }
            }
            Resolution {
                symbol: entry.symbol.clone(),
                records: entry.fields.len(),
                provider,
            }
        })
        .collect()
}

/// Load and resolve several fixture files against one registry
pub fn resolve_files(
    files: &[PathBuf],
    registry: &RegistryDocument,
    base_import: &str,
) -> Result<Vec<FixtureReport>> {
    files
        .iter()
        .map(|file| {
            let entries = load_fixture(file)?;
            Ok(FixtureReport {
                file: file.clone(),
                resolutions: resolve(&entries, registry, base_import),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistrarError;
    use tempfile::TempDir;

    const BASE: &str = "from app.extensions import db";

    fn registry() -> RegistryDocument {
        RegistryDocument::parse(
            "\
from modules.users.models import Organization, User
from modules.widgets.models import Widget
from app.extensions import db

__all__ = ['Organization', 'User', 'db']
",
        )
    }

    #[test]
    fn test_load_fixture() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("users.json");
        fs::write(
            &path,
            r#"[
                {"models": "User", "fields": [{"email": "a@example.com"}, {"email": "b@example.com"}]},
                {"models": "Organization"}
            ]"#,
        )
        .unwrap();

        let entries = load_fixture(&path).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].symbol, "User");
        assert_eq!(entries[0].fields.len(), 2);
        assert!(entries[1].fields.is_empty());
    }

    #[test]
    fn test_load_fixture_invalid_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.json");
        fs::write(&path, "{\"models\": ").unwrap();

        let result = load_fixture(&path);

        assert!(matches!(result, Err(RegistrarError::FixtureParseFailed { .. })));
    }

    #[test]
    fn test_load_fixture_missing_file() {
        let temp = TempDir::new().unwrap();

        let result = load_fixture(&temp.path().join("missing.json"));

        assert!(matches!(result, Err(RegistrarError::FileNotFound { .. })));
    }

    #[test]
    fn test_resolve_through_registry() {
        let entries = vec![
            FixtureEntry {
                symbol: "User".to_string(),
                fields: vec![Map::new()],
            },
            FixtureEntry {
                symbol: "Gadget".to_string(),
                fields: Vec::new(),
            },
            FixtureEntry {
                symbol: "db".to_string(),
                fields: Vec::new(),
            },
        ];

        let resolutions = resolve(&entries, &registry(), BASE);

        assert_eq!(resolutions[0].provider.as_deref(), Some("modules.users.models"));
        assert_eq!(resolutions[0].records, 1);
        assert_eq!(resolutions[1].provider, None);
        assert_eq!(resolutions[2].provider.as_deref(), Some("app.extensions"));
    }

    #[test]
    fn test_imported_but_not_exported_is_unresolved() {
        let entries = vec![FixtureEntry {
            symbol: "Widget".to_string(),
            fields: Vec::new(),
        }];

        let report = FixtureReport {
            file: PathBuf::from("widgets.json"),
            resolutions: resolve(&entries, &registry(), BASE),
        };

        assert_eq!(report.unresolved().count(), 1);
    }
}
