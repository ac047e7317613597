//! List operation module
//!
//! Reports every package known to the project, on disk or in the store.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::gate;
use crate::project::Project;
use crate::registry::RegistryDocument;

/// One package as shown by `registrar list`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRow {
    pub name: String,
    /// Version from the store, if registered
    pub version: Option<String>,
    pub enabled: bool,
    pub always_on: bool,
    /// Whether the package directory exists
    pub on_disk: bool,
    /// Symbols of this package the registry currently exports
    pub exported: usize,
}

impl PackageRow {
    /// Whether the gate lets this package through
    pub fn is_active(&self) -> bool {
        self.enabled || self.always_on
    }
}

/// High-level list operation
pub struct ListOperation<'a> {
    project: &'a Project,
}

impl<'a> ListOperation<'a> {
    pub fn new(project: &'a Project) -> Self {
        Self { project }
    }

    /// Packages sorted by name
    pub fn execute(&self) -> Result<Vec<PackageRow>> {
        let config = &self.project.config;
        let index = self.project.store().load()?;
        let registry = RegistryDocument::load(&self.project.registry_path())?;
        let known = registry.known_imports(&config.base_import);
        let exports = registry.exports();

        let mut rows: BTreeMap<String, PackageRow> = BTreeMap::new();
        let row = |name: &str| PackageRow {
            name: name.to_string(),
            version: None,
            enabled: false,
            always_on: config.always_on.iter().any(|n| n == name),
            on_disk: false,
            exported: 0,
        };

        for (name, _) in gate::discover_packages(&self.project.packages_dir()) {
            let mut entry = row(&name);
            entry.on_disk = true;
            rows.insert(name, entry);
        }
        for descriptor in &index.packages {
            let entry = rows
                .entry(descriptor.name.clone())
                .or_insert_with(|| row(&descriptor.name));
            entry.version = Some(descriptor.version.clone());
            entry.enabled = descriptor.enabled;
        }
        for name in &config.always_on {
            rows.entry(name.clone()).or_insert_with(|| row(name));
        }

        for entry in rows.values_mut() {
            let Some(prefix) = self.project.package_module_prefix(&entry.name) else {
                continue;
            };
            entry.exported = known
                .iter()
                .filter(|(module, _)| module.starts_with(&prefix))
                .flat_map(|(_, symbols)| symbols)
                .filter(|symbol| exports.contains(*symbol))
                .count();
        }

        Ok(rows.into_values().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DEFAULT_VERSION, PackageDescriptor};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_list_merges_disk_store_and_registry() {
        let temp = TempDir::new().unwrap();
        let mut project = Project::init(temp.path(), false).unwrap();
        project.config.always_on = vec!["users".to_string()];
        for name in ["users", "widgets", "gadgets"] {
            fs::create_dir_all(project.packages_dir().join(name)).unwrap();
        }
        project
            .store()
            .register(
                PackageDescriptor::new("widgets", "src/modules/widgets", true, "2.1.0").unwrap(),
                "Installed Package",
            )
            .unwrap();
        project
            .store()
            .register(
                PackageDescriptor::new("legacy", "src/modules/legacy", false, DEFAULT_VERSION)
                    .unwrap(),
                "Installed Package",
            )
            .unwrap();
        let registry = project.registry_path();
        fs::create_dir_all(registry.parent().unwrap()).unwrap();
        fs::write(
            &registry,
            "\
from modules.users.models import Organization, User
from modules.widgets.models import Widget, WidgetLog
from app.extensions import db

__all__ = ['Organization', 'User', 'Widget', 'WidgetLog', 'db']
",
        )
        .unwrap();

        let rows = ListOperation::new(&project).execute().unwrap();

        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["gadgets", "legacy", "users", "widgets"]);

        let users = &rows[2];
        assert!(users.always_on && users.is_active());
        assert_eq!(users.version, None);
        assert_eq!(users.exported, 2);

        let widgets = &rows[3];
        assert!(widgets.enabled);
        assert_eq!(widgets.version.as_deref(), Some("2.1.0"));
        assert_eq!(widgets.exported, 2);

        let legacy = &rows[1];
        assert!(!legacy.on_disk && !legacy.is_active());

        assert_eq!(rows[0].exported, 0);
    }
}
