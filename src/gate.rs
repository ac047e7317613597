//! Module enablement gate
//!
//! Decides which package directories take part in a registry sync: the
//! always-on packages plus everything the store marks enabled. A store that
//! cannot be read degrades to the always-on set so a sync never blocks on it.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::store::EnablementStore;

/// Packages allowed into the registry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GateDecision {
    pub enabled: BTreeSet<String>,
    /// Set when the store could not be read and only always-on packages count
    pub degraded: bool,
}

impl GateDecision {
    pub fn allows(&self, name: &str) -> bool {
        self.enabled.contains(name)
    }
}

/// Union of always-on names and names the store marks enabled
pub fn enabled_packages(always_on: &[String], store: &dyn EnablementStore) -> GateDecision {
    let mut enabled: BTreeSet<String> = always_on.iter().cloned().collect();

    match store.list_enabled() {
        Ok(descriptors) => {
            enabled.extend(descriptors.into_iter().map(|d| d.name));
            debug!(count = enabled.len(), "Resolved enabled packages");
            GateDecision {
                enabled,
                degraded: false,
            }
        }
        Err(e) => {
            warn!(error = %e, "Enablement store unavailable, using always-on packages only");
            GateDecision {
                enabled,
                degraded: true,
            }
        }
    }
}

/// Package directories under `packages_dir`, sorted by name
///
/// Hidden directories and interpreter caches are not packages. A missing
/// packages directory has no packages.
pub fn discover_packages(packages_dir: &Path) -> Vec<(String, PathBuf)> {
    let entries = match fs::read_dir(packages_dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %packages_dir.display(), error = %e, "Cannot list packages directory");
            return Vec::new();
        }
    };

    let mut packages: Vec<(String, PathBuf)> = entries
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?.to_string();
            (!name.starts_with('.') && name != "__pycache__").then(|| (name, entry.path()))
        })
        .collect();
    packages.sort_by(|a, b| a.0.cmp(&b.0));
    packages
}

/// Package directories the gate lets through, sorted by name
pub fn candidate_packages(packages_dir: &Path, decision: &GateDecision) -> Vec<(String, PathBuf)> {
    discover_packages(packages_dir)
        .into_iter()
        .filter(|(name, _)| {
            let allowed = decision.allows(name);
            if !allowed {
                debug!(package = %name, "Package not enabled, skipping");
            }
            allowed
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{self, Result};
    use crate::store::PackageDescriptor;
    use tempfile::TempDir;

    struct FixedStore(Vec<&'static str>);

    impl EnablementStore for FixedStore {
        fn list_enabled(&self) -> Result<Vec<PackageDescriptor>> {
            Ok(self
                .0
                .iter()
                .map(|name| {
                    PackageDescriptor {
                        name: (*name).to_string(),
                        path: format!("src/modules/{name}"),
                        enabled: true,
                        version: "1.0.0".to_string(),
                    }
                })
                .collect())
        }

        fn set_enabled(&self, _name: &str, _enabled: bool) -> Result<bool> {
            Ok(false)
        }
    }

    struct UnreachableStore;

    impl EnablementStore for UnreachableStore {
        fn list_enabled(&self) -> Result<Vec<PackageDescriptor>> {
            Err(error::store::unavailable("db://packages", "connection refused"))
        }

        fn set_enabled(&self, _name: &str, _enabled: bool) -> Result<bool> {
            Err(error::store::unavailable("db://packages", "connection refused"))
        }
    }

    fn names(decision: &GateDecision) -> Vec<&str> {
        decision.enabled.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_union_of_always_on_and_enabled() {
        let decision = enabled_packages(
            &["users".to_string(), "manager".to_string()],
            &FixedStore(vec!["widgets", "users"]),
        );
        assert_eq!(names(&decision), vec!["manager", "users", "widgets"]);
        assert!(!decision.degraded);
    }

    #[test]
    fn test_store_error_degrades_to_always_on() {
        let decision = enabled_packages(&["users".to_string()], &UnreachableStore);
        assert_eq!(names(&decision), vec!["users"]);
        assert!(decision.degraded);
    }

    #[test]
    fn test_candidate_packages_filters_and_sorts() {
        let temp = TempDir::new().unwrap();
        for dir in ["widgets", "gadgets", "users", ".git", "__pycache__"] {
            fs::create_dir_all(temp.path().join(dir)).unwrap();
        }
        fs::write(temp.path().join("README.md"), "").unwrap();

        let decision = enabled_packages(&[], &FixedStore(vec!["widgets", "gadgets", "ghost"]));
        let candidates: Vec<String> = candidate_packages(temp.path(), &decision)
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(candidates, vec!["gadgets", "widgets"]);
    }

    #[test]
    fn test_missing_packages_dir() {
        let temp = TempDir::new().unwrap();
        assert!(discover_packages(&temp.path().join("modules")).is_empty());
    }
}
