//! Sync operation module
//!
//! Runs the full pipeline against a project:
//!
//! 1. Ask the gate which packages are enabled
//! 2. Scan the enabled package directories for definitions files
//! 3. Aggregate the discovered symbols with the imports already in the registry
//! 4. Rewrite the registry and save it atomically when it changed
//!
//! A failure before step 4 leaves the registry untouched; the save itself
//! either persists the whole new text or nothing.

use std::path::Path;

use tracing::{debug, info};

use crate::cli::SyncArgs;
use crate::error::Result;
use crate::gate;
use crate::project::Project;
use crate::registry::{self, ModuleSymbols, ParseWarning, RegistryDocument};
use crate::scanner::{ScanOutcome, ScanWarning, Scanner};
use crate::store::EnablementStore;

/// Configuration options for sync
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Compute the rewrite without saving it
    pub dry_run: bool,
}

impl From<&SyncArgs> for SyncOptions {
    fn from(args: &SyncArgs) -> Self {
        Self {
            dry_run: args.dry_run,
        }
    }
}

/// What a sync found and did
#[derive(Debug, Clone, Default)]
pub struct SyncSummary {
    /// Packages that passed the gate, sorted by name
    pub packages: Vec<String>,
    /// Symbols newly imported, per module
    pub added: Vec<ModuleSymbols>,
    pub scan_warnings: Vec<ScanWarning>,
    pub parse_warnings: Vec<ParseWarning>,
    /// Number of names in the resulting export list
    pub exports: usize,
    /// Whether the rewrite differs from the file on disk
    pub changed: bool,
    /// Whether the registry file was saved
    pub written: bool,
    /// Set when the store could not be read and only always-on packages were scanned
    pub store_degraded: bool,
}

impl SyncSummary {
    pub fn added_symbols(&self) -> usize {
        self.added.iter().map(|m| m.symbols.len()).sum()
    }
}

/// High-level sync operation
pub struct SyncOperation<'a> {
    project: &'a Project,
    store: &'a dyn EnablementStore,
}

impl<'a> SyncOperation<'a> {
    pub fn new(project: &'a Project, store: &'a dyn EnablementStore) -> Self {
        Self { project, store }
    }

    /// Execute sync, saving the registry atomically
    pub fn execute(&self, options: &SyncOptions) -> Result<SyncSummary> {
        self.execute_with(options, |path, document| document.save(path))
    }

    /// Execute sync with a custom save step
    pub fn execute_with<F>(&self, options: &SyncOptions, save: F) -> Result<SyncSummary>
    where
        F: FnOnce(&Path, &RegistryDocument) -> Result<()>,
    {
        let config = &self.project.config;

        let decision = gate::enabled_packages(&config.always_on, self.store);
        let packages = gate::candidate_packages(&self.project.packages_dir(), &decision);
        info!(count = packages.len(), "Scanning enabled packages");

        let scanner = Scanner::new(&config.definitions_file, self.project.source_root())?;
        let mut scanned = Vec::new();
        let mut scan_warnings = Vec::new();
        for (_, dir) in &packages {
            for outcome in scanner.scan_package(dir) {
                match outcome {
                    ScanOutcome::Module(module) => scanned.push(ModuleSymbols::from(module)),
                    ScanOutcome::Skipped(warning) => scan_warnings.push(warning),
                }
            }
        }

        let registry_path = self.project.registry_path();
        let document = RegistryDocument::load(&registry_path)?;
        let known = document.known_imports(&config.base_import);
        let aggregate = registry::aggregate(scanned, &known, &config.base_symbol);
        debug!(
            modules = aggregate.modules.len(),
            up_to_date = aggregate.is_up_to_date(),
            "Aggregated symbols"
        );

        let result = registry::rewrite(
            &document,
            &config.base_import,
            &config.base_symbol,
            &aggregate,
        );

        let written = result.changed && !options.dry_run;
        if written {
            save(&registry_path, &result.document)?;
            info!(path = %registry_path.display(), "Registry updated");
        } else if result.changed {
            info!("Dry run, registry not saved");
        } else {
            info!("Registry is up to date");
        }

        Ok(SyncSummary {
            packages: packages.into_iter().map(|(name, _)| name).collect(),
            added: result.added,
            scan_warnings,
            parse_warnings: result.warnings,
            exports: result.document.exports().len(),
            changed: result.changed,
            written,
            store_degraded: decision.degraded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::fs::write_atomic_with;
    use crate::error::{self, RegistrarError};
    use crate::store::{DEFAULT_VERSION, JsonPackageStore, PackageDescriptor};
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir;

    const USERS_REGISTRY: &str = "\
from modules.users.models import Organization, User
from app.extensions import db

__all__ = ['Organization', 'User', 'db']
";

    struct Fixture {
        _temp: TempDir,
        project: Project,
        store: JsonPackageStore,
    }

    impl Fixture {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            let project = Project::init(temp.path(), false).unwrap();
            let store = project.store();
            Self {
                _temp: temp,
                project,
                store,
            }
        }

        fn package(&self, name: &str, models: &str, enabled: bool) {
            let dir = self.project.packages_dir().join(name);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("models.py"), models).unwrap();
            let descriptor = PackageDescriptor::new(
                name,
                self.project.relative(&dir),
                enabled,
                DEFAULT_VERSION,
            )
            .unwrap();
            self.store.register(descriptor, "Installed Package").unwrap();
        }

        fn write_registry(&self, text: &str) {
            let path = self.project.registry_path();
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, text).unwrap();
        }

        fn registry(&self) -> String {
            fs::read_to_string(self.project.registry_path()).unwrap()
        }

        fn sync(&self) -> SyncSummary {
            SyncOperation::new(&self.project, &self.store)
                .execute(&SyncOptions::default())
                .unwrap()
        }
    }

    #[test]
    fn test_enabled_package_is_added() {
        let fixture = Fixture::new();
        fixture.write_registry(USERS_REGISTRY);
        fixture.package(
            "widgets",
            "class Widget(Base):\n    pass\n\nclass WidgetLog(Base):\n    pass\n",
            true,
        );

        let summary = fixture.sync();

        assert_eq!(
            fixture.registry(),
            "\
from modules.users.models import Organization, User
from modules.widgets.models import Widget, WidgetLog
from app.extensions import db

__all__ = ['Organization', 'User', 'Widget', 'WidgetLog', 'db']
"
        );
        assert!(summary.written);
        assert_eq!(summary.packages, vec!["widgets".to_string()]);
        assert_eq!(summary.added_symbols(), 2);
        assert_eq!(summary.exports, 5);
    }

    #[test]
    fn test_second_run_is_a_no_op() {
        let fixture = Fixture::new();
        fixture.write_registry(USERS_REGISTRY);
        fixture.package("widgets", "class Widget(Base):\n    pass\n", true);

        fixture.sync();
        let first = fixture.registry();
        let summary = fixture.sync();

        assert_eq!(fixture.registry(), first);
        assert!(!summary.changed);
        assert!(!summary.written);
        assert!(summary.added.is_empty());
    }

    #[test]
    fn test_disabled_package_keeps_earlier_exports() {
        let fixture = Fixture::new();
        fixture.write_registry(USERS_REGISTRY);
        fixture.package("widgets", "class Widget(Base):\n    pass\n", true);
        fixture.sync();
        let before = fixture.registry();

        fixture.store.set_enabled("widgets", false).unwrap();
        let summary = fixture.sync();

        assert_eq!(fixture.registry(), before);
        assert!(summary.packages.is_empty());
        assert!(!summary.written);
    }

    #[test]
    fn test_disabled_package_is_not_scanned() {
        let fixture = Fixture::new();
        fixture.write_registry(USERS_REGISTRY);
        fixture.package("gadgets", "class Gadget(Base):\n    pass\n", false);

        let summary = fixture.sync();

        assert_eq!(fixture.registry(), USERS_REGISTRY);
        assert!(!summary.changed);
    }

    #[test]
    fn test_missing_registry_is_created() {
        let fixture = Fixture::new();
        fixture.package("widgets", "class Widget(Base):\n    pass\n", true);

        fixture.sync();

        assert_eq!(
            fixture.registry(),
            "\
from modules.widgets.models import Widget
from app.extensions import db

__all__ = ['Widget', 'db']
"
        );
    }

    #[test]
    fn test_dry_run_does_not_write() {
        let fixture = Fixture::new();
        fixture.write_registry(USERS_REGISTRY);
        fixture.package("widgets", "class Widget(Base):\n    pass\n", true);

        let summary = SyncOperation::new(&fixture.project, &fixture.store)
            .execute(&SyncOptions { dry_run: true })
            .unwrap();

        assert!(summary.changed);
        assert!(!summary.written);
        assert_eq!(fixture.registry(), USERS_REGISTRY);
    }

    #[test]
    fn test_failed_save_leaves_registry_untouched() {
        let fixture = Fixture::new();
        fixture.write_registry(USERS_REGISTRY);
        fixture.package("widgets", "class Widget(Base):\n    pass\n", true);

        let result = SyncOperation::new(&fixture.project, &fixture.store).execute_with(
            &SyncOptions::default(),
            |path, document| {
                let rendered = document.render();
                write_atomic_with(path, |file| {
                    file.write_all(&rendered.as_bytes()[..rendered.len() / 2])?;
                    Err(std::io::Error::other("disk full"))
                })
            },
        );

        assert!(matches!(result, Err(RegistrarError::FileWriteFailed { .. })));
        assert_eq!(fixture.registry(), USERS_REGISTRY);
    }

    #[test]
    fn test_unreadable_store_degrades_to_always_on() {
        struct BrokenStore;

        impl EnablementStore for BrokenStore {
            fn list_enabled(&self) -> Result<Vec<PackageDescriptor>> {
                Err(error::store::unavailable("packages.json", "connection refused"))
            }

            fn set_enabled(&self, _name: &str, _enabled: bool) -> Result<bool> {
                Err(error::store::unavailable("packages.json", "connection refused"))
            }
        }

        let mut fixture = Fixture::new();
        fixture.write_registry(USERS_REGISTRY);
        fixture.package("widgets", "class Widget(Base):\n    pass\n", true);
        fixture.package("gadgets", "class Gadget(Base):\n    pass\n", true);
        fixture.project.config.always_on = vec!["gadgets".to_string()];

        let summary = SyncOperation::new(&fixture.project, &BrokenStore)
            .execute(&SyncOptions::default())
            .unwrap();

        assert!(summary.store_degraded);
        assert_eq!(summary.packages, vec!["gadgets".to_string()]);
        assert!(fixture.registry().contains("from modules.gadgets.models import Gadget\n"));
        assert!(!fixture.registry().contains("Widget"));
    }

    #[test]
    fn test_non_identifier_package_is_skipped_every_run() {
        let fixture = Fixture::new();
        fixture.write_registry(USERS_REGISTRY);
        fixture.package("my-widgets", "class Widget(Base):\n    pass\n", true);

        let first = fixture.sync();
        let second = fixture.sync();

        assert_eq!(fixture.registry(), USERS_REGISTRY);
        assert!(!first.changed);
        assert!(!second.changed);
        assert_eq!(second.scan_warnings.len(), 1);
        assert!(second.scan_warnings[0]
            .reason
            .contains("not an importable module path"));
    }

    #[test]
    fn test_unreadable_definitions_file_is_reported() {
        let fixture = Fixture::new();
        fixture.write_registry(USERS_REGISTRY);
        fixture.package("widgets", "class Widget(Base):\n    pass\n", true);
        let broken = fixture.project.packages_dir().join("widgets/extra");
        fs::create_dir_all(&broken).unwrap();
        fs::write(broken.join("models.py"), [0xff, 0xfe, 0x00]).unwrap();

        let summary = fixture.sync();

        assert_eq!(summary.scan_warnings.len(), 1);
        assert!(fixture.registry().contains("from modules.widgets.models import Widget\n"));
    }
}
