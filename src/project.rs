//! Project discovery for Registrar
//!
//! A project is the directory holding `registrar.yaml`. Every other path is
//! resolved from it:
//!
//! ```text
//! registrar.yaml
//! .registrar/packages.json        # enablement store
//! src/                            # source_root
//! ├── database/__init__.py        # registry_file
//! └── modules/                    # packages_dir
//!     ├── users/models.py
//!     └── widgets/models.py
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{CONFIG_FILE, ProjectConfig};
use crate::error::{self, RegistrarError, Result};
use crate::store::JsonPackageStore;

/// An opened Registrar project
#[derive(Debug, Clone)]
pub struct Project {
    /// Directory containing registrar.yaml
    pub root: PathBuf,
    pub config: ProjectConfig,
}

impl Project {
    /// Detect if a project exists at the given path
    pub fn exists(root: &Path) -> bool {
        root.join(CONFIG_FILE).is_file()
    }

    /// Find a project by searching upward from the given path
    pub fn find_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            if Self::exists(&current) {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Open an existing project
    pub fn open(root: &Path) -> Result<Self> {
        let config_path = root.join(CONFIG_FILE);
        if !config_path.is_file() {
            return Err(error::config::not_found(root));
        }
        let config = ProjectConfig::load(&config_path)?;
        debug!(root = %root.display(), "Opened project");
        Ok(Self {
            root: root.to_path_buf(),
            config,
        })
    }

    /// Open the project containing `start`, or the working directory
    pub fn discover(start: Option<PathBuf>) -> Result<Self> {
        let start = match start {
            Some(path) => path,
            None => std::env::current_dir()
                .map_err(|e| error::fs::io_error("Failed to get current directory", e))?,
        };
        let start = dunce::canonicalize(&start).unwrap_or(start);
        let root = Self::find_from(&start).ok_or_else(|| error::config::not_found(&start))?;
        Self::open(&root)
    }

    /// Write a default configuration at `root`
    pub fn init(root: &Path, force: bool) -> Result<Self> {
        let config_path = root.join(CONFIG_FILE);
        if config_path.exists() && !force {
            return Err(RegistrarError::ConfigExists {
                path: config_path.display().to_string(),
            });
        }

        fs::create_dir_all(root).map_err(|e| error::fs::write_failed(root, e))?;
        let config = ProjectConfig::default();
        fs::write(&config_path, config.to_yaml()?)
            .map_err(|e| error::fs::write_failed(&config_path, e))?;

        Ok(Self {
            root: root.to_path_buf(),
            config,
        })
    }

    pub fn source_root(&self) -> PathBuf {
        self.root.join(&self.config.source_root)
    }

    pub fn packages_dir(&self) -> PathBuf {
        self.source_root().join(&self.config.packages_dir)
    }

    pub fn registry_path(&self) -> PathBuf {
        self.source_root().join(&self.config.registry_file)
    }

    pub fn store(&self) -> JsonPackageStore {
        JsonPackageStore::new(self.root.join(&self.config.store))
    }

    /// Forward-slash path relative to the project root
    pub fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    }

    /// Dotted prefix shared by every module of a package
    ///
    /// With the default layout, package `widgets` owns `modules.widgets.*`.
    /// `None` when the package name is not importable.
    pub fn package_module_prefix(&self, package: &str) -> Option<String> {
        // module_path strips a file extension, so pass a file inside the package
        let marker = self.packages_dir().join(package).join("__init__.py");
        let module = crate::scanner::module_path(&self.source_root(), &marker)?;
        module.strip_suffix("__init__").map(str::to_string)
    }
}
