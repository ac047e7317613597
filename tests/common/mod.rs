//! Common test utilities for Registrar integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Registry path under the default configuration
pub const REGISTRY: &str = "src/database/__init__.py";

/// Store path under the default configuration
pub const STORE: &str = ".registrar/packages.json";

/// Registry holding only the `users` package
pub const USERS_REGISTRY: &str = "\
from modules.users.models import Organization, User
from app.extensions import db

__all__ = ['Organization', 'User', 'db']
";

/// Build a registrar command isolated from the developer's environment
#[allow(deprecated)]
pub fn registrar_cmd() -> Command {
    let mut cmd = Command::cargo_bin("registrar").unwrap();
    cmd.env_remove("REGISTRAR_PROJECT");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// A temporary project for integration tests
pub struct TestProject {
    /// Temporary directory
    pub temp: TempDir,
    /// Path to project root
    pub path: PathBuf,
}

impl TestProject {
    /// Create an empty directory, without registrar.yaml
    pub fn empty() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Create a project with the default configuration
    pub fn new() -> Self {
        let project = Self::empty();
        project.cmd().arg("init").assert().success();
        project
    }

    /// A registrar command running in the project root
    pub fn cmd(&self) -> Command {
        let mut cmd = registrar_cmd();
        cmd.current_dir(&self.path);
        cmd
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the project
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in the project
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Create a package directory with a models.py
    pub fn create_package(&self, name: &str, models: &str) -> PathBuf {
        self.write_file(&format!("src/modules/{name}/__init__.py"), "");
        self.write_file(&format!("src/modules/{name}/models.py"), models);
        self.path.join("src/modules").join(name)
    }

    pub fn write_registry(&self, content: &str) {
        self.write_file(REGISTRY, content);
    }

    pub fn registry(&self) -> String {
        self.read_file(REGISTRY)
    }

    /// Enable a package through the CLI
    pub fn enable(&self, name: &str) {
        self.cmd().args(["enable", name]).assert().success();
    }

    pub fn sync(&self) {
        self.cmd().arg("sync").assert().success();
    }
}

/// Write a package directory outside any project, for `registrar install`
pub fn external_package(root: &Path, name: &str, models: &str) -> PathBuf {
    let dir = root.join(name);
    std::fs::create_dir_all(&dir).expect("Failed to create package directory");
    std::fs::write(dir.join("__init__.py"), "").expect("Failed to write __init__.py");
    std::fs::write(dir.join("models.py"), models).expect("Failed to write models.py");
    dir
}
