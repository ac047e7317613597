//! Install operation module
//!
//! Copies a package directory, or extracts a `.zip` package archive, into the
//! project's packages directory, registers it as enabled and, unless told
//! otherwise, syncs the registry.
//!
//! The copy is tracked by a [`Transaction`]: if registration fails the copied
//! directory is removed again.

mod archive;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::cli::InstallArgs;
use crate::common::fs::{CopyOptions, copy_dir_recursive};
use crate::error::{self, Result};
use crate::operations::sync::{SyncOperation, SyncOptions, SyncSummary};
use crate::project::Project;
use crate::registry::grammar;
use crate::store::{DEFAULT_VERSION, PackageDescriptor};
use crate::transaction::Transaction;

/// Name of the optional seed data file shipped inside a package
pub const FIXTURES_FILE: &str = "fixtures.json";

/// Configuration options for installation
#[derive(Debug, Clone)]
pub struct InstallOptions {
    pub version: String,
    /// Replace an existing package directory
    pub force: bool,
    /// Skip the registry sync after registering
    pub no_sync: bool,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            force: false,
            no_sync: false,
        }
    }
}

impl From<&InstallArgs> for InstallOptions {
    fn from(args: &InstallArgs) -> Self {
        Self {
            version: args
                .version
                .clone()
                .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            force: args.force,
            no_sync: args.no_sync,
        }
    }
}

/// Result of an installation
#[derive(Debug, Clone)]
pub struct InstallOutcome {
    pub name: String,
    pub target: PathBuf,
    pub version: String,
    /// Whether an existing directory was replaced
    pub replaced: bool,
    /// Seed data shipped with the package, if any
    pub fixtures: Option<PathBuf>,
    /// Registry sync result, unless skipped
    pub sync: Option<SyncSummary>,
}

/// High-level install operation
pub struct InstallOperation<'a> {
    project: &'a Project,
    options: InstallOptions,
}

impl<'a> InstallOperation<'a> {
    pub fn new(project: &'a Project, options: InstallOptions) -> Self {
        Self { project, options }
    }

    /// Install the package directory or package archive at `source`
    pub fn execute(&self, source: &Path) -> Result<InstallOutcome> {
        if archive::is_archive(source) {
            let staging = tempfile::TempDir::new()
                .map_err(|e| error::fs::io_error("Failed to create staging directory", e))?;
            let package_dir = archive::extract_package(source, staging.path())?;
            return self.install_dir(&package_dir);
        }
        self.install_dir(source)
    }

    fn install_dir(&self, source: &Path) -> Result<InstallOutcome> {
        if !source.is_dir() {
            return Err(error::fs::not_found(source));
        }
        let source = dunce::canonicalize(source)
            .map_err(|e| error::fs::io_error("Failed to resolve package path", e))?;
        let name = package_name(&source)?;

        let packages_dir = self.project.packages_dir();
        let target = packages_dir.join(&name);
        let store = self.project.store();
        let descriptor = PackageDescriptor::new(
            &name,
            self.project.relative(&target),
            true,
            &self.options.version,
        )?;

        let in_place = dunce::canonicalize(&target).is_ok_and(|t| t == source);
        let replaced = target.exists() && !in_place;
        if replaced && !self.options.force {
            return Err(error::package::exists(&name, self.project.relative(&target)));
        }

        let mut transaction = Transaction::new();
        if in_place {
            debug!(package = %name, "Package already in place, registering only");
        } else {
            if replaced {
                info!(package = %name, "Replacing existing package directory");
                fs::remove_dir_all(&target)
                    .map_err(|e| error::fs::io_error("Failed to remove existing package", e))?;
            }
            transaction.track_dir_created(&target);
            copy_dir_recursive(&source, &target, &CopyOptions::exclude_build_artifacts())
                .map_err(|e| error::fs::io_error("Failed to copy package", e))?;
            debug!(from = %source.display(), to = %target.display(), "Copied package");
        }

        store.register(descriptor, "Installed Package")?;
        transaction.commit();
        info!(package = %name, version = %self.options.version, "Installed package");

        let fixtures = Some(target.join(FIXTURES_FILE)).filter(|p| p.is_file());
        let sync = if self.options.no_sync {
            None
        } else {
            Some(SyncOperation::new(self.project, &store).execute(&SyncOptions::default())?)
        };

        Ok(InstallOutcome {
            name,
            target,
            version: self.options.version.clone(),
            replaced,
            fixtures,
            sync,
        })
    }
}

/// Package name from the last path component
///
/// The name becomes part of a dotted module path, so it must be an identifier.
fn package_name(source: &Path) -> Result<String> {
    let name = source
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| error::package::invalid_name(source.display().to_string()))?;
    if !grammar::is_identifier(name) {
        return Err(error::package::invalid_name(name));
    }
    Ok(name.to_string())
}
