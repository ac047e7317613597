//! Source scanning
//!
//! This module handles:
//! - Walking package directories for definitions files
//! - Deriving dotted module paths from file paths
//! - Extracting declared symbols without importing anything
//!
//! Files that cannot be read or decoded are reported and skipped; they never
//! abort a scan.

pub mod symbols;

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};
use wax::{CandidatePath, Glob, Pattern};

use crate::error::{self, Result};
use crate::registry::{ModuleSymbols, grammar};

pub use symbols::extract_symbols;

/// Directories never descended into
const SKIPPED_DIRS: &[&str] = &["__pycache__"];

/// A definitions file and the symbols it declares
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedModule {
    /// Dotted module path relative to the source root
    pub module: String,
    /// File the symbols were read from
    pub path: PathBuf,
    pub symbols: BTreeSet<String>,
}

impl From<ScannedModule> for ModuleSymbols {
    fn from(scanned: ScannedModule) -> Self {
        ModuleSymbols::new(scanned.module, scanned.symbols)
    }
}

/// A file the scanner had to skip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanWarning {
    pub path: PathBuf,
    pub reason: String,
}

/// One step of a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Module(ScannedModule),
    Skipped(ScanWarning),
}

/// Finds definitions files and extracts their symbols
#[derive(Debug)]
pub struct Scanner<'t> {
    glob: Glob<'t>,
    source_root: PathBuf,
}

impl<'t> Scanner<'t> {
    /// Create a scanner matching file names against the glob `pattern`
    pub fn new(pattern: &'t str, source_root: impl Into<PathBuf>) -> Result<Self> {
        let glob = Glob::new(pattern).map_err(|e| {
            error::config::invalid(format!("definitions_file '{pattern}' is not a valid glob: {e}"))
        })?;
        Ok(Self {
            glob,
            source_root: source_root.into(),
        })
    }

    /// Lazily scan one package directory
    ///
    /// Yields one outcome per matching file, in file name order. Files that
    /// declare no symbols yield nothing.
    pub fn scan_package<'a>(
        &'a self,
        package_dir: &Path,
    ) -> impl Iterator<Item = ScanOutcome> + 'a {
        debug!(dir = %package_dir.display(), "Scanning package");
        WalkDir::new(package_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry))
            .filter_map(move |entry| match entry {
                Ok(entry) if entry.file_type().is_file() && self.matches(entry.path()) => {
                    self.scan_file(entry.path())
                }
                Ok(_) => None,
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                    warn!(path = %path.display(), error = %e, "Skipping unreadable path");
                    Some(ScanOutcome::Skipped(ScanWarning {
                        path,
                        reason: e.to_string(),
                    }))
                }
            })
    }

    /// Scan a single definitions file
    pub fn scan_file(&self, path: &Path) -> Option<ScanOutcome> {
        let skipped = |reason: String| {
            warn!(path = %path.display(), reason = %reason, "Skipping definitions file");
            Some(ScanOutcome::Skipped(ScanWarning {
                path: path.to_path_buf(),
                reason,
            }))
        };

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => return skipped(e.to_string()),
        };
        let source = match String::from_utf8(bytes) {
            Ok(source) => source,
            Err(e) => return skipped(format!("not valid UTF-8: {e}")),
        };

        let symbols = extract_symbols(&source);
        if symbols.is_empty() {
            debug!(path = %path.display(), "No declarations found");
            return None;
        }

        let Some(module) = module_path(&self.source_root, path) else {
            return skipped(format!(
                "'{}' is not an importable module path",
                path.strip_prefix(&self.source_root).unwrap_or(path).display()
            ));
        };
        debug!(module = %module, count = symbols.len(), "Found declarations");
        Some(ScanOutcome::Module(ScannedModule {
            module,
            path: path.to_path_buf(),
            symbols,
        }))
    }

    fn matches(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        self.glob.matched(&CandidatePath::from(name)).is_some()
    }
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.') || SKIPPED_DIRS.contains(&name))
}

/// Dotted module path of a file relative to the source root
///
/// `src/modules/widgets/models.py` under `src` becomes `modules.widgets.models`.
/// Returns `None` when a segment is not a Python identifier, since such a
/// module cannot be written as an import line.
pub fn module_path(source_root: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(source_root).unwrap_or(file);
    let without_extension = relative.with_extension("");
    let mut segments = Vec::new();
    for component in without_extension.components() {
        if let std::path::Component::Normal(part) = component {
            let part = part.to_str()?;
            if !grammar::is_identifier(part) {
                return None;
            }
            segments.push(part);
        }
    }
    if segments.is_empty() {
        return None;
    }
    Some(segments.join("."))
}
