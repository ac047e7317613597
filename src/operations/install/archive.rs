//! Package archive extraction
//!
//! A package archive is a `.zip` file that either holds a single package
//! directory (`widgets/__init__.py`, `widgets/models.py`) or the package's
//! files at its root, in which case the archive's file stem names the package.

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs::File;
use std::path::{Component, Path, PathBuf};

use tracing::debug;
use zip::ZipArchive;

use crate::error::{self, Result};

/// Top-level entries written by macOS archivers, never part of a package
const IGNORED_ROOTS: &[&str] = &["__MACOSX"];

/// Whether `path` looks like a package archive rather than a directory
pub fn is_archive(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("zip"))
}

/// Extract a package archive under `staging` and return the package directory
pub fn extract_package(archive_path: &Path, staging: &Path) -> Result<PathBuf> {
    let file = File::open(archive_path).map_err(|e| error::fs::read_failed(archive_path, e))?;
    let mut archive =
        ZipArchive::new(file).map_err(|e| error::package::invalid_archive(archive_path, e))?;

    let mut roots: BTreeSet<OsString> = BTreeSet::new();
    let mut loose_files = false;
    for i in 0..archive.len() {
        let entry = archive
            .by_index(i)
            .map_err(|e| error::package::invalid_archive(archive_path, e))?;
        let Some(path) = entry.enclosed_name() else {
            return Err(error::package::invalid_archive(
                archive_path,
                format!("entry '{}' points outside the archive", entry.name()),
            ));
        };

        let mut components = path.components();
        let Some(Component::Normal(root)) = components.next() else {
            continue;
        };
        if root.to_str().is_some_and(|r| IGNORED_ROOTS.contains(&r)) {
            continue;
        }
        if components.next().is_some() || entry.is_dir() {
            roots.insert(root.to_os_string());
        } else {
            loose_files = true;
        }
    }

    if roots.is_empty() && !loose_files {
        return Err(error::package::invalid_archive(archive_path, "archive is empty"));
    }

    let package_dir = match roots.first() {
        Some(root) if roots.len() == 1 && !loose_files => {
            archive
                .extract(staging)
                .map_err(|e| error::package::invalid_archive(archive_path, e))?;
            staging.join(root)
        }
        _ => {
            let stem = archive_path.file_stem().ok_or_else(|| {
                error::package::invalid_archive(archive_path, "archive has no file name")
            })?;
            let dir = staging.join(stem);
            archive
                .extract(&dir)
                .map_err(|e| error::package::invalid_archive(archive_path, e))?;
            dir
        }
    };

    debug!(
        archive = %archive_path.display(),
        dir = %package_dir.display(),
        "Extracted package archive"
    );
    Ok(package_dir)
}
