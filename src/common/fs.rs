//! Common file system operations with unified error handling

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{self, Result};

#[derive(Default, Clone)]
pub struct CopyOptions {
    pub exclude: Vec<String>,
}

impl CopyOptions {
    /// Skip VCS metadata and interpreter caches when copying a package
    pub fn exclude_build_artifacts() -> Self {
        Self {
            exclude: vec![".git".to_string(), "__pycache__".to_string()],
        }
    }
}

/// Copy a directory recursively with options
pub fn copy_dir_recursive<P1, P2>(src: P1, dst: P2, options: &CopyOptions) -> std::io::Result<()>
where
    P1: AsRef<Path>,
    P2: AsRef<Path>,
{
    let src_ref = src.as_ref();
    let dst_ref = dst.as_ref();

    if !dst_ref.exists() {
        fs::create_dir_all(dst_ref)?;
    }

    for entry in fs::read_dir(src_ref)? {
        let entry = entry?;
        let entry_path = entry.path();
        let file_name = entry.file_name();

        if options
            .exclude
            .iter()
            .any(|excluded| file_name.to_str() == Some(excluded.as_str()))
        {
            continue;
        }

        let dst_path = dst_ref.join(&file_name);

        if entry_path.is_dir() {
            copy_dir_recursive(&entry_path, &dst_path, options)?;
        } else {
            fs::copy(&entry_path, &dst_path)?;
        }
    }

    Ok(())
}

/// Replace the contents of `path` atomically
///
/// The content is written to a temporary file in the same directory and
/// renamed over the target, so readers see either the old or the new file.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    write_atomic_with(path, |file| file.write_all(content))
}

/// Replace the contents of `path` atomically, filling the new file with `fill`
///
/// If `fill`, the flush, or the rename fails, the target keeps its previous
/// contents and the temporary file is removed.
pub fn write_atomic_with<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut File) -> std::io::Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| error::fs::write_failed(path, e))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| error::fs::write_failed(path, e))?;
    fill(tmp.as_file_mut()).map_err(|e| error::fs::write_failed(path, e))?;
    tmp.as_file_mut()
        .sync_all()
        .map_err(|e| error::fs::write_failed(path, e))?;

    // Keep the original permissions when replacing an existing file
    if let Ok(metadata) = fs::metadata(path) {
        let _ = fs::set_permissions(tmp.path(), metadata.permissions());
    }

    tmp.persist(path)
        .map_err(|e| error::fs::write_failed(path, e.error))?;
    Ok(())
}
