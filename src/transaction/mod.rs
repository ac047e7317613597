//! Transaction support for package installation
//!
//! Installing or scaffolding a package creates a directory and then registers
//! it in the enablement store. If a later step fails, the directory is removed
//! again so the packages directory never holds a half-installed package.
//!
//! ## Usage
//!
//! ```ignore
//! let mut transaction = Transaction::new();
//! fs::create_dir_all(&target)?;
//! transaction.track_dir_created(&target);
//!
//! // Perform operations...
//!
//! // On success:
//! transaction.commit();
//!
//! // On error (automatic via Drop if not committed):
//! // rollback happens automatically
//! ```

use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

/// A transaction over directories created by a package operation
#[derive(Debug, Default)]
pub struct Transaction {
    /// Directories created during this transaction
    created_dirs: Vec<PathBuf>,

    /// Whether the transaction has been committed
    committed: bool,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a directory that was created during this transaction
    pub fn track_dir_created(&mut self, path: impl Into<PathBuf>) {
        self.created_dirs.push(path.into());
    }

    /// Commit the transaction (prevent rollback)
    pub fn commit(mut self) {
        self.committed = true;
    }

    /// Remove every tracked directory, newest first
    pub fn rollback(&mut self) {
        if self.committed {
            return;
        }

        for path in self.created_dirs.drain(..).rev() {
            if path.is_dir() {
                debug!(path = %path.display(), "Rolling back created directory");
                if let Err(e) = fs::remove_dir_all(&path) {
                    warn!(path = %path.display(), error = %e, "Failed to roll back directory");
                }
            }
        }
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        if !self.committed {
            self.rollback();
        }
    }
}
