//! Enablement store errors

use std::path::Path;

use super::RegistrarError;

/// Creates a store unavailable error
pub fn unavailable(path: impl AsRef<Path>, reason: impl ToString) -> RegistrarError {
    RegistrarError::StoreUnavailable {
        path: path.as_ref().display().to_string(),
        reason: reason.to_string(),
    }
}
