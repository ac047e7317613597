//! Configuration errors

use std::path::Path;

use super::RegistrarError;

/// Creates a configuration not found error
pub fn not_found(path: impl AsRef<Path>) -> RegistrarError {
    RegistrarError::ConfigNotFound {
        path: path.as_ref().display().to_string(),
    }
}

/// Creates a configuration parse error
pub fn parse_failed(path: impl AsRef<Path>, reason: impl ToString) -> RegistrarError {
    RegistrarError::ConfigParseFailed {
        path: path.as_ref().display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates an invalid configuration error
pub fn invalid(message: impl Into<String>) -> RegistrarError {
    RegistrarError::ConfigInvalid {
        message: message.into(),
    }
}

/// Creates a configuration read error
pub fn read_failed(path: impl AsRef<Path>, reason: impl ToString) -> RegistrarError {
    RegistrarError::ConfigReadFailed {
        path: path.as_ref().display().to_string(),
        reason: reason.to_string(),
    }
}
