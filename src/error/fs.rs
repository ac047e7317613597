//! File system errors

use std::path::Path;

use super::RegistrarError;

/// Creates a file not found error
pub fn not_found(path: impl AsRef<Path>) -> RegistrarError {
    RegistrarError::FileNotFound {
        path: path.as_ref().display().to_string(),
    }
}

/// Creates a file read error
pub fn read_failed(path: impl AsRef<Path>, reason: impl ToString) -> RegistrarError {
    RegistrarError::FileReadFailed {
        path: path.as_ref().display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates a file write error
pub fn write_failed(path: impl AsRef<Path>, reason: impl ToString) -> RegistrarError {
    RegistrarError::FileWriteFailed {
        path: path.as_ref().display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates an IO error with context
pub fn io_error(message: impl Into<String>, source: std::io::Error) -> RegistrarError {
    RegistrarError::IoError {
        message: message.into(),
        source: Some(Box::new(source)),
    }
}
