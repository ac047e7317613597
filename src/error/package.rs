//! Package errors

use std::path::Path;

use super::RegistrarError;

/// Creates a package not found error
pub fn not_found(name: impl Into<String>) -> RegistrarError {
    RegistrarError::PackageNotFound { name: name.into() }
}

/// Creates an invalid package name error
pub fn invalid_name(name: impl Into<String>) -> RegistrarError {
    RegistrarError::InvalidPackageName { name: name.into() }
}

/// Creates a package already exists error
pub fn exists(name: impl Into<String>, path: impl AsRef<Path>) -> RegistrarError {
    RegistrarError::PackageExists {
        name: name.into(),
        path: path.as_ref().display().to_string(),
    }
}

/// Creates an invalid package archive error
pub fn invalid_archive(path: impl AsRef<Path>, reason: impl ToString) -> RegistrarError {
    RegistrarError::InvalidArchive {
        path: path.as_ref().display().to_string(),
        reason: reason.to_string(),
    }
}
