//! Fixture errors

use std::path::Path;

use super::RegistrarError;

/// Creates a fixture parse error
pub fn parse_failed(path: impl AsRef<Path>, reason: impl ToString) -> RegistrarError {
    RegistrarError::FixtureParseFailed {
        path: path.as_ref().display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates an unresolved fixtures error
pub fn unresolved(count: usize) -> RegistrarError {
    RegistrarError::UnresolvedFixtures { count }
}
