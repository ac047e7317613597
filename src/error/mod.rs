//! Error types and handling for Registrar
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Project configuration errors
//! - [`fs`]: File system errors
//! - [`package`]: Package lookup and naming errors
//! - [`store`]: Enablement store errors
//! - [`fixture`]: Fixture resolution errors

pub mod config;
pub mod fixture;
pub mod fs;
pub mod package;
pub mod store;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Registrar operations
#[derive(Error, Diagnostic, Debug)]
pub enum RegistrarError {
    // Configuration errors
    #[error("Project configuration not found from: {path}")]
    #[diagnostic(
        code(registrar::config::not_found),
        help("Run 'registrar init' in the project root to create registrar.yaml")
    )]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(registrar::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(registrar::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(registrar::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Configuration already exists: {path}")]
    #[diagnostic(
        code(registrar::config::exists),
        help("Pass --force to overwrite it with the defaults")
    )]
    ConfigExists { path: String },

    // Package errors
    #[error("Package '{name}' not found")]
    #[diagnostic(
        code(registrar::package::not_found),
        help("Run 'registrar list' to see the packages known to this project")
    )]
    PackageNotFound { name: String },

    #[error("Invalid package name: {name}")]
    #[diagnostic(
        code(registrar::package::invalid_name),
        help("Package directories must be valid Python identifiers; 'registrar new' takes CamelCase names such as 'InventoryItem'")
    )]
    InvalidPackageName { name: String },

    #[error("Package '{name}' already exists at {path}")]
    #[diagnostic(
        code(registrar::package::exists),
        help("Pass --force to replace the existing directory")
    )]
    PackageExists { name: String, path: String },

    #[error("Invalid version '{version}' for package '{name}'")]
    #[diagnostic(
        code(registrar::package::invalid_version),
        help("Versions use the MAJOR.MINOR.PATCH form, e.g. 1.0.0")
    )]
    InvalidVersion { name: String, version: String },

    #[error("Invalid package archive {path}: {reason}")]
    #[diagnostic(
        code(registrar::package::invalid_archive),
        help("Archives must be .zip files holding one package directory or its loose files")
    )]
    InvalidArchive { path: String, reason: String },

    // Store errors
    #[error("Enablement store unavailable at {path}: {reason}")]
    #[diagnostic(code(registrar::store::unavailable))]
    StoreUnavailable { path: String, reason: String },

    // Fixture errors
    #[error("Failed to parse fixture file: {path}: {reason}")]
    #[diagnostic(code(registrar::fixture::parse_failed))]
    FixtureParseFailed { path: String, reason: String },

    #[error("{count} fixture symbol(s) are not exported by the registry")]
    #[diagnostic(
        code(registrar::fixture::unresolved),
        help("Enable the packages that declare them and run 'registrar sync'")
    )]
    UnresolvedFixtures { count: usize },

    // Command line errors
    #[error("Unknown shell: {shell}")]
    #[diagnostic(
        code(registrar::cli::unknown_shell),
        help("Supported shells: bash, elvish, fish, powershell, zsh")
    )]
    UnknownShell { shell: String },

    // File system errors
    #[error("File not found: {path}")]
    #[diagnostic(code(registrar::fs::not_found))]
    FileNotFound { path: String },

    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(registrar::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(registrar::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(registrar::fs::io_error))]
    IoError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl From<std::io::Error> for RegistrarError {
    fn from(err: std::io::Error) -> Self {
        RegistrarError::IoError {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_yaml::Error> for RegistrarError {
    fn from(err: serde_yaml::Error) -> Self {
        RegistrarError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for RegistrarError {
    fn from(err: serde_json::Error) -> Self {
        RegistrarError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for RegistrarError {
    fn from(err: inquire::InquireError) -> Self {
        RegistrarError::IoError {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, RegistrarError>;
