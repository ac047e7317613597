//! Configuration file handling for Registrar
//!
//! This module contains data structures for:
//! - `registrar.yaml` - Project configuration

pub mod project;

// Re-export commonly used types
pub use project::{CONFIG_FILE, ProjectConfig};
