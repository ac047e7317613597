//! Command implementations for Registrar CLI

pub mod completions;
pub mod enable;
pub mod fixtures;
pub mod init;
pub mod install;
pub mod list;
pub mod new;
pub mod output;
pub mod sync;
pub mod version;
