//! Operations module for keeping the registry in sync
//!
//! This module provides high-level operations that coordinate:
//! - SyncOperation: Gate, scan, aggregate and rewrite the registry
//! - InstallOperation: Copy a package into the project and register it
//! - ScaffoldOperation: Create a new package from the definitions template
//! - ToggleOperation: Enable or disable a package
//! - ListOperation: Report packages with their enablement and exports
//!
//! Commands in `crate::commands` parse arguments and print; everything that
//! touches the project goes through here.

pub mod install;
pub mod list;
pub mod scaffold;
pub mod sync;
pub mod toggle;

pub use install::{InstallOperation, InstallOptions};
pub use list::{ListOperation, PackageRow};
pub use scaffold::{ScaffoldOperation, ScaffoldOptions};
pub use sync::{SyncOperation, SyncOptions, SyncSummary};
pub use toggle::{ToggleOperation, ToggleOutcome};
