//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - init: Init command arguments
//! - sync: Sync command arguments
//! - package: Enable and disable command arguments
//! - install: Install command arguments
//! - new: New command arguments
//! - list: List command arguments
//! - fixtures: Fixtures command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod fixtures;
pub mod init;
pub mod install;
pub mod list;
pub mod new;
pub mod package;
pub mod sync;

pub use completions::CompletionsArgs;
pub use fixtures::FixturesArgs;
pub use init::InitArgs;
pub use install::InstallArgs;
pub use list::ListArgs;
pub use new::NewArgs;
pub use package::PackageArgs;
pub use sync::SyncArgs;

/// Registrar - model registry synthesizer
///
/// Discovers model classes in enabled packages and keeps the registry module in sync.
#[derive(Parser, Debug)]
#[command(
    name = "registrar",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Keeps a Python model registry in sync with the packages that are enabled",
    long_about = "Registrar scans enabled packages for model class declarations and rewrites \
                  the registry module so it imports and exports every model exactly once. \
                  Rewrites are idempotent, never drop an export, and replace the file atomically.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  registrar init                        \x1b[90m# Create registrar.yaml\x1b[0m\n   \
                  registrar sync                        \x1b[90m# Rewrite the registry\x1b[0m\n   \
                  registrar sync --dry-run              \x1b[90m# Show what would change\x1b[0m\n   \
                  registrar enable widgets              \x1b[90m# Enable a package\x1b[0m\n   \
                  registrar install ./widgets           \x1b[90m# Install a package and sync\x1b[0m\n   \
                  registrar new InventoryItem           \x1b[90m# Scaffold a package\x1b[0m\n   \
                  registrar list                        \x1b[90m# List packages\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Project directory (defaults to searching upward from the current directory)
    #[arg(long, short = 'p', global = true, env = "REGISTRAR_PROJECT")]
    pub project: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a registrar.yaml with default settings
    Init(InitArgs),

    /// Rewrite the registry from the enabled packages
    Sync(SyncArgs),

    /// Enable a package
    Enable(PackageArgs),

    /// Disable a package (its exports stay in the registry)
    Disable(PackageArgs),

    /// Install a package directory into the project
    Install(InstallArgs),

    /// Scaffold a new package
    New(NewArgs),

    /// List packages
    List(ListArgs),

    /// Check fixture files against the registry
    Fixtures(FixturesArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
