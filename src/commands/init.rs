//! Init command implementation

use std::path::PathBuf;

use crate::cli::InitArgs;
use crate::config::CONFIG_FILE;
use crate::error::{self, Result};
use crate::project::Project;

/// Run init command
pub fn run(project: Option<PathBuf>, args: InitArgs) -> Result<()> {
    let root = match project {
        Some(path) => path,
        None => std::env::current_dir()
            .map_err(|e| error::fs::io_error("Failed to get current directory", e))?,
    };

    let project = Project::init(&root, args.force)?;
    println!("Created {}", project.root.join(CONFIG_FILE).display());
    println!(
        "Packages are read from {} and the registry is {}",
        project.relative(&project.packages_dir()),
        project.relative(&project.registry_path())
    );
    Ok(())
}
