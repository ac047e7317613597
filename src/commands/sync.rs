//! Sync command implementation

use std::path::PathBuf;

use crate::cli::SyncArgs;
use crate::commands::output::print_sync_summary;
use crate::error::Result;
use crate::operations::{SyncOperation, SyncOptions};
use crate::project::Project;

/// Run sync command
pub fn run(project: Option<PathBuf>, args: SyncArgs) -> Result<()> {
    let project = Project::discover(project)?;
    let store = project.store();
    let options = SyncOptions::from(&args);

    let summary = SyncOperation::new(&project, &store).execute(&options)?;
    print_sync_summary(&project, &summary);
    Ok(())
}
