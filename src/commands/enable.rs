//! Enable and disable command implementation

use std::path::PathBuf;

use console::Style;

use crate::cli::PackageArgs;
use crate::commands::output::print_sync_summary;
use crate::error::Result;
use crate::operations::{SyncOperation, SyncOptions, ToggleOperation, ToggleOutcome};
use crate::project::Project;

/// Run enable (`enabled = true`) or disable command
pub fn run(project: Option<PathBuf>, args: PackageArgs, enabled: bool) -> Result<()> {
    let project = Project::discover(project)?;
    let toggle = ToggleOperation::new(&project);
    let outcome = toggle.execute(&args.name, enabled)?;

    let state = if enabled { "enabled" } else { "disabled" };
    let name = Style::new().bold().apply_to(&args.name);
    match outcome {
        ToggleOutcome::Changed => println!("Package {name} {state}"),
        ToggleOutcome::Registered => println!("Package {name} registered and enabled"),
        ToggleOutcome::Unchanged => println!("Package {name} is already {state}"),
    }

    if !enabled && toggle.is_always_on(&args.name) {
        println!(
            "{} {name} is listed in always_on and will still be scanned",
            Style::new().yellow().apply_to("note:")
        );
    } else if !enabled && outcome == ToggleOutcome::Changed {
        println!("Its exports stay in the registry; new declarations are no longer picked up");
    }

    if args.sync {
        let store = project.store();
        let summary = SyncOperation::new(&project, &store).execute(&SyncOptions::default())?;
        print_sync_summary(&project, &summary);
    }
    Ok(())
}
