//! Install command implementation
//!
//! Copies a package directory into the project, registers it enabled and
//! syncs the registry. Seed data shipped with the package is checked against
//! the updated registry.

use std::path::PathBuf;

use console::Style;

use crate::cli::InstallArgs;
use crate::commands::fixtures::print_report;
use crate::commands::output::print_sync_summary;
use crate::error::Result;
use crate::fixtures;
use crate::operations::{InstallOperation, InstallOptions};
use crate::project::Project;
use crate::registry::RegistryDocument;

/// Run install command
pub fn run(project: Option<PathBuf>, args: InstallArgs) -> Result<()> {
    let project = Project::discover(project)?;
    let options = InstallOptions::from(&args);
    let outcome = InstallOperation::new(&project, options).execute(&args.source)?;

    let verb = if outcome.replaced { "Reinstalled" } else { "Installed" };
    println!(
        "{verb} {} v{} into {}",
        Style::new().bold().apply_to(&outcome.name),
        outcome.version,
        project.relative(&outcome.target)
    );

    match &outcome.sync {
        Some(summary) => print_sync_summary(&project, summary),
        None => println!("Run 'registrar sync' to update the registry"),
    }

    if let Some(file) = &outcome.fixtures {
        let registry = RegistryDocument::load(&project.registry_path())?;
        let report = fixtures::resolve_files(
            std::slice::from_ref(file),
            &registry,
            &project.config.base_import,
        )?;
        for report in &report {
            print_report(&project, report);
        }
    }
    Ok(())
}
