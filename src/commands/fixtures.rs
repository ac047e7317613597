//! Fixtures command implementation

use std::path::PathBuf;

use console::Style;

use crate::cli::FixturesArgs;
use crate::error::{self, Result};
use crate::fixtures::{self as fixture_files, FixtureReport};
use crate::project::Project;
use crate::registry::RegistryDocument;

/// Run fixtures command
pub fn run(project: Option<PathBuf>, args: FixturesArgs) -> Result<()> {
    let project = Project::discover(project)?;
    let registry = RegistryDocument::load(&project.registry_path())?;
    let reports =
        fixture_files::resolve_files(&args.files, &registry, &project.config.base_import)?;

    for report in &reports {
        print_report(&project, report);
    }

    let unresolved: usize = reports.iter().map(|r| r.unresolved().count()).sum();
    if args.strict && unresolved > 0 {
        return Err(error::fixture::unresolved(unresolved));
    }
    Ok(())
}

/// Print one fixture file's resolutions
pub fn print_report(project: &Project, report: &FixtureReport) {
    println!("{}", Style::new().bold().apply_to(project.relative(&report.file)));
    for resolution in &report.resolutions {
        match &resolution.provider {
            Some(module) => println!(
                "  {} {} ({} record(s)) from {}",
                Style::new().green().apply_to("ok"),
                resolution.symbol,
                resolution.records,
                Style::new().dim().apply_to(module)
            ),
            None => println!(
                "  {} {} ({} record(s)) is not exported by the registry",
                Style::new().red().apply_to("missing"),
                resolution.symbol,
                resolution.records
            ),
        }
    }
}
