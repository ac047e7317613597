//! List command implementation
//!
//! Lists every package with its enablement, version and how many of its
//! symbols the registry exports.

use std::path::PathBuf;

use console::Style;

use crate::cli::ListArgs;
use crate::error::Result;
use crate::operations::{ListOperation, PackageRow};
use crate::project::Project;

/// Run list command
pub fn run(project: Option<PathBuf>, args: ListArgs) -> Result<()> {
    let project = Project::discover(project)?;
    let rows: Vec<PackageRow> = ListOperation::new(&project)
        .execute()?
        .into_iter()
        .filter(|row| !args.enabled || row.is_active())
        .collect();

    if rows.is_empty() {
        println!("No packages found in {}", project.relative(&project.packages_dir()));
        return Ok(());
    }

    println!("Packages ({}):", rows.len());
    println!();
    for row in &rows {
        display_row(row);
    }
    Ok(())
}

fn display_row(row: &PackageRow) {
    let state = if row.always_on {
        Style::new().cyan().apply_to("always-on")
    } else if row.enabled {
        Style::new().green().apply_to("enabled")
    } else {
        Style::new().dim().apply_to("disabled")
    };

    let mut details = vec![format!("v{}", row.version.as_deref().unwrap_or("-"))];
    details.push(format!("{} exported", row.exported));
    if !row.on_disk {
        details.push("missing directory".to_string());
    }

    println!(
        "  {:<24} {:<10} {}",
        Style::new().bold().yellow().apply_to(&row.name),
        state,
        Style::new().dim().apply_to(details.join(", "))
    );
}
