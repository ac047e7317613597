//! New command implementation
//!
//! Scaffolds a package for one model class. Overwriting an existing package
//! asks for confirmation when attached to a terminal.

use std::io::IsTerminal;
use std::path::PathBuf;

use console::Style;
use inquire::Confirm;

use crate::cli::NewArgs;
use crate::error::Result;
use crate::operations::{ScaffoldOperation, ScaffoldOptions};
use crate::project::Project;

/// Run new command
pub fn run(project: Option<PathBuf>, args: NewArgs) -> Result<()> {
    let project = Project::discover(project)?;
    let mut options = ScaffoldOptions { force: args.force };

    let target = ScaffoldOperation::new(&project, options.clone()).target_dir(&args.name);
    if target.exists() && !options.force && std::io::stdin().is_terminal() {
        let proceed = Confirm::new(&format!(
            "Package '{}' already exists. Overwriting will delete its files. Proceed?",
            project.relative(&target)
        ))
        .with_default(false)
        .with_help_message("Press 'y' to overwrite, Enter to cancel")
        .prompt()?;
        if !proceed {
            println!("Operation cancelled.");
            return Ok(());
        }
        options.force = true;
    }

    let outcome = ScaffoldOperation::new(&project, options).execute(&args.name)?;
    println!(
        "Created package {} at {}",
        Style::new().bold().apply_to(&outcome.package),
        project.relative(&outcome.dir)
    );
    for file in &outcome.files {
        println!("  {}", Style::new().dim().apply_to(project.relative(file)));
    }
    println!("Run 'registrar sync' to add {} to the registry", args.name);
    Ok(())
}
