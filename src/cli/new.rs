use clap::Parser;

/// Arguments for the new command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Scaffold a package with one model:\n    registrar new InventoryItem\n\n\
                  Overwrite an existing package without asking:\n    registrar new InventoryItem --force")]
pub struct NewArgs {
    /// Model class name in CamelCase (the package directory is its snake_case form)
    pub name: String,

    /// Overwrite an existing package directory without asking
    #[arg(long, short = 'f')]
    pub force: bool,
}
