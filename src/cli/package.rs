use clap::Parser;

/// Arguments for the enable and disable commands
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Enable a package:\n    registrar enable widgets\n\n\
                  Disable a package:\n    registrar disable widgets\n\n\
                  Enable and rewrite the registry right away:\n    registrar enable widgets --sync")]
pub struct PackageArgs {
    /// Package directory name (e.g. widgets)
    pub name: String,

    /// Run a sync after changing the flag
    #[arg(long)]
    pub sync: bool,
}
