use clap::Parser;
use std::path::PathBuf;

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Install a package directory:\n    registrar install ../shared/widgets\n\n\
                   Install a package archive:\n    registrar install ~/Downloads/widgets.zip\n\n\
                   Install a specific version:\n    registrar install ./widgets --version 2.1.0\n\n\
                   Replace an installed package:\n    registrar install ./widgets --force\n\n\
                   Install without touching the registry:\n    registrar install ./widgets --no-sync")]
pub struct InstallArgs {
    /// Package directory or .zip archive to install into the packages directory
    pub source: PathBuf,

    /// Version recorded for the package (MAJOR.MINOR.PATCH)
    #[arg(long)]
    pub version: Option<String>,

    /// Replace an existing package with the same name
    #[arg(long, short = 'f')]
    pub force: bool,

    /// Do not sync the registry after installing
    #[arg(long)]
    pub no_sync: bool,
}
