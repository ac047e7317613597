use clap::Parser;

/// Arguments for the init command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Create registrar.yaml in the current directory:\n    registrar init\n\n\
                  Create it elsewhere:\n    registrar init -p ./my-app\n\n\
                  Reset an existing configuration:\n    registrar init --force")]
pub struct InitArgs {
    /// Overwrite an existing registrar.yaml
    #[arg(long, short = 'f')]
    pub force: bool,
}
