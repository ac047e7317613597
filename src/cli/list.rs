use clap::Parser;

/// Arguments for the list command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List all packages:\n    registrar list\n\n\
                  List only packages that take part in a sync:\n    registrar list --enabled")]
pub struct ListArgs {
    /// Only show enabled and always-on packages
    #[arg(long)]
    pub enabled: bool,
}
