use clap::Parser;

/// Arguments for the sync command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Rewrite the registry:\n    registrar sync\n\n\
                  Show what would change without writing:\n    registrar sync --dry-run\n\n\
                  Log every scanned file:\n    registrar sync -v")]
pub struct SyncArgs {
    /// Compute the new registry without writing it
    #[arg(long)]
    pub dry_run: bool,
}
