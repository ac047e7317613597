use clap::Parser;
use std::path::PathBuf;

/// Arguments for the fixtures command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Check a fixture file:\n    registrar fixtures src/modules/users/fixtures/users.json\n\n\
                  Fail when a model is not exported:\n    registrar fixtures fixtures/*.json --strict")]
pub struct FixturesArgs {
    /// Fixture JSON files
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Exit with an error if any model is not exported by the registry
    #[arg(long)]
    pub strict: bool,
}
