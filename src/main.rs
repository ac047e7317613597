//! Registrar - model registry synthesizer
//!
//! Scans enabled packages for model class declarations and keeps a Python
//! registry module importing and exporting each of them exactly once.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod common;
mod config;
mod error;
mod fixtures;
mod gate;
mod operations;
mod project;
mod registry;
mod scanner;
mod store;
mod transaction;

use cli::{Cli, Commands};

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Init(args) => commands::init::run(cli.project, args),
        Commands::Sync(args) => commands::sync::run(cli.project, args),
        Commands::Enable(args) => commands::enable::run(cli.project, args, true),
        Commands::Disable(args) => commands::enable::run(cli.project, args, false),
        Commands::Install(args) => commands::install::run(cli.project, args),
        Commands::New(args) => commands::new::run(cli.project, args),
        Commands::List(args) => commands::list::run(cli.project, args),
        Commands::Fixtures(args) => commands::fixtures::run(cli.project, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
