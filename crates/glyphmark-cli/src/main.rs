//! Glyphmark CLI - lay out and render rich-text markup

use anyhow::Result;
use clap::Parser;
use glyphmark_cli::cli::{Cli, Commands};
use glyphmark_cli::commands;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        Commands::Info(args) => commands::info::run(&args),
        Commands::Render(args) => commands::render::run(&args),
        Commands::Check(args) => commands::check::run(&args),
    }
}

/// Initialize logging based on verbosity flag.
fn init_logger(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}
