//! Rankscope CLI - statistics and charts for world top company rankings.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so stdout carries only the report.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            data,
            charts_dir,
            no_open,
            json,
        } => commands::run::run(data.config(), charts_dir, no_open, json),

        Commands::Describe { data, json } => commands::describe::run(data.config(), json),

        Commands::Charts {
            data,
            charts_dir,
            no_open,
        } => commands::charts::run(data.config(), charts_dir, no_open),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
