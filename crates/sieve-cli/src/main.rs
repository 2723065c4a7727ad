//! Sieve CLI - data-quality pipelines for CSV files.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let level = if verbose { "sieve=debug" } else { "warn" };
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
        Commands::Fill(args) => commands::fill::run(args, cli.verbose),

        Commands::Check {
            file,
            column,
            pattern,
            format,
            output,
            delimiter,
        } => commands::check::run(file, column, pattern, format, output, delimiter, cli.verbose),

        Commands::Inspect { file, delimiter } => {
            commands::inspect::run(file, delimiter, cli.verbose)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
