//! ds - datastore schema migration tool
//!
//! Runs the schema migration engine against a datastore. Meant to be invoked
//! once before the service starts; a non-zero exit means the service must
//! not start.

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod config;

use cli::Cli;
use commands::{migrate, status};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    match &cli.command {
        cli::Commands::Migrate => migrate::execute(&cli.global),
        cli::Commands::Status(args) => status::execute(args, &cli.global),
    }
}

/// Install the logger. `RUST_LOG` wins over the `--verbose` default.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}
