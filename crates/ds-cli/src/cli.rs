//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};

/// ds - datastore schema migration tool
#[derive(Parser, Debug)]
#[command(name = "ds")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override config file path (default: ./datastore.yml if present)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Datastore path, or ":memory:"; overrides the config file
    #[arg(short, long, global = true, env = "DS_DATABASE")]
    pub database: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Bring the datastore schema up to the version this build expects
    Migrate,

    /// Report the datastore schema version without changing anything
    Status(StatusArgs),
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Print the status as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
