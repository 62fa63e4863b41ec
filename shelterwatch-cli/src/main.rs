//! ShelterWatch CLI - Command-line interface
//!
//! Drives the ShelterWatch library from a terminal: ranks shelters around a
//! position and replays location routes through the tracking pipeline
//! against the simulated map surface.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::rank::RankArgs;
use commands::track::TrackArgs;
use error::CliError;
use runner::CliRunner;

#[derive(Parser)]
#[command(name = "shelterwatch")]
#[command(version, about = "Live location tracking and nearby shelter lookup", long_about = None)]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug-level logging
    #[arg(long, global = true)]
    debug: bool,

    /// Mirror log output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the nearest shelters to a position
    Rank(RankArgs),

    /// Replay a location route through the tracking pipeline
    Track(TrackArgs),

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = dispatch(cli) {
        e.exit();
    }
}

fn dispatch(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Rank(args) => {
            let runner = CliRunner::new(config_path, cli.debug, cli.verbose)?;
            commands::rank::run(&runner, args)
        }
        Commands::Track(args) => {
            let runner = CliRunner::new(config_path, cli.debug, cli.verbose)?;
            commands::track::run(&runner, args)
        }
        Commands::Init { force } => commands::init::run(config_path, force),
        Commands::Config { command } => commands::config::run(command, config_path),
    }
}
