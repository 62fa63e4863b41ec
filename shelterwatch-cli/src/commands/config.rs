//! Configuration display commands.
//!
//! `config list` prints the effective settings (file values plus the
//! environment override), `config path` prints where the file lives.

use std::path::Path;

use clap::Subcommand;
use shelterwatch::config::{config_file_path, ConfigFile};

use super::common::load_config;
use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// List all configuration settings
    List,

    /// Show the configuration file path
    Path,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands, path: Option<&Path>) -> Result<(), CliError> {
    match command {
        ConfigCommands::List => run_list(path),
        ConfigCommands::Path => run_path(path),
    }
}

/// List all configuration settings.
fn run_list(path: Option<&Path>) -> Result<(), CliError> {
    let config = load_config(path)?;

    println!("Configuration Settings");
    println!("======================");

    let mut current_section = "";
    for (section, key, value) in entries(&config) {
        if section != current_section {
            println!();
            println!("[{}]", section);
            current_section = section;
        }

        if value.is_empty() {
            println!("  {} = (not set)", key);
        } else {
            println!("  {} = {}", key, value);
        }
    }

    Ok(())
}

/// Show the configuration file path.
fn run_path(path: Option<&Path>) -> Result<(), CliError> {
    match path {
        Some(path) => println!("{}", path.display()),
        None => println!("{}", config_file_path().display()),
    }
    Ok(())
}

/// Every setting as `(section, key, value)`, in file order.
fn entries(config: &ConfigFile) -> Vec<(&'static str, &'static str, String)> {
    vec![
        ("tracking", "interval_ms", config.tracking.interval_ms.to_string()),
        ("tracking", "distance_m", config.tracking.distance_m.to_string()),
        ("map", "settle_delay_ms", config.map.settle_delay_ms.to_string()),
        (
            "map",
            "client_id",
            config.map.client_id.clone().unwrap_or_default(),
        ),
        ("shelters", "limit", config.shelters.limit.to_string()),
        (
            "shelters",
            "dataset",
            config
                .shelters
                .dataset
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        ),
        (
            "logging",
            "directory",
            config.logging.directory.display().to_string(),
        ),
        ("logging", "file", config.logging.file.clone()),
    ]
}
