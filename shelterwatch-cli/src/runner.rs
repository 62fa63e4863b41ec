//! CLI runner for common setup.
//!
//! Loads the configuration and initializes logging for the commands that
//! need both.

use std::path::Path;

use shelterwatch::config::ConfigFile;
use shelterwatch::logging::{init_logging, LoggingGuard};
use tracing::info;

use crate::commands::common::load_config;
use crate::error::CliError;

/// Runner that manages CLI lifecycle.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    _logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
}

impl CliRunner {
    /// Load config and initialize logging.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Config file to use instead of the default location
    /// * `debug` - Enables debug-level logging regardless of RUST_LOG
    /// * `verbose` - Mirror log output to stderr
    pub fn new(config_path: Option<&Path>, debug: bool, verbose: bool) -> Result<Self, CliError> {
        let config = load_config(config_path)?;

        let logging_guard = init_logging(
            &config.logging.directory,
            &config.logging.file,
            verbose,
            debug,
        )
        .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            _logging_guard: logging_guard,
            config,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("ShelterWatch v{}", shelterwatch::VERSION);
        info!("ShelterWatch CLI: {} command", command);
    }
}
