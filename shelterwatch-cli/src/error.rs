//! CLI error handling with user-friendly messages.
//!
//! Every command returns [`CliError`]; `main` prints it once and exits
//! with status 1.

use std::fmt;
use std::path::PathBuf;
use std::process;

use shelterwatch::actions::LaunchError;
use shelterwatch::app::AppError;
use shelterwatch::config::ConfigFileError;
use shelterwatch::shelter::DirectoryError;

/// CLI-specific errors.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration file could not be read or written
    ConfigFile(ConfigFileError),
    /// Invalid command-line input
    InvalidArgument(String),
    /// Shelter directory unavailable
    Directory(DirectoryError),
    /// Call or route URI could not be opened
    Launch(LaunchError),
    /// Route file could not be loaded
    RouteFile { path: PathBuf, reason: String },
    /// Async runtime could not be created
    Runtime(std::io::Error),
    /// Application failed while running
    App(AppError),
}

impl CliError {
    /// Exit the process with an error message.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Directory(e) => {
                eprintln!();
                eprintln!("{}", e.user_notice());
                eprintln!("Check the [shelters] dataset path or pass --dataset.");
            }
            CliError::ConfigFile(_) => {
                eprintln!();
                eprintln!("Run 'shelterwatch init --force' to rewrite the default configuration.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::ConfigFile(e) => write!(f, "Configuration error: {}", e),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CliError::Directory(e) => write!(f, "Shelter directory error: {}", e),
            CliError::Launch(e) => write!(f, "{}", e),
            CliError::RouteFile { path, reason } => {
                write!(f, "Failed to load route '{}': {}", path.display(), reason)
            }
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
            CliError::App(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::Directory(e) => Some(e),
            CliError::Launch(e) => Some(e),
            CliError::Runtime(e) => Some(e),
            CliError::App(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<DirectoryError> for CliError {
    fn from(e: DirectoryError) -> Self {
        CliError::Directory(e)
    }
}

impl From<LaunchError> for CliError {
    fn from(e: LaunchError) -> Self {
        CliError::Launch(e)
    }
}

impl From<AppError> for CliError {
    fn from(e: AppError) -> Self {
        CliError::App(e)
    }
}
