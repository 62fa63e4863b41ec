//! Application error types.

use std::fmt;

use crate::config::ConfigFileError;

/// Errors that can occur during application lifecycle.
#[derive(Debug)]
pub enum AppError {
    /// Configuration could not be loaded.
    Config(ConfigFileError),

    /// The tracking service is no longer running.
    ServiceStopped,

    /// A background task panicked or was aborted.
    TaskFailed(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(e) => write!(f, "Configuration error: {}", e),
            AppError::ServiceStopped => write!(f, "Tracking service is not running"),
            AppError::TaskFailed(msg) => write!(f, "Background task failed: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(e) => Some(e),
            AppError::ServiceStopped => None,
            AppError::TaskFailed(_) => None,
        }
    }
}

impl From<ConfigFileError> for AppError {
    fn from(e: ConfigFileError) -> Self {
        AppError::Config(e)
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(e: tokio::task::JoinError) -> Self {
        AppError::TaskFailed(e.to_string())
    }
}
