//! Configuration file handling.
//!
//! `config.ini` lives in the platform config directory under `shelterwatch/`.
//! A missing file means defaults; keys that are absent keep their default
//! value and unknown keys are ignored.
//!
//! # Example
//!
//! ```ignore
//! use shelterwatch::config::ConfigFile;
//!
//! let config = ConfigFile::load()?;
//! let options = config.tracking.subscription_options();
//! ```

mod file;
mod parser;
mod settings;
mod writer;

pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    ConfigFile, LoggingSettings, MapSettings, ShelterSettings, TrackingSettings,
    DEFAULT_LOG_DIRECTORY, DEFAULT_LOG_FILE, DEFAULT_SETTLE_DELAY_MS, DEFAULT_SHELTER_LIMIT,
    DEFAULT_TRACKING_DISTANCE_M, DEFAULT_TRACKING_INTERVAL_MS, MAP_CLIENT_ID_ENV,
};
