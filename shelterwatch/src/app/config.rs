//! Application configuration for ShelterWatchApp.

use std::path::PathBuf;
use std::time::Duration;

use crate::bridge::{SurfaceConfig, DEFAULT_SETTLE_DELAY};
use crate::config::ConfigFile;
use crate::location::SubscriptionOptions;
use crate::shelter::{
    JsonFileDirectory, ShelterDirectory, StaticDirectory, DEFAULT_RANK_LIMIT,
};

/// Everything needed to bootstrap the application.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Continuous subscription thresholds.
    pub tracking: SubscriptionOptions,

    /// Wait between map readiness and the buffered flush.
    pub settle_delay: Duration,

    /// Map surface settings.
    pub surface: SurfaceConfig,

    /// Run the permission / first fix / start sequence on launch.
    pub start_up: bool,

    /// Maximum number of nearby shelters.
    pub shelter_limit: usize,

    /// Shelter dataset file; `None` uses the built-in directory.
    pub dataset: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tracking: SubscriptionOptions::default(),
            settle_delay: DEFAULT_SETTLE_DELAY,
            surface: SurfaceConfig::default(),
            start_up: true,
            shelter_limit: DEFAULT_RANK_LIMIT,
            dataset: None,
        }
    }
}

impl AppConfig {
    /// Build from a loaded config file.
    pub fn from_config_file(config: &ConfigFile) -> Self {
        Self {
            tracking: config.tracking.subscription_options(),
            settle_delay: config.map.settle_delay(),
            surface: SurfaceConfig {
                client_id: config.map.client_id.clone(),
                ..SurfaceConfig::default()
            },
            start_up: true,
            shelter_limit: config.shelters.limit,
            dataset: config.shelters.dataset.clone(),
        }
    }

    /// Set whether the start-up sequence runs.
    pub fn with_start_up(mut self, start_up: bool) -> Self {
        self.start_up = start_up;
        self
    }

    /// The configured shelter directory.
    pub fn directory(&self) -> Box<dyn ShelterDirectory> {
        match &self.dataset {
            Some(path) => Box::new(JsonFileDirectory::new(path.clone())),
            None => Box::new(StaticDirectory::gimhae()),
        }
    }
}
