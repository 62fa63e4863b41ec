//! Settings structs for each configuration section.
//!
//! Pure data; parsing and serialization live in sibling modules.

use std::path::PathBuf;
use std::time::Duration;

use crate::location::SubscriptionOptions;

/// Minimum time between continuous fixes.
pub const DEFAULT_TRACKING_INTERVAL_MS: u64 = 5000;

/// Minimum movement between continuous fixes.
pub const DEFAULT_TRACKING_DISTANCE_M: f64 = 10.0;

/// Wait between map readiness and flushing the buffered update.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 500;

/// Number of shelters shown in the nearby list.
pub const DEFAULT_SHELTER_LIMIT: usize = 8;

pub const DEFAULT_LOG_DIRECTORY: &str = "logs";
pub const DEFAULT_LOG_FILE: &str = "shelterwatch.log";

/// Environment variable that overrides `[map] client_id`.
pub const MAP_CLIENT_ID_ENV: &str = "SHELTERWATCH_MAP_CLIENT_ID";

/// Complete configuration loaded from config.ini.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub tracking: TrackingSettings,
    pub map: MapSettings,
    pub shelters: ShelterSettings,
    pub logging: LoggingSettings,
}

/// `[tracking]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingSettings {
    /// Minimum interval between fixes, in milliseconds
    pub interval_ms: u64,
    /// Minimum distance between fixes, in metres
    pub distance_m: f64,
}

impl Default for TrackingSettings {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_TRACKING_INTERVAL_MS,
            distance_m: DEFAULT_TRACKING_DISTANCE_M,
        }
    }
}

impl TrackingSettings {
    /// Subscription thresholds for the location source.
    pub fn subscription_options(&self) -> SubscriptionOptions {
        SubscriptionOptions {
            min_interval: Duration::from_millis(self.interval_ms),
            min_distance_m: self.distance_m,
        }
    }
}

/// `[map]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    /// Settle delay after the readiness event, in milliseconds
    pub settle_delay_ms: u64,
    /// Map provider client id; `None` runs the surface in fallback mode
    pub client_id: Option<String>,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            client_id: None,
        }
    }
}

impl MapSettings {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

/// `[shelters]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct ShelterSettings {
    /// Maximum number of ranked shelters
    pub limit: usize,
    /// JSON dataset; `None` uses the built-in Gimhae directory
    pub dataset: Option<PathBuf>,
}

impl Default for ShelterSettings {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SHELTER_LIMIT,
            dataset: None,
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub directory: PathBuf,
    pub file: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_LOG_DIRECTORY),
            file: DEFAULT_LOG_FILE.to_string(),
        }
    }
}
