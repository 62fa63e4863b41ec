//! Interval/distance threshold for continuous fixes.
//!
//! A fix passes when either the minimum interval has elapsed or the device
//! moved at least the minimum distance since the last passed fix. The first
//! fix always passes.

use tokio::time::Instant;

use super::source::SubscriptionOptions;
use crate::geo::{haversine_m, GeoFix};

/// Gate applied by location sources before delivering a continuous fix.
#[derive(Debug, Clone)]
pub struct FixThreshold {
    options: SubscriptionOptions,
    last: Option<(GeoFix, Instant)>,
}

impl FixThreshold {
    /// Create a threshold for the given subscription options.
    pub fn new(options: SubscriptionOptions) -> Self {
        Self {
            options,
            last: None,
        }
    }

    /// Decide whether `fix`, observed at `now`, should be delivered.
    ///
    /// Returns true and records the fix as the new reference point when it
    /// passes.
    pub fn accept(&mut self, fix: GeoFix, now: Instant) -> bool {
        let passes = match self.last {
            None => true,
            Some((last_fix, last_time)) => {
                now.saturating_duration_since(last_time) >= self.options.min_interval
                    || haversine_m(&last_fix, &fix) >= self.options.min_distance_m
            }
        };

        if passes {
            self.last = Some((fix, now));
        }
        passes
    }

    /// Forget the reference point.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
