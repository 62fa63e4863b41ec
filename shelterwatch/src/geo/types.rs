//! Coordinate type definitions

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Valid latitude range (WGS84 degrees)
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Valid longitude range (WGS84 degrees)
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Errors from coordinate validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    /// Latitude is NaN, infinite or outside ±90°.
    #[error("Invalid latitude: {0} (expected -90.0..=90.0)")]
    InvalidLatitude(f64),

    /// Longitude is NaN, infinite or outside ±180°.
    #[error("Invalid longitude: {0} (expected -180.0..=180.0)")]
    InvalidLongitude(f64),
}

/// A single latitude/longitude reading.
///
/// Immutable once constructed. [`GeoFix::new`] rejects non-finite or
/// out-of-range values, so every fix handed out by a location source is
/// a valid position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoFix {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl GeoFix {
    /// Create a validated fix.
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordError> {
        if !latitude.is_finite() || !(MIN_LAT..=MAX_LAT).contains(&latitude) {
            return Err(CoordError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(MIN_LON..=MAX_LON).contains(&longitude) {
            return Err(CoordError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Re-check the invariant on a fix that came in through deserialization.
    pub fn validate(&self) -> Result<Self, CoordError> {
        Self::new(self.latitude, self.longitude)
    }
}

impl fmt::Display for GeoFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}
