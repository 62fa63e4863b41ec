//! Tracking error types.

use thiserror::Error;

use crate::location::LocationError;

/// Errors from starting continuous tracking.
///
/// Reported once to the caller; never retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackingError {
    /// Foreground location access was declined.
    #[error("Location permission is required for tracking")]
    PermissionDenied,

    /// The provider could not start a subscription.
    #[error("Failed to start location tracking: {0}")]
    StartFailed(#[source] LocationError),
}

impl From<LocationError> for TrackingError {
    fn from(e: LocationError) -> Self {
        match e {
            LocationError::PermissionDenied => TrackingError::PermissionDenied,
            other => TrackingError::StartFailed(other),
        }
    }
}

impl TrackingError {
    /// One-time notice to show the user.
    pub fn user_notice(&self) -> &'static str {
        match self {
            TrackingError::PermissionDenied => "Location permission is required.",
            TrackingError::StartFailed(_) => "Location tracking could not be started.",
        }
    }
}
