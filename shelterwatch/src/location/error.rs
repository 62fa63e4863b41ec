//! Location error types.

use thiserror::Error;

/// Errors reported by a [`LocationSource`](super::LocationSource).
///
/// None of these are fatal: the caller degrades to a "no location" state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    /// The user declined foreground location access.
    #[error("Location permission denied")]
    PermissionDenied,

    /// The provider timed out or failed to produce a fix.
    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),

    /// The provider refused to start a continuous subscription.
    #[error("Failed to start location subscription: {0}")]
    SubscriptionFailed(String),
}

impl LocationError {
    /// One-time notice to show the user, if this failure warrants one.
    pub fn user_notice(&self) -> Option<&'static str> {
        match self {
            LocationError::PermissionDenied => Some("Location permission is required."),
            LocationError::LocationUnavailable(_) => None,
            LocationError::SubscriptionFailed(_) => Some("Location tracking could not be started."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = LocationError::LocationUnavailable("timeout".to_string());
        assert_eq!(err.to_string(), "Location unavailable: timeout");
    }

    #[test]
    fn test_user_notice() {
        assert!(LocationError::PermissionDenied.user_notice().is_some());
        assert!(LocationError::SubscriptionFailed("gps off".into())
            .user_notice()
            .is_some());
        // Logged only; retried on the next explicit user action
        assert!(LocationError::LocationUnavailable("timeout".into())
            .user_notice()
            .is_none());
    }
}
