//! Launch error types.

use thiserror::Error;

/// Errors from handing a URI to the platform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaunchError {
    /// No handler accepts the URI.
    #[error("No application can open {uri}")]
    ExternalLaunchUnsupported { uri: String },

    /// A handler exists but opening failed.
    #[error("Failed to open {uri}: {reason}")]
    OpenFailed { uri: String, reason: String },

    /// The URI could not be built.
    #[error("Invalid URI: {0}")]
    InvalidUri(String),
}

impl LaunchError {
    /// The URI involved, if one was built.
    pub fn uri(&self) -> Option<&str> {
        match self {
            LaunchError::ExternalLaunchUnsupported { uri } | LaunchError::OpenFailed { uri, .. } => {
                Some(uri)
            }
            LaunchError::InvalidUri(_) => None,
        }
    }

    /// One-time notice to show the user.
    pub fn user_notice(&self) -> &'static str {
        match self.uri() {
            Some(uri) if uri.starts_with("tel:") => "Phone calls are unavailable.",
            _ => "Navigation is unavailable.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_by_scheme() {
        let call = LaunchError::ExternalLaunchUnsupported {
            uri: "tel:055-330-3000".to_string(),
        };
        assert_eq!(call.user_notice(), "Phone calls are unavailable.");

        let route = LaunchError::OpenFailed {
            uri: "maps:35.2,128.8".to_string(),
            reason: "no handler".to_string(),
        };
        assert_eq!(route.user_notice(), "Navigation is unavailable.");
        assert_eq!(route.uri(), Some("maps:35.2,128.8"));
    }

    #[test]
    fn test_invalid_uri_has_no_uri() {
        let err = LaunchError::InvalidUri("relative URL without a base".to_string());
        assert_eq!(err.uri(), None);
        assert_eq!(err.user_notice(), "Navigation is unavailable.");
    }
}
