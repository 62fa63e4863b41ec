//! URI launcher seam and the shelter actions built on it.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;

use super::error::LaunchError;
use super::uri::{call_uri, fallback_route_uri, route_uri};
use crate::geo::GeoFix;
use crate::shelter::Shelter;

/// Platform capability that opens URIs in other applications.
pub trait UriLauncher: Send + Sync {
    /// Check whether some handler accepts the URI.
    fn can_open(&self, uri: &str) -> bool;

    /// Hand the URI to its handler.
    fn open(&self, uri: &str) -> Result<(), LaunchError>;
}

/// Launcher that accepts a fixed set of schemes and records what it opened.
///
/// Clones share the same record. Used by the command-line front end, which
/// prints the URIs, and by tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingLauncher {
    schemes: HashSet<String>,
    opened: Arc<Mutex<Vec<String>>>,
}

impl RecordingLauncher {
    /// Accept URIs whose scheme is in `schemes`.
    pub fn new<I, S>(schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            schemes: schemes.into_iter().map(Into::into).collect(),
            opened: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// URIs opened so far, in order.
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().clone()
    }

    fn scheme(uri: &str) -> Option<&str> {
        uri.split_once(':').map(|(scheme, _)| scheme)
    }
}

impl UriLauncher for RecordingLauncher {
    fn can_open(&self, uri: &str) -> bool {
        Self::scheme(uri).is_some_and(|scheme| self.schemes.contains(scheme))
    }

    fn open(&self, uri: &str) -> Result<(), LaunchError> {
        if !self.can_open(uri) {
            return Err(LaunchError::OpenFailed {
                uri: uri.to_string(),
                reason: "no handler for scheme".to_string(),
            });
        }
        self.opened.lock().push(uri.to_string());
        Ok(())
    }
}

/// Call and route actions for a shelter.
#[derive(Debug, Clone)]
pub struct ShelterActions<L: UriLauncher> {
    launcher: L,
}

impl<L: UriLauncher> ShelterActions<L> {
    pub fn new(launcher: L) -> Self {
        Self { launcher }
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Dial the shelter's contact number.
    pub fn call(&self, shelter: &Shelter) -> Result<String, LaunchError> {
        let uri = call_uri(&shelter.contact_number);

        if !self.launcher.can_open(&uri) {
            tracing::warn!(uri = %uri, "Phone call not supported");
            return Err(LaunchError::ExternalLaunchUnsupported { uri });
        }

        self.launcher.open(&uri)?;
        tracing::info!(shelter = shelter.id, "Opened phone call");
        Ok(uri)
    }

    /// Open a route to the shelter.
    ///
    /// Tries the Naver route first and falls back to the platform maps
    /// scheme. Returns the URI that was opened.
    pub fn navigate(&self, origin: Option<&GeoFix>, shelter: &Shelter) -> Result<String, LaunchError> {
        let primary = route_uri(origin, shelter)?.to_string();

        if self.launcher.can_open(&primary) {
            self.launcher.open(&primary)?;
            tracing::info!(shelter = shelter.id, "Opened route");
            return Ok(primary);
        }

        let fallback = fallback_route_uri(shelter);
        tracing::debug!(uri = %fallback, "Route URL not supported, using maps fallback");

        match self.launcher.open(&fallback) {
            Ok(()) => {
                tracing::info!(shelter = shelter.id, "Opened fallback route");
                Ok(fallback)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Navigation unavailable");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shelter::StaticDirectory;

    fn gym() -> Shelter {
        StaticDirectory::gimhae().into_shelters().remove(0)
    }

    #[test]
    fn test_call_opens_tel() {
        let launcher = RecordingLauncher::new(["tel"]);
        let actions = ShelterActions::new(launcher.clone());

        let uri = actions.call(&gym()).unwrap();

        assert_eq!(uri, "tel:055-330-3000");
        assert_eq!(launcher.opened(), vec!["tel:055-330-3000".to_string()]);
    }

    #[test]
    fn test_call_unsupported() {
        let launcher = RecordingLauncher::new(["http"]);
        let actions = ShelterActions::new(launcher.clone());

        let err = actions.call(&gym()).unwrap_err();

        assert_eq!(
            err,
            LaunchError::ExternalLaunchUnsupported {
                uri: "tel:055-330-3000".to_string()
            }
        );
        assert_eq!(err.user_notice(), "Phone calls are unavailable.");
        assert!(launcher.opened().is_empty());
    }

    #[test]
    fn test_navigate_prefers_route_url() {
        let launcher = RecordingLauncher::new(["http", "maps"]);
        let actions = ShelterActions::new(launcher.clone());

        let uri = actions.navigate(None, &gym()).unwrap();

        assert!(uri.starts_with("http://map.naver.com/index.nhn?"));
        assert_eq!(launcher.opened(), vec![uri]);
    }

    #[test]
    fn test_navigate_falls_back_to_maps() {
        let launcher = RecordingLauncher::new(["maps"]);
        let actions = ShelterActions::new(launcher.clone());

        let uri = actions.navigate(None, &gym()).unwrap();

        assert_eq!(uri, "maps:35.233596,128.889544");
        assert_eq!(launcher.opened(), vec![uri]);
    }

    #[test]
    fn test_navigate_fallback_failure() {
        let actions = ShelterActions::new(RecordingLauncher::new(["tel"]));

        let err = actions.navigate(None, &gym()).unwrap_err();

        assert!(matches!(err, LaunchError::OpenFailed { .. }));
        assert_eq!(err.user_notice(), "Navigation is unavailable.");
    }

    #[test]
    fn test_scheme_matching() {
        let launcher = RecordingLauncher::new(["tel"]);
        assert!(launcher.can_open("tel:123"));
        assert!(!launcher.can_open("telephone:123"));
        assert!(!launcher.can_open("no-scheme"));
    }
}
