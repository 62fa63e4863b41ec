//! Shelter actions backed by an external URI launcher.
//!
//! Calling a shelter opens a `tel:` URI; routing opens a Naver map route
//! and falls back to the platform `maps:` scheme when no handler accepts
//! the route URL.

mod error;
mod launcher;
mod uri;

pub use error::LaunchError;
pub use launcher::{RecordingLauncher, ShelterActions, UriLauncher};
pub use uri::{call_uri, fallback_route_uri, route_uri, ROUTE_BASE_URL};
