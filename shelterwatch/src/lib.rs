//! ShelterWatch - location tracking and shelter ranking for a disaster
//! information app.
//!
//! The library covers the two stateful parts of the app:
//!
//! - the location-tracking pipeline, which merges a location subscription
//!   into an embedded map surface that initialises on its own schedule
//!   ([`location`], [`bridge`], [`tracking`])
//! - the shelter ranking engine, which turns one fix into a bounded,
//!   distance-sorted list of evacuation shelters ([`shelter`])
//!
//! [`app`] wires them together; [`actions`] covers calling and routing to a
//! shelter through an external URI launcher.

pub mod actions;
pub mod app;
pub mod bridge;
pub mod config;
pub mod geo;
pub mod location;
pub mod logging;
pub mod shelter;
pub mod tracking;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
