//! Continuous location tracking.
//!
//! The [`TrackingController`] is the single on/off switch for continuous
//! tracking and the merge point between the location source and the map
//! bridge. [`TrackingService`] runs it as one task that processes user
//! commands, surface messages, fixes and the settle timer one at a time, so
//! no state is ever touched concurrently.
//!
//! # Data Flow
//!
//! ```text
//! LocationSource ──► Subscription ──► TrackingController ──► current location
//!                                            │
//!                                            └──► MapBridge ──► MapTransport ──► surface
//!                                                     ▲
//!                        surface ── map_ready ────────┘
//! ```

mod controller;
mod error;
mod service;
mod session;

pub use controller::TrackingController;
pub use error::TrackingError;
pub use service::{TrackingEvent, TrackingService, TrackingSummary, UserCommand};
pub use session::TrackingSession;
