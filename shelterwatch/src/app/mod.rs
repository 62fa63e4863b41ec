//! Application bootstrap and lifecycle.
//!
//! [`ShelterWatchApp`] wires one location source, the map surface and the
//! tracking service together and owns their tasks until shutdown.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      ShelterWatchApp                          │
//! │                                                               │
//! │  UserCommand ──► TrackingService ──► ChannelTransport ──┐     │
//! │                    │    ▲                               ▼     │
//! │  TrackingEvent ◄───┘    └──── map_ready ──── SimulatedSurface │
//! │                                                               │
//! │  nearby_shelters() ──► NearbyShelters ──► ShelterDirectory    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use shelterwatch::app::{AppConfig, ShelterWatchApp};
//!
//! let mut app = ShelterWatchApp::start(AppConfig::default(), source)?;
//! app.send(UserCommand::ZoomIn).await?;
//! let report = app.shutdown().await?;
//! ```

mod bootstrap;
mod config;
mod error;

pub use bootstrap::{AppReport, ShelterWatchApp};
pub use config::AppConfig;
pub use error::AppError;
