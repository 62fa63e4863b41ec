//! Bridge between native logic and the embedded map surface.
//!
//! The map surface initialises independently and announces itself exactly
//! once with a `map_ready` message. Until then location updates are buffered
//! (at most one, newest wins) and zoom commands are dropped.
//!
//! # State Machine
//!
//! ```text
//! NotReady --[inbound map_ready]--> Ready   (terminal for the surface lifetime)
//!
//! NotReady: deliver(fix)      -> overwrite pending update, send nothing
//!           send_command(..)  -> dropped silently
//! Ready:    deliver(fix)      -> updateLocation sent immediately
//!           send_command(..)  -> zoomIn / zoomOut sent
//! On Ready: pending update    -> sent once after the settle delay, then cleared
//! ```
//!
//! # Wire Format
//!
//! Both directions use a JSON envelope `{ "type": string, ...payload }`:
//!
//! - outbound: `updateLocation {latitude, longitude}`, `zoomIn {}`, `zoomOut {}`
//! - inbound: `map_ready {}`; any other type is ignored
//!
//! Malformed inbound payloads and transport failures are logged and
//! swallowed. The surface is best-effort UI and never faults the caller.

mod error;
mod map_bridge;
mod message;
mod surface;
mod transport;

pub use error::BridgeError;
pub use map_bridge::{InboundOutcome, MapBridge, Readiness, DEFAULT_SETTLE_DELAY};
pub use message::{decode_inbound, InboundMessage, MapCommand, OutboundMessage};
pub use surface::{SimulatedSurface, SurfaceConfig, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM};
pub use transport::{ChannelTransport, MapTransport, RecordingTransport};
