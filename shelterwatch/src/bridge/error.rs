//! Bridge error types.

use thiserror::Error;

/// Failures on the map bridge.
///
/// These are always swallowed and logged by [`MapBridge`](super::MapBridge);
/// they are public so transports and the simulated surface can report them.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Inbound payload could not be parsed.
    #[error("Malformed bridge message: {0}")]
    Malformed(#[source] serde_json::Error),

    /// Outbound message could not be serialized.
    #[error("Failed to encode bridge message: {0}")]
    Encode(#[source] serde_json::Error),

    /// The channel to the surface is gone.
    #[error("Map surface channel closed")]
    TransportClosed,
}
