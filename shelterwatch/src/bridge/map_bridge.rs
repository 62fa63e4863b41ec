//! Map bridge with the single-slot update queue.

use std::time::Duration;

use super::message::{decode_inbound, InboundMessage, MapCommand, OutboundMessage};
use super::transport::MapTransport;
use crate::geo::GeoFix;

/// Default wait between the readiness signal and flushing a buffered update.
///
/// Embedded surfaces are not reliably interactive right after they announce
/// readiness. Tunable, not a correctness requirement.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Readiness of the map surface.
///
/// Moves `NotReady → Ready` once and never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    NotReady,
    Ready,
}

impl Readiness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Readiness::NotReady => "not ready",
            Readiness::Ready => "ready",
        }
    }
}

/// Result of handling one inbound payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundOutcome {
    /// The surface just became ready.
    ///
    /// `flush_after` is set when a buffered update is waiting; the caller
    /// must call [`MapBridge::flush_pending`] once that delay has passed.
    BecameReady { flush_after: Option<Duration> },

    /// `map_ready` arrived again; state unchanged.
    AlreadyReady,

    /// Unknown type or malformed payload; state unchanged.
    Ignored,
}

/// Serializes commands to the map surface and tracks its readiness.
///
/// Owns the readiness flag and the pending update; both change only through
/// the methods below.
#[derive(Debug)]
pub struct MapBridge<T: MapTransport> {
    transport: T,
    readiness: Readiness,
    /// Newest fix buffered while not ready.
    pending: Option<GeoFix>,
    /// Fix taken from `pending` at the readiness transition, waiting out the
    /// settle delay.
    settling: Option<GeoFix>,
    settle_delay: Duration,
}

impl<T: MapTransport> MapBridge<T> {
    /// Create a bridge with the default settle delay.
    pub fn new(transport: T) -> Self {
        Self::with_settle_delay(transport, DEFAULT_SETTLE_DELAY)
    }

    /// Create a bridge with a custom settle delay.
    pub fn with_settle_delay(transport: T, settle_delay: Duration) -> Self {
        Self {
            transport,
            readiness: Readiness::NotReady,
            pending: None,
            settling: None,
            settle_delay,
        }
    }

    pub fn readiness(&self) -> Readiness {
        self.readiness
    }

    pub fn is_ready(&self) -> bool {
        self.readiness == Readiness::Ready
    }

    /// The buffered update, if any.
    pub fn pending(&self) -> Option<GeoFix> {
        self.pending
    }

    /// Check if a buffered update is waiting out the settle delay.
    pub fn has_settling_update(&self) -> bool {
        self.settling.is_some()
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Deliver a location fix to the surface.
    ///
    /// Sent immediately when ready; otherwise replaces any buffered update.
    pub fn deliver(&mut self, fix: GeoFix) {
        match self.readiness {
            Readiness::Ready => {
                // A newer fix supersedes the one still settling, keeping
                // provider order on the wire.
                if let Some(stale) = self.settling.take() {
                    tracing::debug!(
                        latitude = stale.latitude,
                        longitude = stale.longitude,
                        "Settling update superseded by newer fix"
                    );
                }
                self.post(OutboundMessage::update_location(&fix));
            }
            Readiness::NotReady => {
                if let Some(replaced) = self.pending.replace(fix) {
                    tracing::debug!(
                        latitude = replaced.latitude,
                        longitude = replaced.longitude,
                        "Pending update overwritten"
                    );
                }
                tracing::debug!(
                    latitude = fix.latitude,
                    longitude = fix.longitude,
                    "Map not ready, update buffered"
                );
            }
        }
    }

    /// Send a zoom command.
    ///
    /// Dropped silently while not ready. Returns true if the command reached
    /// the transport.
    pub fn send_command(&mut self, command: MapCommand) -> bool {
        if !self.is_ready() {
            tracing::debug!(command = ?command, "Map not ready, command dropped");
            return false;
        }
        self.post(command.into());
        true
    }

    /// Handle one raw inbound payload from the surface.
    ///
    /// Never fails: malformed payloads and unknown types are logged and
    /// ignored.
    pub fn handle_inbound(&mut self, raw: &str) -> InboundOutcome {
        let message = match decode_inbound(raw) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed map message");
                return InboundOutcome::Ignored;
            }
        };

        match message {
            InboundMessage::MapReady => self.mark_ready(),
            InboundMessage::Unknown => {
                tracing::debug!(payload = raw, "Ignoring unhandled map message type");
                InboundOutcome::Ignored
            }
        }
    }

    /// Send the update that was buffered at the readiness transition.
    ///
    /// The buffer is cleared whether or not the transport accepts the
    /// message. Returns true if an update was attempted.
    pub fn flush_pending(&mut self) -> bool {
        match self.settling.take() {
            Some(fix) => {
                tracing::debug!(
                    latitude = fix.latitude,
                    longitude = fix.longitude,
                    "Flushing buffered update"
                );
                self.post(OutboundMessage::update_location(&fix));
                true
            }
            None => false,
        }
    }

    fn mark_ready(&mut self) -> InboundOutcome {
        if self.is_ready() {
            tracing::debug!("Duplicate map_ready ignored");
            return InboundOutcome::AlreadyReady;
        }

        self.readiness = Readiness::Ready;
        self.settling = self.pending.take();

        tracing::info!(
            buffered_update = self.settling.is_some(),
            settle_delay_ms = self.settle_delay.as_millis() as u64,
            "Map surface ready"
        );

        InboundOutcome::BecameReady {
            flush_after: self.settling.map(|_| self.settle_delay),
        }
    }

    fn post(&self, message: OutboundMessage) {
        let payload = match message.encode() {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, kind = message.kind(), "Failed to encode map message");
                return;
            }
        };

        if let Err(e) = self.transport.post_message(payload) {
            tracing::warn!(error = %e, kind = message.kind(), "Map message not delivered");
        }
    }
}
