//! Transport seam between the bridge and the map surface.
//!
//! The bridge only needs "post this string to the surface". Keeping that
//! behind [`MapTransport`] lets the same bridge drive an embedded web view,
//! an in-process channel, or a recorder in tests.
//!
//! # Implementors
//!
//! - [`ChannelTransport`] - posts into a tokio channel read by the surface
//! - [`RecordingTransport`] - testing: records every payload, can be made to fail

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;

use super::error::BridgeError;
use super::message::OutboundMessage;

/// Postable-message channel to the map surface.
pub trait MapTransport: Send + 'static {
    /// Post a serialized envelope to the surface.
    fn post_message(&self, payload: String) -> Result<(), BridgeError>;
}

/// Transport backed by an unbounded tokio channel.
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    tx: mpsc::UnboundedSender<String>,
}

impl ChannelTransport {
    /// Wrap a sender whose receiver is read by the surface.
    pub fn new(tx: mpsc::UnboundedSender<String>) -> Self {
        Self { tx }
    }

    /// Create a transport plus the receiver the surface reads from.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl MapTransport for ChannelTransport {
    fn post_message(&self, payload: String) -> Result<(), BridgeError> {
        self.tx
            .send(payload)
            .map_err(|_| BridgeError::TransportClosed)
    }
}

/// Testing transport that records every posted payload.
///
/// Clones share the same record, so a test can keep one clone while the
/// bridge owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    sent: Arc<Mutex<Vec<String>>>,
    attempts: Arc<Mutex<usize>>,
    closed: bool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose every post fails with [`BridgeError::TransportClosed`].
    pub fn closed() -> Self {
        Self {
            closed: true,
            ..Self::default()
        }
    }

    /// Raw payloads posted successfully, in order.
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().clone()
    }

    /// Posted payloads decoded back into messages.
    ///
    /// Payloads that do not decode are skipped.
    pub fn messages(&self) -> Vec<OutboundMessage> {
        self.sent
            .lock()
            .iter()
            .filter_map(|raw| serde_json::from_str(raw).ok())
            .collect()
    }

    /// Number of `post_message` calls, including failed ones.
    pub fn attempts(&self) -> usize {
        *self.attempts.lock()
    }
}

impl MapTransport for RecordingTransport {
    fn post_message(&self, payload: String) -> Result<(), BridgeError> {
        *self.attempts.lock() += 1;
        if self.closed {
            return Err(BridgeError::TransportClosed);
        }
        self.sent.lock().push(payload);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_transport_delivers() {
        let (transport, mut rx) = ChannelTransport::channel();

        transport.post_message("hello".to_string()).unwrap();

        assert_eq!(rx.try_recv().unwrap(), "hello");
    }

    #[test]
    fn test_channel_transport_closed() {
        let (transport, rx) = ChannelTransport::channel();
        drop(rx);

        assert!(matches!(
            transport.post_message("hello".to_string()),
            Err(BridgeError::TransportClosed)
        ));
    }

    #[test]
    fn test_recording_transport_shares_record() {
        let transport = RecordingTransport::new();
        let observer = transport.clone();

        transport
            .post_message(r#"{"type":"zoomIn"}"#.to_string())
            .unwrap();

        assert_eq!(observer.sent(), vec![r#"{"type":"zoomIn"}"#.to_string()]);
        assert_eq!(observer.messages(), vec![OutboundMessage::ZoomIn]);
        assert_eq!(observer.attempts(), 1);
    }

    #[test]
    fn test_closed_recording_transport() {
        let transport = RecordingTransport::closed();

        assert!(transport.post_message("x".to_string()).is_err());
        assert_eq!(transport.attempts(), 1);
        assert!(transport.sent().is_empty());
    }

    #[test]
    fn test_trait_object_usage() {
        let transport: Box<dyn MapTransport> = Box::new(RecordingTransport::new());
        assert!(transport.post_message("x".to_string()).is_ok());
    }
}
