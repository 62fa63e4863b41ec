//! Bridge wire messages.

use serde::{Deserialize, Serialize};

use super::error::BridgeError;
use crate::geo::GeoFix;

/// Commands sent to the map surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutboundMessage {
    /// Re-centre the map and move the location marker.
    #[serde(rename = "updateLocation")]
    UpdateLocation { latitude: f64, longitude: f64 },

    #[serde(rename = "zoomIn")]
    ZoomIn,

    #[serde(rename = "zoomOut")]
    ZoomOut,
}

impl OutboundMessage {
    /// Build an `updateLocation` message for a fix.
    pub fn update_location(fix: &GeoFix) -> Self {
        OutboundMessage::UpdateLocation {
            latitude: fix.latitude,
            longitude: fix.longitude,
        }
    }

    /// Wire tag of this message.
    pub fn kind(&self) -> &'static str {
        match self {
            OutboundMessage::UpdateLocation { .. } => "updateLocation",
            OutboundMessage::ZoomIn => "zoomIn",
            OutboundMessage::ZoomOut => "zoomOut",
        }
    }

    /// Serialize to the JSON envelope.
    pub fn encode(&self) -> Result<String, BridgeError> {
        serde_json::to_string(self).map_err(BridgeError::Encode)
    }
}

/// User-triggered map commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapCommand {
    ZoomIn,
    ZoomOut,
}

impl From<MapCommand> for OutboundMessage {
    fn from(command: MapCommand) -> Self {
        match command {
            MapCommand::ZoomIn => OutboundMessage::ZoomIn,
            MapCommand::ZoomOut => OutboundMessage::ZoomOut,
        }
    }
}

/// Events emitted by the map surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InboundMessage {
    /// The surface can accept commands.
    #[serde(rename = "map_ready")]
    MapReady,

    /// Any type this side does not handle.
    #[serde(other)]
    Unknown,
}

/// Parse an inbound envelope.
///
/// Unknown `type` values decode to [`InboundMessage::Unknown`]; only
/// unparseable payloads are errors.
pub fn decode_inbound(raw: &str) -> Result<InboundMessage, BridgeError> {
    serde_json::from_str(raw).map_err(BridgeError::Malformed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_location_envelope() {
        let fix = GeoFix::new(35.0, 129.0).unwrap();
        let encoded = OutboundMessage::update_location(&fix).encode().unwrap();
        let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();

        assert_eq!(
            value,
            json!({"type": "updateLocation", "latitude": 35.0, "longitude": 129.0})
        );
    }

    #[test]
    fn test_zoom_envelopes() {
        assert_eq!(OutboundMessage::ZoomIn.encode().unwrap(), r#"{"type":"zoomIn"}"#);
        assert_eq!(OutboundMessage::ZoomOut.encode().unwrap(), r#"{"type":"zoomOut"}"#);
    }

    #[test]
    fn test_kind_matches_wire_tag() {
        let fix = GeoFix::new(35.0, 129.0).unwrap();
        for message in [
            OutboundMessage::update_location(&fix),
            OutboundMessage::ZoomIn,
            OutboundMessage::ZoomOut,
        ] {
            let value: serde_json::Value =
                serde_json::from_str(&message.encode().unwrap()).unwrap();
            assert_eq!(value["type"], message.kind());
        }
    }

    #[test]
    fn test_map_command_conversion() {
        assert_eq!(OutboundMessage::from(MapCommand::ZoomIn), OutboundMessage::ZoomIn);
        assert_eq!(OutboundMessage::from(MapCommand::ZoomOut), OutboundMessage::ZoomOut);
    }

    #[test]
    fn test_decode_map_ready() {
        assert_eq!(
            decode_inbound(r#"{"type":"map_ready"}"#).unwrap(),
            InboundMessage::MapReady
        );
    }

    #[test]
    fn test_decode_map_ready_with_extra_fields() {
        assert_eq!(
            decode_inbound(r#"{"type":"map_ready","zoom":15}"#).unwrap(),
            InboundMessage::MapReady
        );
    }

    #[test]
    fn test_decode_unknown_type() {
        assert_eq!(
            decode_inbound(r#"{"type":"marker_clicked","id":3}"#).unwrap(),
            InboundMessage::Unknown
        );
    }

    #[test]
    fn test_decode_malformed() {
        assert!(matches!(
            decode_inbound("{not json"),
            Err(BridgeError::Malformed(_))
        ));
        assert!(matches!(
            decode_inbound(r#"{"ready": true}"#),
            Err(BridgeError::Malformed(_))
        ));
    }
}
