//! Simulated map surface.
//!
//! Stands in for the embedded map renderer: announces readiness once, keeps
//! a marker and a zoom level, and applies the outbound commands. Without a
//! map client id the real renderer shows a static fallback view; the
//! simulation mirrors that with [`SimulatedSurface::is_fallback`] but still
//! announces readiness so the native side behaves the same.

use std::time::Duration;

use tokio::sync::mpsc;

use super::message::{InboundMessage, OutboundMessage};
use crate::geo::{GeoFix, DEFAULT_ORIGIN};

/// Closest zoom level the surface allows.
pub const MAX_ZOOM: u8 = 21;

/// Widest zoom level the surface allows.
pub const MIN_ZOOM: u8 = 6;

/// Zoom level at creation.
pub const DEFAULT_ZOOM: u8 = 15;

/// Configuration for the simulated surface.
#[derive(Debug, Clone)]
pub struct SurfaceConfig {
    /// Map provider client id; `None` puts the surface in fallback mode.
    pub client_id: Option<String>,
    /// Initial map centre and marker position.
    pub center: GeoFix,
    /// Initial zoom level.
    pub zoom: u8,
    /// Time the surface takes to initialise before announcing readiness.
    pub init_delay: Duration,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            center: DEFAULT_ORIGIN,
            zoom: DEFAULT_ZOOM,
            init_delay: Duration::from_secs(1),
        }
    }
}

/// In-process map surface.
#[derive(Debug, Clone)]
pub struct SimulatedSurface {
    config: SurfaceConfig,
    marker: GeoFix,
    zoom: u8,
    announced: bool,
    applied: Vec<OutboundMessage>,
    rejected: usize,
}

impl SimulatedSurface {
    pub fn new(config: SurfaceConfig) -> Self {
        let zoom = config.zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        Self {
            marker: config.center,
            zoom,
            config,
            announced: false,
            applied: Vec::new(),
            rejected: 0,
        }
    }

    /// The readiness announcement, produced only on the first call.
    pub fn announce_ready(&mut self) -> Option<String> {
        if self.announced {
            return None;
        }
        self.announced = true;

        match serde_json::to_string(&InboundMessage::MapReady) {
            Ok(payload) => Some(payload),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to encode map_ready");
                None
            }
        }
    }

    /// Apply one raw command.
    ///
    /// Returns the applied command, or `None` for malformed or unknown
    /// payloads, which are counted and otherwise ignored.
    pub fn receive(&mut self, raw: &str) -> Option<OutboundMessage> {
        let message: OutboundMessage = match serde_json::from_str(raw) {
            Ok(message) => message,
            Err(e) => {
                tracing::debug!(error = %e, "Surface ignored command");
                self.rejected += 1;
                return None;
            }
        };

        match message {
            OutboundMessage::UpdateLocation {
                latitude,
                longitude,
            } => match GeoFix::new(latitude, longitude) {
                Ok(fix) => self.marker = fix,
                Err(e) => {
                    tracing::debug!(error = %e, "Surface ignored invalid location");
                    self.rejected += 1;
                    return None;
                }
            },
            OutboundMessage::ZoomIn => self.zoom = (self.zoom + 1).min(MAX_ZOOM),
            OutboundMessage::ZoomOut => self.zoom = self.zoom.saturating_sub(1).max(MIN_ZOOM),
        }

        self.applied.push(message);
        Some(message)
    }

    /// Run the surface until the command channel closes.
    ///
    /// Waits `init_delay`, announces readiness on `events`, then applies
    /// every command from `commands`. Commands that arrive during
    /// initialisation are dropped, as a surface that is still loading would.
    pub async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<String>,
        events: mpsc::UnboundedSender<String>,
    ) -> Self {
        tracing::info!(
            fallback = self.is_fallback(),
            zoom = self.zoom,
            "Map surface initialising"
        );

        let init = tokio::time::sleep(self.config.init_delay);
        tokio::pin!(init);

        loop {
            tokio::select! {
                biased;

                _ = &mut init, if !self.announced => {
                    if let Some(ready) = self.announce_ready() {
                        let _ = events.send(ready);
                    }
                }

                raw = commands.recv() => {
                    let Some(raw) = raw else { break };
                    if self.announced {
                        self.receive(&raw);
                    } else {
                        tracing::debug!("Surface still initialising, command dropped");
                        self.rejected += 1;
                    }
                }
            }
        }

        tracing::info!(applied = self.applied.len(), "Map surface closed");
        self
    }

    /// Current marker position.
    pub fn marker(&self) -> GeoFix {
        self.marker
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Check if the surface runs without a map client id.
    pub fn is_fallback(&self) -> bool {
        self.config
            .client_id
            .as_deref()
            .map_or(true, |id| id.trim().is_empty())
    }

    pub fn is_ready(&self) -> bool {
        self.announced
    }

    /// Commands applied so far, in order.
    pub fn applied(&self) -> &[OutboundMessage] {
        &self.applied
    }

    /// Number of payloads ignored.
    pub fn rejected(&self) -> usize {
        self.rejected
    }
}
