//! Tracking controller.

use std::sync::Arc;

use super::error::TrackingError;
use super::session::TrackingSession;
use crate::bridge::{InboundOutcome, MapBridge, MapCommand, MapTransport, Readiness};
use crate::geo::{GeoFix, DEFAULT_ORIGIN};
use crate::location::{LocationSource, SubscriptionOptions};

/// Owns the tracking switch, the current location and the map bridge.
///
/// All methods take `&mut self`: the controller is driven from a single
/// task, so toggles, fixes and surface messages are applied one at a time.
///
/// # Example
///
/// ```ignore
/// let mut controller = TrackingController::new(source, MapBridge::new(transport));
///
/// controller.toggle().await?;           // start
/// while let Some(fix) = controller.next_fix().await {
///     controller.on_fix(fix);
/// }
/// controller.teardown();
/// ```
pub struct TrackingController<S: LocationSource, T: MapTransport> {
    source: Arc<S>,
    bridge: MapBridge<T>,
    session: TrackingSession,
    current: GeoFix,
    options: SubscriptionOptions,
}

impl<S: LocationSource, T: MapTransport> std::fmt::Debug for TrackingController<S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackingController")
            .field("active", &self.is_active())
            .field("current", &self.current)
            .field("readiness", &self.bridge.readiness())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<S: LocationSource, T: MapTransport> TrackingController<S, T> {
    /// Create a controller with default subscription thresholds.
    pub fn new(source: Arc<S>, bridge: MapBridge<T>) -> Self {
        Self::with_options(source, bridge, SubscriptionOptions::default())
    }

    /// Create a controller with custom subscription thresholds.
    pub fn with_options(source: Arc<S>, bridge: MapBridge<T>, options: SubscriptionOptions) -> Self {
        Self {
            source,
            bridge,
            session: TrackingSession::new(),
            current: DEFAULT_ORIGIN,
            options,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    /// The authoritative current location.
    pub fn current_location(&self) -> GeoFix {
        self.current
    }

    pub fn readiness(&self) -> Readiness {
        self.bridge.readiness()
    }

    pub fn bridge(&self) -> &MapBridge<T> {
        &self.bridge
    }

    pub fn options(&self) -> SubscriptionOptions {
        self.options
    }

    /// Flip continuous tracking on or off.
    ///
    /// Returns whether tracking is active afterwards. A failed start leaves
    /// tracking off and is not retried.
    pub async fn toggle(&mut self) -> Result<bool, TrackingError> {
        if self.is_active() {
            self.stop();
            Ok(false)
        } else {
            self.start().await?;
            Ok(true)
        }
    }

    /// Start continuous tracking.
    ///
    /// A no-op when already active.
    pub async fn start(&mut self) -> Result<(), TrackingError> {
        if self.is_active() {
            return Ok(());
        }

        match self.source.subscribe(self.options).await {
            Ok(subscription) => {
                self.session.begin(subscription);
                tracing::info!(
                    interval_ms = self.options.min_interval.as_millis() as u64,
                    distance_m = self.options.min_distance_m,
                    "Location tracking started"
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Location tracking failed to start");
                Err(e.into())
            }
        }
    }

    /// Stop continuous tracking.
    ///
    /// Returns true if a subscription was cancelled.
    pub fn stop(&mut self) -> bool {
        let stopped = self.session.end();
        if stopped {
            tracing::info!("Location tracking stopped");
        }
        stopped
    }

    /// Initial sequence when the map view comes up.
    ///
    /// Requests permission, delivers one fix, then starts continuous
    /// tracking. A failed one-shot fix is logged and tracking still starts.
    pub async fn start_up(&mut self) -> Result<(), TrackingError> {
        let status = match self.source.request_permission().await {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!(error = %e, "Location permission request failed");
                return Err(e.into());
            }
        };

        if !status.is_granted() {
            tracing::warn!("Location permission denied");
            return Err(TrackingError::PermissionDenied);
        }

        match self.source.get_once().await {
            Ok(fix) => self.on_fix(fix),
            Err(e) => tracing::warn!(error = %e, "Initial location fix failed"),
        }

        self.start().await
    }

    /// Wait for the next fix from the live subscription.
    ///
    /// Waits forever while tracking is off.
    pub async fn next_fix(&mut self) -> Option<GeoFix> {
        self.session.next_fix().await
    }

    /// Apply a fix: update the current location and forward it to the map.
    pub fn on_fix(&mut self, fix: GeoFix) {
        self.current = fix;
        tracing::debug!(
            latitude = fix.latitude,
            longitude = fix.longitude,
            "Location updated"
        );
        self.bridge.deliver(fix);
    }

    /// Handle a raw message from the map surface.
    pub fn handle_map_message(&mut self, raw: &str) -> InboundOutcome {
        self.bridge.handle_inbound(raw)
    }

    /// Send the update buffered at the readiness transition.
    pub fn flush_pending(&mut self) -> bool {
        self.bridge.flush_pending()
    }

    /// Send a zoom command; dropped while the map is not ready.
    pub fn zoom(&mut self, command: MapCommand) -> bool {
        self.bridge.send_command(command)
    }

    /// Release the subscription unconditionally.
    pub fn teardown(&mut self) {
        if self.session.end() {
            tracing::info!("Location subscription released on teardown");
        }
    }
}
