//! Tracking service event loop.
//!
//! Runs a [`TrackingController`] as a single task. User commands, surface
//! messages, location fixes and the settle timer all arrive through one
//! `select!`, so they are applied strictly one after another.

use std::future::Future;
use std::pin::Pin;

use tokio::sync::mpsc;
use tokio::time::Sleep;
use tokio_util::sync::CancellationToken;

use super::controller::TrackingController;
use crate::bridge::{InboundOutcome, MapCommand, MapTransport};
use crate::geo::GeoFix;
use crate::location::LocationSource;

/// Commands from the user interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    /// Flip continuous tracking on or off.
    ToggleTracking,
    ZoomIn,
    ZoomOut,
}

/// State changes reported back to the user interface.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackingEvent {
    /// Continuous tracking was switched on or off.
    TrackingChanged { active: bool },

    /// The current location changed.
    LocationChanged(GeoFix),

    /// The map surface announced readiness.
    MapReady,

    /// One-time message to show the user.
    Notice(&'static str),
}

/// Final state of a service run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingSummary {
    /// Current location when the service stopped.
    pub final_location: GeoFix,
    /// Whether tracking was on when shutdown arrived.
    pub was_tracking: bool,
    /// Whether the surface had announced readiness.
    pub map_ready: bool,
    /// Fixes applied from the location source.
    pub fixes_applied: u64,
    /// User commands processed.
    pub commands_handled: u64,
}

/// Single-task driver for a tracking controller.
pub struct TrackingService<S: LocationSource, T: MapTransport> {
    controller: TrackingController<S, T>,
    commands: mpsc::Receiver<UserCommand>,
    surface_events: mpsc::UnboundedReceiver<String>,
    events: mpsc::UnboundedSender<TrackingEvent>,
    start_up: bool,
}

impl<S: LocationSource, T: MapTransport> TrackingService<S, T> {
    /// Create a service.
    ///
    /// # Arguments
    ///
    /// * `controller` - The controller to drive
    /// * `commands` - User commands
    /// * `surface_events` - Raw messages posted by the map surface
    /// * `events` - Where state changes are reported
    pub fn new(
        controller: TrackingController<S, T>,
        commands: mpsc::Receiver<UserCommand>,
        surface_events: mpsc::UnboundedReceiver<String>,
        events: mpsc::UnboundedSender<TrackingEvent>,
    ) -> Self {
        Self {
            controller,
            commands,
            surface_events,
            events,
            start_up: true,
        }
    }

    /// Whether to run the permission / first fix / start sequence on launch.
    ///
    /// Enabled by default.
    pub fn with_start_up(mut self, start_up: bool) -> Self {
        self.start_up = start_up;
        self
    }

    /// Run until `shutdown` is cancelled or the command channel closes.
    ///
    /// The location subscription is always released before returning.
    pub async fn run(self, shutdown: CancellationToken) -> TrackingSummary {
        let Self {
            mut controller,
            mut commands,
            mut surface_events,
            events,
            start_up,
        } = self;

        let emit = |event: TrackingEvent| {
            // The interface may have gone away; state is still kept.
            let _ = events.send(event);
        };

        tracing::info!(start_up, "Tracking service started");

        let mut summary = TrackingSummary {
            final_location: controller.current_location(),
            was_tracking: false,
            map_ready: false,
            fixes_applied: 0,
            commands_handled: 0,
        };

        if start_up {
            let before = controller.current_location();
            let result = tokio::select! {
                biased;

                _ = shutdown.cancelled() => None,

                result = controller.start_up() => Some(result),
            };

            match result {
                None => {
                    controller.teardown();
                    summary.final_location = controller.current_location();
                    tracing::info!("Tracking service stopped during start-up");
                    return summary;
                }
                Some(result) => {
                    let now = controller.current_location();
                    if now != before {
                        emit(TrackingEvent::LocationChanged(now));
                    }
                    match result {
                        Ok(()) => emit(TrackingEvent::TrackingChanged { active: true }),
                        Err(e) => emit(TrackingEvent::Notice(e.user_notice())),
                    }
                }
            }
        }

        let mut settle: Option<Pin<Box<Sleep>>> = None;
        let mut surface_open = true;

        loop {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    tracing::debug!("Tracking service shutdown requested");
                    break;
                }

                command = commands.recv() => {
                    let Some(command) = command else {
                        tracing::debug!("Command channel closed");
                        break;
                    };
                    summary.commands_handled += 1;

                    match command {
                        UserCommand::ToggleTracking => match controller.toggle().await {
                            Ok(active) => emit(TrackingEvent::TrackingChanged { active }),
                            Err(e) => emit(TrackingEvent::Notice(e.user_notice())),
                        },
                        UserCommand::ZoomIn => {
                            if !controller.zoom(MapCommand::ZoomIn) {
                                tracing::debug!("Zoom in dropped, map not ready");
                            }
                        }
                        UserCommand::ZoomOut => {
                            if !controller.zoom(MapCommand::ZoomOut) {
                                tracing::debug!("Zoom out dropped, map not ready");
                            }
                        }
                    }
                }

                raw = surface_events.recv(), if surface_open => {
                    let Some(raw) = raw else {
                        tracing::debug!("Map surface channel closed");
                        surface_open = false;
                        continue;
                    };

                    if let InboundOutcome::BecameReady { flush_after } =
                        controller.handle_map_message(&raw)
                    {
                        emit(TrackingEvent::MapReady);
                        settle = flush_after.map(|delay| Box::pin(tokio::time::sleep(delay)));
                    }
                }

                _ = settle_elapsed(&mut settle) => {
                    settle = None;
                    controller.flush_pending();
                }

                Some(fix) = controller.next_fix() => {
                    summary.fixes_applied += 1;
                    controller.on_fix(fix);
                    emit(TrackingEvent::LocationChanged(fix));
                }
            }
        }

        summary.final_location = controller.current_location();
        summary.was_tracking = controller.is_active();
        summary.map_ready = controller.bridge().is_ready();

        controller.teardown();

        tracing::info!(
            fixes = summary.fixes_applied,
            commands = summary.commands_handled,
            map_ready = summary.map_ready,
            "Tracking service stopped"
        );

        summary
    }
}

/// Resolve when the settle timer fires; wait forever when none is armed.
fn settle_elapsed(timer: &mut Option<Pin<Box<Sleep>>>) -> impl Future<Output = ()> + '_ {
    async move {
        match timer {
            Some(sleep) => sleep.as_mut().await,
            None => std::future::pending().await,
        }
    }
}
