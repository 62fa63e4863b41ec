//! Application bootstrap implementation.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::config::AppConfig;
use super::error::AppError;
use crate::bridge::{ChannelTransport, MapBridge, SimulatedSurface};
use crate::geo::GeoFix;
use crate::location::LocationSource;
use crate::shelter::{NearbyError, NearbyShelters, RankedShelter};
use crate::tracking::{TrackingController, TrackingEvent, TrackingService, TrackingSummary, UserCommand};

/// Capacity of the user command queue.
const COMMAND_QUEUE_CAPACITY: usize = 32;

/// Final state returned by [`ShelterWatchApp::shutdown`].
#[derive(Debug)]
pub struct AppReport {
    /// Tracking service summary.
    pub tracking: TrackingSummary,
    /// Map surface as it was when the bridge closed.
    pub surface: SimulatedSurface,
}

/// ShelterWatch application with task lifecycle management.
///
/// Started in this order:
/// 1. Map surface task (begins initialising immediately)
/// 2. Tracking service task, wired to the surface through the bridge
///
/// Shutdown cancels the service, which drops the bridge transport; the
/// surface task then sees its command channel close and exits.
pub struct ShelterWatchApp<S: LocationSource> {
    source: Arc<S>,
    config: AppConfig,
    commands: mpsc::Sender<UserCommand>,
    events: Option<mpsc::UnboundedReceiver<TrackingEvent>>,
    shutdown: CancellationToken,
    service: JoinHandle<TrackingSummary>,
    surface: JoinHandle<SimulatedSurface>,
}

impl<S: LocationSource> ShelterWatchApp<S> {
    /// Start the application.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(config: AppConfig, source: Arc<S>) -> Self {
        info!(
            start_up = config.start_up,
            settle_delay_ms = config.settle_delay.as_millis() as u64,
            "Starting ShelterWatch"
        );

        // 1. Map surface
        let (transport, surface_commands) = ChannelTransport::channel();
        let (surface_events_tx, surface_events_rx) = mpsc::unbounded_channel();
        let surface = SimulatedSurface::new(config.surface.clone());
        let surface = tokio::spawn(surface.run(surface_commands, surface_events_tx));

        // 2. Tracking service
        let bridge = MapBridge::with_settle_delay(transport, config.settle_delay);
        let controller = TrackingController::with_options(Arc::clone(&source), bridge, config.tracking);

        let (command_tx, command_rx) = mpsc::channel(COMMAND_QUEUE_CAPACITY);
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let shutdown = CancellationToken::new();

        let service = TrackingService::new(controller, command_rx, surface_events_rx, event_tx)
            .with_start_up(config.start_up);
        let service = tokio::spawn(service.run(shutdown.clone()));

        info!("ShelterWatch started");

        Self {
            source,
            config,
            commands: command_tx,
            events: Some(event_rx),
            shutdown,
            service,
            surface,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// A sender for user commands.
    pub fn commands(&self) -> mpsc::Sender<UserCommand> {
        self.commands.clone()
    }

    /// Queue a user command.
    pub async fn send(&self, command: UserCommand) -> Result<(), AppError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| AppError::ServiceStopped)
    }

    /// Take the event stream. Returns `None` after the first call.
    pub fn take_events(&mut self) -> Option<mpsc::UnboundedReceiver<TrackingEvent>> {
        self.events.take()
    }

    /// Rank the configured shelter directory around the user.
    ///
    /// Uses `known` when present, otherwise takes a one-shot fix.
    pub async fn nearby_shelters(
        &self,
        known: Option<GeoFix>,
    ) -> Result<Vec<RankedShelter>, NearbyError> {
        NearbyShelters::new(Arc::clone(&self.source), self.config.directory())
            .with_limit(self.config.shelter_limit)
            .find(known)
            .await
    }

    /// Stop the service and wait for both tasks.
    pub async fn shutdown(self) -> Result<AppReport, AppError> {
        info!("Shutting down ShelterWatch");

        self.shutdown.cancel();
        let tracking = self.service.await?;
        let surface = self.surface.await?;

        info!(
            fixes = tracking.fixes_applied,
            surface_commands = surface.applied().len(),
            "ShelterWatch stopped"
        );

        Ok(AppReport { tracking, surface })
    }
}
