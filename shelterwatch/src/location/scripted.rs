//! Scripted location source.
//!
//! Replays a fixed route with per-step delays, applying the subscription's
//! interval/distance threshold the way a platform provider would. The
//! permission answer, the one-shot result and subscription failures are all
//! configurable so every degraded path can be exercised.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::error::LocationError;
use super::filter::FixThreshold;
use super::source::{LocationSource, PermissionStatus, Subscription, SubscriptionOptions};
use crate::geo::{GeoFix, DEFAULT_ORIGIN};

/// One step of a scripted route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedFix {
    /// Delay before this fix is emitted, measured from the previous step.
    pub after: Duration,
    /// The reading.
    pub fix: GeoFix,
}

impl ScriptedFix {
    pub fn new(after: Duration, fix: GeoFix) -> Self {
        Self { after, fix }
    }
}

#[derive(Debug)]
struct ScriptState {
    permission: PermissionStatus,
    one_shot: Result<GeoFix, LocationError>,
    subscribe_error: Option<LocationError>,
    route: Vec<ScriptedFix>,
    tokens: Vec<CancellationToken>,
    permission_requests: usize,
}

/// Location source that replays a scripted route.
///
/// Cloning shares the same script and bookkeeping.
///
/// # Example
///
/// ```ignore
/// let source = ScriptedLocationSource::from_route(route, Duration::from_secs(5))
///     .with_permission(PermissionStatus::Granted);
/// let subscription = source.subscribe(SubscriptionOptions::default()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedLocationSource {
    state: Arc<Mutex<ScriptState>>,
}

impl Default for ScriptedLocationSource {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ScriptedLocationSource {
    /// Create a source that grants permission, answers one-shot requests
    /// with the first scripted fix (or the default origin) and replays
    /// `route` on every subscription.
    pub fn new(route: Vec<ScriptedFix>) -> Self {
        let one_shot = Ok(route.first().map(|s| s.fix).unwrap_or(DEFAULT_ORIGIN));
        Self {
            state: Arc::new(Mutex::new(ScriptState {
                permission: PermissionStatus::Granted,
                one_shot,
                subscribe_error: None,
                route,
                tokens: Vec::new(),
                permission_requests: 0,
            })),
        }
    }

    /// Create a source from evenly spaced fixes.
    pub fn from_route(fixes: impl IntoIterator<Item = GeoFix>, step: Duration) -> Self {
        Self::new(
            fixes
                .into_iter()
                .map(|fix| ScriptedFix::new(step, fix))
                .collect(),
        )
    }

    /// Set the answer to permission requests.
    pub fn with_permission(self, permission: PermissionStatus) -> Self {
        self.state.lock().permission = permission;
        self
    }

    /// Set the one-shot result.
    pub fn with_one_shot(self, result: Result<GeoFix, LocationError>) -> Self {
        self.state.lock().one_shot = result;
        self
    }

    /// Make every subscription attempt fail.
    pub fn with_subscribe_error(self, error: LocationError) -> Self {
        self.state.lock().subscribe_error = Some(error);
        self
    }

    /// Number of subscriptions that have not been cancelled.
    pub fn live_subscriptions(&self) -> usize {
        self.state
            .lock()
            .tokens
            .iter()
            .filter(|t| !t.is_cancelled())
            .count()
    }

    /// Number of subscriptions ever started.
    pub fn subscriptions_started(&self) -> usize {
        self.state.lock().tokens.len()
    }

    /// Number of permission requests received.
    pub fn permission_requests(&self) -> usize {
        self.state.lock().permission_requests
    }
}

impl LocationSource for ScriptedLocationSource {
    async fn request_permission(&self) -> Result<PermissionStatus, LocationError> {
        let mut state = self.state.lock();
        state.permission_requests += 1;
        Ok(state.permission)
    }

    async fn get_once(&self) -> Result<GeoFix, LocationError> {
        let state = self.state.lock();
        if !state.permission.is_granted() {
            return Err(LocationError::PermissionDenied);
        }
        state.one_shot.clone()
    }

    async fn subscribe(&self, options: SubscriptionOptions) -> Result<Subscription, LocationError> {
        let route = {
            let state = self.state.lock();
            if !state.permission.is_granted() {
                return Err(LocationError::PermissionDenied);
            }
            if let Some(err) = &state.subscribe_error {
                return Err(err.clone());
            }
            state.route.clone()
        };

        let (feed, subscription) = Subscription::channel();
        self.state.lock().tokens.push(feed.token());

        tracing::debug!(
            steps = route.len(),
            interval_ms = options.min_interval.as_millis() as u64,
            distance_m = options.min_distance_m,
            "Scripted subscription started"
        );

        tokio::spawn(async move {
            let mut threshold = FixThreshold::new(options);

            for step in route {
                tokio::select! {
                    biased;

                    _ = feed.cancelled() => return,

                    _ = tokio::time::sleep(step.after) => {}
                }

                if threshold.accept(step.fix, Instant::now()) && !feed.send(step.fix) {
                    return;
                }
            }
        });

        Ok(subscription)
    }
}
