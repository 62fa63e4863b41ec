//! Location source trait and subscription handles.

use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::error::LocationError;
use crate::geo::GeoFix;

/// Default minimum interval between continuous fixes.
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(5000);

/// Default minimum movement between continuous fixes, in metres.
pub const DEFAULT_MIN_DISTANCE_M: f64 = 10.0;

/// Outcome of a foreground permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

impl PermissionStatus {
    /// Check if access was granted.
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }

    /// Convert a denial into [`LocationError::PermissionDenied`].
    pub fn ensure_granted(self) -> Result<(), LocationError> {
        match self {
            PermissionStatus::Granted => Ok(()),
            PermissionStatus::Denied => Err(LocationError::PermissionDenied),
        }
    }
}

/// Thresholds for a continuous subscription.
///
/// A fix is delivered when either threshold is crossed since the last
/// delivered fix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubscriptionOptions {
    /// Minimum time between fixes.
    pub min_interval: Duration,
    /// Minimum movement between fixes, in metres.
    pub min_distance_m: f64,
}

impl Default for SubscriptionOptions {
    fn default() -> Self {
        Self {
            min_interval: DEFAULT_MIN_INTERVAL,
            min_distance_m: DEFAULT_MIN_DISTANCE_M,
        }
    }
}

/// Platform location service.
///
/// # Example
///
/// ```ignore
/// use shelterwatch::location::{LocationSource, SubscriptionOptions};
///
/// async fn follow<S: LocationSource>(source: &S) -> Result<(), LocationError> {
///     source.request_permission().await?.ensure_granted()?;
///     let mut subscription = source.subscribe(SubscriptionOptions::default()).await?;
///     while let Some(fix) = subscription.next_fix().await {
///         println!("{}", fix);
///     }
///     Ok(())
/// }
/// ```
pub trait LocationSource: Send + Sync + 'static {
    /// Request foreground location access.
    ///
    /// Only the first call may show a platform prompt.
    fn request_permission(
        &self,
    ) -> impl Future<Output = Result<PermissionStatus, LocationError>> + Send;

    /// Take a single fix at the highest available accuracy.
    fn get_once(&self) -> impl Future<Output = Result<GeoFix, LocationError>> + Send;

    /// Start a continuous subscription.
    fn subscribe(
        &self,
        options: SubscriptionOptions,
    ) -> impl Future<Output = Result<Subscription, LocationError>> + Send;
}

/// Cancellation handle for a continuous subscription.
///
/// `cancel` is idempotent and safe after the provider has already stopped.
/// Dropping the handle cancels it.
#[derive(Debug)]
pub struct SubscriptionHandle {
    token: CancellationToken,
}

impl SubscriptionHandle {
    fn new(token: CancellationToken) -> Self {
        Self { token }
    }

    /// Stop the subscription.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Check if the subscription has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Provider side of a subscription.
///
/// Location sources push fixes through the feed until the consumer cancels.
#[derive(Debug, Clone)]
pub struct SubscriptionFeed {
    tx: mpsc::UnboundedSender<GeoFix>,
    token: CancellationToken,
}

impl SubscriptionFeed {
    /// Push a fix to the consumer.
    ///
    /// Returns false once the subscription is cancelled or the consumer is gone.
    pub fn send(&self, fix: GeoFix) -> bool {
        if self.token.is_cancelled() {
            return false;
        }
        self.tx.send(fix).is_ok()
    }

    /// Check if the consumer cancelled the subscription.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Wait until the consumer cancels the subscription.
    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }

    /// Token shared with the consumer's handle.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}

/// Consumer side of a continuous subscription.
#[derive(Debug)]
pub struct Subscription {
    fixes: mpsc::UnboundedReceiver<GeoFix>,
    handle: SubscriptionHandle,
    ended: bool,
}

impl Subscription {
    /// Create a connected feed/subscription pair.
    pub fn channel() -> (SubscriptionFeed, Subscription) {
        let (tx, rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();
        let feed = SubscriptionFeed {
            tx,
            token: token.clone(),
        };
        let subscription = Subscription {
            fixes: rx,
            handle: SubscriptionHandle::new(token),
            ended: false,
        };
        (feed, subscription)
    }

    /// Wait for the next fix.
    ///
    /// Returns `None` once cancelled or when the provider stops. After the
    /// provider has stopped, further calls wait forever so the subscription
    /// can sit in a `select!` loop without spinning.
    pub async fn next_fix(&mut self) -> Option<GeoFix> {
        if self.handle.is_cancelled() {
            return None;
        }
        if self.ended {
            return std::future::pending().await;
        }

        tokio::select! {
            biased;

            _ = self.handle.token.cancelled() => None,

            fix = self.fixes.recv() => {
                if fix.is_none() {
                    tracing::debug!("Location provider stopped delivering fixes");
                    self.ended = true;
                }
                fix
            }
        }
    }

    /// Cancel the subscription and discard queued fixes.
    pub fn cancel(&mut self) {
        self.handle.cancel();
        self.fixes.close();
    }

    /// Check if the subscription has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.handle.is_cancelled()
    }

    /// The cancellation handle.
    pub fn handle(&self) -> &SubscriptionHandle {
        &self.handle
    }
}
