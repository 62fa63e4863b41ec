//! Tracking session bookkeeping.

use crate::geo::GeoFix;
use crate::location::Subscription;

/// The live subscription, if tracking is on.
///
/// Tracking is active exactly when a subscription is held, so the
/// active flag and the handle cannot disagree.
#[derive(Debug, Default)]
pub struct TrackingSession {
    subscription: Option<Subscription>,
}

impl TrackingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.subscription.is_some()
    }

    /// Take ownership of a new subscription.
    ///
    /// Any subscription already held is cancelled first, so at most one is
    /// ever live.
    pub fn begin(&mut self, subscription: Subscription) {
        if let Some(mut previous) = self.subscription.replace(subscription) {
            tracing::warn!("Replacing live subscription");
            previous.cancel();
        }
    }

    /// Cancel and release the subscription.
    ///
    /// Returns true if one was held.
    pub fn end(&mut self) -> bool {
        match self.subscription.take() {
            Some(mut subscription) => {
                subscription.cancel();
                true
            }
            None => false,
        }
    }

    /// Wait for the next fix from the live subscription.
    ///
    /// Waits forever while inactive.
    pub async fn next_fix(&mut self) -> Option<GeoFix> {
        match self.subscription.as_mut() {
            Some(subscription) => subscription.next_fix().await,
            None => std::future::pending().await,
        }
    }
}

impl Drop for TrackingSession {
    fn drop(&mut self) {
        self.end();
    }
}
