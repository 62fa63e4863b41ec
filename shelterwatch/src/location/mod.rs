//! Location source abstraction.
//!
//! Wraps the platform location service behind the [`LocationSource`] trait:
//! a permission request, a one-shot fix and a continuous subscription.
//!
//! # Subscription lifecycle
//!
//! ```text
//! LocationSource::subscribe ──► Subscription ──► next_fix() ... ──► cancel()/drop
//!                                 │
//!                                 └── SubscriptionHandle (idempotent cancel, RAII)
//! ```
//!
//! Once [`Subscription::cancel`] returns, `next_fix` never yields another fix,
//! even if the provider had already queued some.
//!
//! # Implementors
//!
//! - [`ScriptedLocationSource`] - replays a fixed route; used by the CLI demo
//!   and by tests

mod error;
mod filter;
mod scripted;
mod source;

pub use error::LocationError;
pub use filter::FixThreshold;
pub use scripted::{ScriptedFix, ScriptedLocationSource};
pub use source::{
    LocationSource, PermissionStatus, Subscription, SubscriptionFeed, SubscriptionHandle,
    SubscriptionOptions, DEFAULT_MIN_DISTANCE_M, DEFAULT_MIN_INTERVAL,
};
