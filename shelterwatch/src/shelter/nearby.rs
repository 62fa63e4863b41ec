//! Nearby shelter finder.

use std::sync::Arc;

use thiserror::Error;

use super::directory::{DirectoryError, ShelterDirectory};
use super::model::RankedShelter;
use super::rank::{rank, DEFAULT_RANK_LIMIT};
use crate::geo::GeoFix;
use crate::location::{LocationError, LocationSource};

/// Errors from the nearby shelter lookup.
#[derive(Debug, Error)]
pub enum NearbyError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Current location unavailable: {0}")]
    LocationUnavailable(#[source] LocationError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl From<LocationError> for NearbyError {
    fn from(e: LocationError) -> Self {
        match e {
            LocationError::PermissionDenied => NearbyError::PermissionDenied,
            other => NearbyError::LocationUnavailable(other),
        }
    }
}

impl NearbyError {
    /// One-time notice to show the user.
    pub fn user_notice(&self) -> &'static str {
        match self {
            NearbyError::PermissionDenied => "Location permission is required.",
            NearbyError::LocationUnavailable(_) => "Current location could not be determined.",
            NearbyError::Directory(e) => e.user_notice(),
        }
    }
}

/// Ranks the directory around the user's location.
pub struct NearbyShelters<S: LocationSource, D: ShelterDirectory> {
    source: Arc<S>,
    directory: D,
    limit: usize,
}

impl<S: LocationSource, D: ShelterDirectory> NearbyShelters<S, D> {
    pub fn new(source: Arc<S>, directory: D) -> Self {
        Self {
            source,
            directory,
            limit: DEFAULT_RANK_LIMIT,
        }
    }

    /// Set the maximum number of results.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Resolve the ranking origin.
    ///
    /// Uses `known` when present, otherwise asks for permission and takes
    /// one fix.
    pub async fn locate(&self, known: Option<GeoFix>) -> Result<GeoFix, NearbyError> {
        if let Some(fix) = known {
            return Ok(fix);
        }

        let status = self.source.request_permission().await?;
        if !status.is_granted() {
            tracing::warn!("Location permission denied for shelter lookup");
            return Err(NearbyError::PermissionDenied);
        }

        self.source.get_once().await.map_err(|e| {
            tracing::warn!(error = %e, "Location fix for shelter lookup failed");
            NearbyError::from(e)
        })
    }

    /// Rank the directory around `origin`.
    pub fn rank_from(&self, origin: &GeoFix) -> Result<Vec<RankedShelter>, NearbyError> {
        let candidates = self.directory.shelters().map_err(|e| {
            tracing::warn!(error = %e, "Shelter directory unavailable");
            e
        })?;

        let ranked = rank(origin, &candidates, self.limit);
        tracing::debug!(
            latitude = origin.latitude,
            longitude = origin.longitude,
            candidates = candidates.len(),
            returned = ranked.len(),
            "Ranked shelters"
        );
        Ok(ranked)
    }

    /// Locate, then rank.
    pub async fn find(&self, known: Option<GeoFix>) -> Result<Vec<RankedShelter>, NearbyError> {
        let origin = self.locate(known).await?;
        self.rank_from(&origin)
    }
}
