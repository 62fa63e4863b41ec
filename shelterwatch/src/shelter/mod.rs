//! Shelters and the ranking engine.
//!
//! [`rank`] is a pure function from an origin fix and a candidate slice to a
//! bounded, distance-sorted list. Candidates come from a
//! [`ShelterDirectory`], so ranking is testable independent of where the
//! data lives. [`NearbyShelters`] ties a location source, a directory and
//! the ranking together for the "nearby shelters" screen.

mod directory;
mod model;
mod nearby;
mod rank;

pub use directory::{DirectoryError, JsonFileDirectory, ShelterDirectory, StaticDirectory};
pub use model::{RankedShelter, Shelter, ShelterKind};
pub use nearby::{NearbyError, NearbyShelters};
pub use rank::{format_distance, rank, DEFAULT_RANK_LIMIT};
