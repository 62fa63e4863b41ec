//! Shelter records.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::rank::format_distance;
use crate::geo::GeoFix;

/// Category of an evacuation shelter.
///
/// Serialized as the Korean facility label used by the dataset. Labels this
/// type does not know are kept verbatim in [`ShelterKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShelterKind {
    /// 실내체육시설
    IndoorSports,
    /// 체육관
    Gymnasium,
    /// 학교
    School,
    /// 대학교시설
    University,
    /// 문화시설
    Cultural,
    /// 공공시설
    Public,
    Other(String),
}

impl ShelterKind {
    /// Dataset label.
    pub fn label(&self) -> &str {
        match self {
            ShelterKind::IndoorSports => "실내체육시설",
            ShelterKind::Gymnasium => "체육관",
            ShelterKind::School => "학교",
            ShelterKind::University => "대학교시설",
            ShelterKind::Cultural => "문화시설",
            ShelterKind::Public => "공공시설",
            ShelterKind::Other(label) => label,
        }
    }

    /// Display icon for list rows.
    pub fn icon(&self) -> &'static str {
        match self {
            ShelterKind::IndoorSports | ShelterKind::Gymnasium => "🏟️",
            ShelterKind::School | ShelterKind::University => "🏫",
            ShelterKind::Cultural => "🎭",
            ShelterKind::Public => "🏢",
            ShelterKind::Other(_) => "🏠",
        }
    }
}

impl From<String> for ShelterKind {
    fn from(label: String) -> Self {
        match label.as_str() {
            "실내체육시설" => ShelterKind::IndoorSports,
            "체육관" => ShelterKind::Gymnasium,
            "학교" => ShelterKind::School,
            "대학교시설" => ShelterKind::University,
            "문화시설" => ShelterKind::Cultural,
            "공공시설" => ShelterKind::Public,
            _ => ShelterKind::Other(label),
        }
    }
}

impl From<ShelterKind> for String {
    fn from(kind: ShelterKind) -> Self {
        match kind {
            ShelterKind::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for ShelterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A static shelter record from the dataset provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shelter {
    pub id: u32,
    pub name: String,
    pub address: String,
    /// Location, stored flat as `latitude` / `longitude`.
    #[serde(flatten)]
    pub coordinates: GeoFix,
    /// Number of people the shelter holds.
    pub capacity: u32,
    #[serde(rename = "type")]
    pub kind: ShelterKind,
    #[serde(rename = "contact")]
    pub contact_number: String,
    #[serde(default)]
    pub facilities: BTreeSet<String>,
}

/// A shelter plus its distance from the ranking origin.
///
/// Computed on every ranking call and never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedShelter {
    pub shelter: Shelter,
    /// Great-circle distance in kilometres, never negative.
    pub distance_km: f64,
}

impl RankedShelter {
    /// Distance rendered for display (`"218m"`, `"3.8km"`).
    pub fn formatted_distance(&self) -> String {
        format_distance(self.distance_km)
    }
}
