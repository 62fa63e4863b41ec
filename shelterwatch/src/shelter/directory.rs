//! Shelter dataset providers.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{Shelter, ShelterKind};
use crate::geo::{CoordError, GeoFix};

/// Errors from loading a shelter dataset.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Failed to read shelter dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse shelter dataset {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Shelter {id} has invalid coordinates: {source}")]
    InvalidCoordinates {
        id: u32,
        #[source]
        source: CoordError,
    },
}

impl DirectoryError {
    /// One-time notice to show the user.
    pub fn user_notice(&self) -> &'static str {
        "Shelter information is unavailable."
    }
}

/// Source of shelter candidates.
pub trait ShelterDirectory: Send + Sync {
    /// Produce the full candidate list.
    fn shelters(&self) -> Result<Vec<Shelter>, DirectoryError>;
}

impl<D: ShelterDirectory + ?Sized> ShelterDirectory for Box<D> {
    fn shelters(&self) -> Result<Vec<Shelter>, DirectoryError> {
        (**self).shelters()
    }
}

/// In-memory dataset.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    shelters: Vec<Shelter>,
}

impl StaticDirectory {
    pub fn new(shelters: Vec<Shelter>) -> Self {
        Self { shelters }
    }

    /// The eight built-in shelters around Gimhae.
    #[rustfmt::skip]
    pub fn gimhae() -> Self {
        use ShelterKind::*;

        Self::new(vec![
            builtin(1, "김해시 체육관", "경남 김해시 분성로 74", (35.233596, 128.889544), 2000, IndoorSports, "055-330-3000", &["화장실", "전기", "난방", "주차장"]),
            builtin(2, "장유중학교", "경남 김해시 장유면 장유로 155", (35.190156, 128.807892), 800, School, "055-310-3200", &["화장실", "전기", "난방"]),
            builtin(3, "김해문화의전당", "경남 김해시 가야의길 16", (35.235489, 128.888901), 1500, Cultural, "055-320-1000", &["화장실", "전기", "난방", "주차장", "무대시설"]),
            builtin(4, "김해대학교 체육관", "경남 김해시 인제로 197", (35.205147, 128.912772), 1200, University, "055-320-3000", &["화장실", "전기", "난방", "주차장"]),
            builtin(5, "진영읍사무소", "경남 김해시 진영읍 진영대로 2357", (35.310245, 128.756892), 300, Public, "055-330-4000", &["화장실", "전기"]),
            builtin(6, "김해여자고등학교", "경남 김해시 가락로 225", (35.228901, 128.888234), 600, School, "055-330-5000", &["화장실", "전기", "난방"]),
            builtin(7, "삼계초등학교", "경남 김해시 삼계로 123", (35.195432, 128.865123), 400, School, "055-330-6000", &["화장실", "전기", "난방"]),
            builtin(8, "김해시청 대강당", "경남 김해시 분성로 111", (35.228557, 128.889036), 500, Public, "055-330-2000", &["화장실", "전기", "난방", "주차장"]),
        ])
    }

    pub fn len(&self) -> usize {
        self.shelters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shelters.is_empty()
    }

    /// Consume the directory, returning its shelters.
    pub fn into_shelters(self) -> Vec<Shelter> {
        self.shelters
    }
}

impl ShelterDirectory for StaticDirectory {
    fn shelters(&self) -> Result<Vec<Shelter>, DirectoryError> {
        Ok(self.shelters.clone())
    }
}

#[allow(clippy::too_many_arguments)]
fn builtin(
    id: u32,
    name: &str,
    address: &str,
    (latitude, longitude): (f64, f64),
    capacity: u32,
    kind: ShelterKind,
    contact: &str,
    facilities: &[&str],
) -> Shelter {
    Shelter {
        id,
        name: name.to_string(),
        address: address.to_string(),
        coordinates: GeoFix {
            latitude,
            longitude,
        },
        capacity,
        kind,
        contact_number: contact.to_string(),
        facilities: facilities.iter().map(|f| f.to_string()).collect::<BTreeSet<_>>(),
    }
}

/// Dataset read from a JSON array of shelters.
///
/// The file is read on every call, so edits are picked up without a
/// restart.
#[derive(Debug, Clone)]
pub struct JsonFileDirectory {
    path: PathBuf,
}

impl JsonFileDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ShelterDirectory for JsonFileDirectory {
    fn shelters(&self) -> Result<Vec<Shelter>, DirectoryError> {
        let content = fs::read_to_string(&self.path).map_err(|source| DirectoryError::Io {
            path: self.path.clone(),
            source,
        })?;

        let shelters: Vec<Shelter> =
            serde_json::from_str(&content).map_err(|source| DirectoryError::Parse {
                path: self.path.clone(),
                source,
            })?;

        for shelter in &shelters {
            shelter
                .coordinates
                .validate()
                .map_err(|source| DirectoryError::InvalidCoordinates {
                    id: shelter.id,
                    source,
                })?;
        }

        tracing::debug!(
            path = %self.path.display(),
            count = shelters.len(),
            "Loaded shelter dataset"
        );

        Ok(shelters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_dataset(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_gimhae_has_eight_shelters() {
        let directory = StaticDirectory::gimhae();
        assert_eq!(directory.len(), 8);

        let shelters = directory.shelters().unwrap();
        let ids: Vec<u32> = shelters.iter().map(|s| s.id).collect();
        assert_eq!(ids, (1..=8).collect::<Vec<_>>());

        for shelter in &shelters {
            assert!(shelter.coordinates.validate().is_ok(), "{}", shelter.name);
            assert!(!matches!(shelter.kind, ShelterKind::Other(_)));
        }
    }

    #[test]
    fn test_gimhae_first_entry() {
        let shelters = StaticDirectory::gimhae().into_shelters();
        let gym = &shelters[0];

        assert_eq!(gym.name, "김해시 체육관");
        assert_eq!(gym.capacity, 2000);
        assert_eq!(gym.kind, ShelterKind::IndoorSports);
        assert_eq!(gym.contact_number, "055-330-3000");
        assert!(gym.facilities.contains("주차장"));
    }

    #[test]
    fn test_json_directory_round_trip() {
        let json = serde_json::to_string(&StaticDirectory::gimhae().into_shelters()).unwrap();
        let file = write_dataset(&json);

        let loaded = JsonFileDirectory::new(file.path()).shelters().unwrap();

        assert_eq!(loaded.len(), 8);
        assert_eq!(loaded[4].name, "진영읍사무소");
        assert_eq!(loaded[4].kind, ShelterKind::Public);
    }

    #[test]
    fn test_json_directory_missing_file() {
        let directory = JsonFileDirectory::new("/nonexistent/shelters.json");
        let err = directory.shelters().unwrap_err();

        assert!(matches!(err, DirectoryError::Io { .. }));
        assert_eq!(err.user_notice(), "Shelter information is unavailable.");
    }

    #[test]
    fn test_json_directory_malformed() {
        let file = write_dataset("[{\"id\": 1,");
        let err = JsonFileDirectory::new(file.path()).shelters().unwrap_err();
        assert!(matches!(err, DirectoryError::Parse { .. }));
    }

    #[test]
    fn test_json_directory_rejects_bad_coordinates() {
        let file = write_dataset(
            r#"[{"id":4,"name":"x","address":"y","latitude":95.0,"longitude":0.0,
                 "capacity":1,"type":"학교","contact":"z"}]"#,
        );
        let err = JsonFileDirectory::new(file.path()).shelters().unwrap_err();
        assert!(matches!(err, DirectoryError::InvalidCoordinates { id: 4, .. }));
    }

    #[test]
    fn test_trait_object_usage() {
        let directory: Box<dyn ShelterDirectory> = Box::new(StaticDirectory::default());
        assert!(directory.shelters().unwrap().is_empty());
    }
}
