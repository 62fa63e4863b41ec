//! Distance ranking.

use super::model::{RankedShelter, Shelter};
use crate::geo::{haversine_km, GeoFix};

/// Number of shelters returned when no limit is configured.
pub const DEFAULT_RANK_LIMIT: usize = 8;

/// Rank candidates by great-circle distance from `origin`.
///
/// Sorting is stable, so equal distances keep their input order. At most
/// `limit` entries are returned; an empty candidate slice yields an empty
/// list. Coordinates are not validated here.
pub fn rank(origin: &GeoFix, candidates: &[Shelter], limit: usize) -> Vec<RankedShelter> {
    let mut ranked: Vec<RankedShelter> = candidates
        .iter()
        .map(|shelter| RankedShelter {
            distance_km: haversine_km(origin, &shelter.coordinates),
            shelter: shelter.clone(),
        })
        .collect();

    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked.truncate(limit);
    ranked
}

/// Format a distance for display.
///
/// Under one kilometre: whole metres (`"535m"`). Otherwise kilometres with
/// one decimal (`"3.8km"`).
pub fn format_distance(distance_km: f64) -> String {
    if distance_km < 1.0 {
        format!("{}m", (distance_km * 1000.0).round() as i64)
    } else {
        format!("{:.1}km", distance_km)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::DEFAULT_ORIGIN;
    use crate::shelter::{ShelterKind, StaticDirectory};
    use std::collections::BTreeSet;

    fn shelter(id: u32, lat: f64, lon: f64) -> Shelter {
        Shelter {
            id,
            name: format!("shelter {id}"),
            address: String::new(),
            coordinates: GeoFix::new(lat, lon).unwrap(),
            capacity: 100,
            kind: ShelterKind::School,
            contact_number: String::new(),
            facilities: BTreeSet::new(),
        }
    }

    fn ids(ranked: &[RankedShelter]) -> Vec<u32> {
        ranked.iter().map(|r| r.shelter.id).collect()
    }

    #[test]
    fn test_gimhae_dataset_from_city_centre() {
        let shelters = StaticDirectory::gimhae().into_shelters();
        let ranked = rank(&DEFAULT_ORIGIN, &shelters, DEFAULT_RANK_LIMIT);

        assert_eq!(ranked.len(), 8);
        assert_eq!(ranked[0].shelter.name, "김해시 체육관");
        assert_eq!(ranked[0].distance_km, 0.0);
        assert_eq!(ranked[7].shelter.name, "진영읍사무소");
        assert_eq!(ids(&ranked), vec![1, 3, 6, 8, 4, 7, 2, 5]);
    }

    #[test]
    fn test_gimhae_formatted_distances() {
        let shelters = StaticDirectory::gimhae().into_shelters();
        let ranked = rank(&DEFAULT_ORIGIN, &shelters, 3);

        let formatted: Vec<String> = ranked.iter().map(|r| r.formatted_distance()).collect();
        assert_eq!(formatted, vec!["0m", "218m", "535m"]);
    }

    #[test]
    fn test_limit_truncates() {
        let shelters = StaticDirectory::gimhae().into_shelters();
        let ranked = rank(&DEFAULT_ORIGIN, &shelters, 2);
        assert_eq!(ids(&ranked), vec![1, 3]);

        assert!(rank(&DEFAULT_ORIGIN, &shelters, 0).is_empty());
    }

    #[test]
    fn test_empty_candidates() {
        assert!(rank(&DEFAULT_ORIGIN, &[], DEFAULT_RANK_LIMIT).is_empty());
    }

    #[test]
    fn test_ties_keep_input_order() {
        let candidates = vec![
            shelter(30, 35.1, 129.0),
            shelter(10, 35.0, 129.0),
            shelter(20, 35.1, 129.0),
        ];
        let origin = GeoFix::new(35.1, 129.0).unwrap();

        let ranked = rank(&origin, &candidates, 8);

        assert_eq!(ids(&ranked), vec![30, 20, 10]);
    }

    #[test]
    fn test_rank_is_idempotent() {
        let shelters = StaticDirectory::gimhae().into_shelters();
        let origin = GeoFix::new(35.2, 128.85).unwrap();

        assert_eq!(rank(&origin, &shelters, 5), rank(&origin, &shelters, 5));
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(0.0), "0m");
        assert_eq!(format_distance(0.2184), "218m");
        assert_eq!(format_distance(0.9994), "999m");
        assert_eq!(format_distance(1.0), "1.0km");
        assert_eq!(format_distance(3.8025), "3.8km");
        assert_eq!(format_distance(14.7533), "14.8km");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn coord() -> impl Strategy<Value = (f64, f64)> {
            (-89.0f64..89.0, -179.0f64..179.0)
        }

        proptest! {
            #[test]
            fn prop_bounded_and_sorted(
                origin in coord(),
                points in prop::collection::vec(coord(), 0..30),
                limit in 0usize..12,
            ) {
                let origin = GeoFix::new(origin.0, origin.1).unwrap();
                let candidates: Vec<Shelter> = points
                    .iter()
                    .enumerate()
                    .map(|(i, (lat, lon))| shelter(i as u32, *lat, *lon))
                    .collect();

                let ranked = rank(&origin, &candidates, limit);

                prop_assert!(ranked.len() <= limit);
                prop_assert_eq!(ranked.len(), limit.min(candidates.len()));
                for pair in ranked.windows(2) {
                    prop_assert!(pair[0].distance_km <= pair[1].distance_km);
                }
                for entry in &ranked {
                    prop_assert!(entry.distance_km >= 0.0);
                }
            }

            #[test]
            fn prop_idempotent(
                origin in coord(),
                points in prop::collection::vec(coord(), 0..20),
            ) {
                let origin = GeoFix::new(origin.0, origin.1).unwrap();
                let candidates: Vec<Shelter> = points
                    .iter()
                    .enumerate()
                    .map(|(i, (lat, lon))| shelter(i as u32, *lat, *lon))
                    .collect();

                prop_assert_eq!(
                    rank(&origin, &candidates, DEFAULT_RANK_LIMIT),
                    rank(&origin, &candidates, DEFAULT_RANK_LIMIT)
                );
            }
        }
    }
}
