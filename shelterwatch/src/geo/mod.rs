//! Geographic primitives.
//!
//! Provides the [`GeoFix`] value produced by location sources and the
//! great-circle distance used by the shelter ranking engine.

mod types;

pub use types::{CoordError, GeoFix, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};

/// Mean Earth radius used by the haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Gimhae city centre, used as the current location before any fix arrives.
pub const DEFAULT_ORIGIN: GeoFix = GeoFix {
    latitude: 35.233596,
    longitude: 128.889544,
};

/// Great-circle distance between two fixes in kilometres.
///
/// Assumes a spherical Earth of radius [`EARTH_RADIUS_KM`]:
///
/// ```text
/// a = sin²(Δlat/2) + cos(lat1)·cos(lat2)·sin²(Δlon/2)
/// d = 2 · R · atan2(√a, √(1-a))
/// ```
#[inline]
pub fn haversine_km(from: &GeoFix, to: &GeoFix) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let dlat = (to.latitude - from.latitude).to_radians();
    let dlon = (to.longitude - from.longitude).to_radians();

    let half_dlat = (dlat / 2.0).sin();
    let half_dlon = (dlon / 2.0).sin();
    let a = (half_dlat * half_dlat + lat1.cos() * lat2.cos() * half_dlon * half_dlon).min(1.0);

    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Great-circle distance between two fixes in metres.
#[inline]
pub fn haversine_m(from: &GeoFix, to: &GeoFix) -> f64 {
    haversine_km(from, to) * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_points_are_zero_apart() {
        assert_eq!(haversine_km(&DEFAULT_ORIGIN, &DEFAULT_ORIGIN), 0.0);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        // One degree along a meridian is R·π/180 ≈ 111.19 km
        let a = GeoFix::new(0.0, 0.0).unwrap();
        let b = GeoFix::new(1.0, 0.0).unwrap();
        let d = haversine_km(&a, &b);
        assert!((d - 111.195).abs() < 0.01, "got {} km", d);
    }

    #[test]
    fn test_gimhae_to_jinyeong() {
        // 진영읍사무소 sits roughly 15 km north-west of the city centre
        let jinyeong = GeoFix::new(35.310245, 128.756892).unwrap();
        let d = haversine_km(&DEFAULT_ORIGIN, &jinyeong);
        assert!(d > 10.0 && d < 20.0, "got {} km", d);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = GeoFix::new(35.0, 129.0).unwrap();
        let b = GeoFix::new(35.190156, 128.807892).unwrap();
        assert!((haversine_km(&a, &b) - haversine_km(&b, &a)).abs() < 1e-9);
    }

    #[test]
    fn test_metres_scale() {
        let a = GeoFix::new(35.0, 129.0).unwrap();
        let b = GeoFix::new(35.001, 129.0).unwrap();
        assert!((haversine_m(&a, &b) - haversine_km(&a, &b) * 1000.0).abs() < 1e-9);
        assert!(haversine_m(&a, &b) > 100.0 && haversine_m(&a, &b) < 120.0);
    }

    #[test]
    fn test_antipodal_points() {
        let a = GeoFix::new(0.0, 0.0).unwrap();
        let b = GeoFix::new(0.0, 180.0).unwrap();
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((haversine_km(&a, &b) - half_circumference).abs() < 0.001);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_distance_non_negative_and_bounded(
                lat1 in -90.0..=90.0_f64,
                lon1 in -180.0..=180.0_f64,
                lat2 in -90.0..=90.0_f64,
                lon2 in -180.0..=180.0_f64,
            ) {
                let a = GeoFix::new(lat1, lon1)?;
                let b = GeoFix::new(lat2, lon2)?;
                let d = haversine_km(&a, &b);

                prop_assert!(d >= 0.0);
                prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
            }
        }
    }
}
