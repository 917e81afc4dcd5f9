//! Great-circle distance helpers.

use serde::Serialize;

/// Mean Earth radius used by the haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPosition {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to another position in kilometres.
    pub fn distance_to(&self, other: &Self) -> f64 {
        haversine_km(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

/// Haversine distance between two points given in degrees, in kilometres.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_for_identical_points() {
        assert_eq!(haversine_km(5.6, -0.17, 5.6, -0.17), 0.0);
    }

    #[test]
    fn one_degree_of_longitude_on_equator() {
        let d = haversine_km(0.0, 0.0, 0.0, 1.0);
        assert!((d - 111.195).abs() < 0.01, "got {d}");
    }

    #[test]
    fn london_to_new_york() {
        // Same coordinates as the classic textbook example (east-positive longitudes).
        let d = haversine_km(51.5007, 0.1246, 40.6892, 74.0445);
        assert!((d - 5574.84).abs() < 0.5, "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = GeoPosition::new(5.605, -0.167);
        let b = GeoPosition::new(30.578, 103.947);
        assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-9);
    }
}
