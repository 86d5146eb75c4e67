//! Great-circle distance on a spherical Earth.

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres between two points given in decimal
/// degrees.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_degree_of_longitude_at_equator() {
        let d = haversine_km(0.0, 0.0, 0.0, 1.0);
        assert!((d - 111.2).abs() < 1.0, "got {d}");
    }

    #[test]
    fn test_same_point_is_zero() {
        assert_eq!(haversine_km(35.68, 139.69, 35.68, 139.69), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let a = haversine_km(-33.45, -70.66, -12.05, -77.04);
        let b = haversine_km(-12.05, -77.04, -33.45, -70.66);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn test_antimeridian() {
        // 179.9E to 179.9W is ~22 km at the equator, not ~40,000
        let d = haversine_km(0.0, 179.9, 0.0, -179.9);
        assert!(d < 25.0, "got {d}");
    }
}
