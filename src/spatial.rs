//! Great-circle distance used to post-filter range scan results.

use geo::Point;

/// Earth's semi-major axis (WGS 84) in kilometers.
pub const EARTH_SEMI_MAJOR_AXIS_KM: f64 = 6378.137;

/// Half of Earth's equatorial circumference in kilometers.
pub const EARTH_HALF_CIRCUMFERENCE_KM: f64 = std::f64::consts::PI * EARTH_SEMI_MAJOR_AXIS_KM;

/// Great-circle distance between two latitude/longitude points in kilometers.
///
/// Uses a spherical Earth with the WGS 84 semi-major axis as radius, so it
/// reads slightly larger than `geo::Haversine`, which uses the mean radius.
///
/// # Examples
///
/// ```rust
/// use zrange::spatial::haversine;
///
/// let d = haversine(40.7128, -74.0060, 34.0522, -118.2437);
/// assert!(d > 3_900.0 && d < 4_000.0);
/// assert_eq!(haversine(1.0, 2.0, 1.0, 2.0), 0.0);
/// ```
pub fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_phi = (lat2 - lat1).to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let a = hav(delta_phi) + phi1.cos() * phi2.cos() * hav(delta_lambda);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    c * EARTH_SEMI_MAJOR_AXIS_KM
}

/// [`haversine`] between two `geo::Point`s (x = longitude, y = latitude).
pub fn haversine_points(a: &Point, b: &Point) -> f64 {
    haversine(a.y(), a.x(), b.y(), b.x())
}

#[inline]
fn hav(x: f64) -> f64 {
    (x / 2.0).sin().powi(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Distance, Haversine};

    #[test]
    fn test_zero_distance() {
        assert_eq!(haversine(0.0, 0.0, 0.0, 0.0), 0.0);
        assert_eq!(haversine(-33.8688, 151.2093, -33.8688, 151.2093), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let pairs = [
            ((40.7128, -74.0060), (34.0522, -118.2437)),
            ((-90.0, -180.0), (90.0, 180.0)),
            ((51.5074, -0.1278), (-33.8688, 151.2093)),
        ];
        for ((lat1, lon1), (lat2, lon2)) in pairs {
            let forward = haversine(lat1, lon1, lat2, lon2);
            let backward = haversine(lat2, lon2, lat1, lon1);
            assert!((forward - backward).abs() < 1e-9);
        }
    }

    #[test]
    fn test_quarter_meridian() {
        let d = haversine(0.0, 0.0, 90.0, 0.0);
        assert!((d - EARTH_HALF_CIRCUMFERENCE_KM / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_agrees_with_geo_up_to_radius() {
        let nyc = Point::new(-74.0060, 40.7128);
        let la = Point::new(-118.2437, 34.0522);

        let ours = haversine_points(&nyc, &la);
        let geo_km = Haversine.distance(nyc, la) / 1000.0;
        let scaled = geo_km * EARTH_SEMI_MAJOR_AXIS_KM / 6371.0088;

        assert!((ours - scaled).abs() / ours < 1e-6);
    }
}
