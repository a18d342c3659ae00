//! Great-circle distance and bearing.

use crate::domain::Coordinate;

/// Mean Earth radius used for all distance calculations, metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine great-circle distance in metres.
///
/// ```
/// use rendezvous_engine::domain::Coordinate;
/// use rendezvous_engine::geometry::distance_meters;
///
/// let a = Coordinate::new(37.5547, 126.9707).unwrap(); // Seoul Station
/// let b = Coordinate::new(37.5663, 126.9779).unwrap(); // City Hall
/// let d = distance_meters(a, b);
/// assert!((d - 1440.0).abs() < 50.0);
/// assert_eq!(distance_meters(a, a), 0.0);
/// ```
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    if a == b {
        return 0.0;
    }

    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat * 0.5).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).max(0.0).sqrt());
    EARTH_RADIUS_M * c
}

/// Initial bearing from `p` to `q`, degrees clockwise from north in `[0, 360)`.
pub fn bearing_degrees(p: Coordinate, q: Coordinate) -> f64 {
    let lat1 = p.lat.to_radians();
    let lat2 = q.lat.to_radians();
    let d_lon = (q.lon - p.lon).to_radians();

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

    let bearing = y.atan2(x).to_degrees().rem_euclid(360.0);
    // rem_euclid of a tiny negative rounds up to exactly 360.0
    if bearing >= 360.0 { 0.0 } else { bearing }
}

/// Smallest angle between two bearings, in `[0, 180]`.
pub fn angle_difference_degrees(a: f64, b: f64) -> f64 {
    let diff = (a - b).rem_euclid(360.0);
    if diff > 180.0 { 360.0 - diff } else { diff }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn coordinate() -> impl Strategy<Value = Coordinate> {
        (-89.0f64..89.0, -179.0f64..179.0).prop_map(|(lat, lon)| Coordinate { lat, lon })
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(a in coordinate(), b in coordinate()) {
            let ab = distance_meters(a, b);
            let ba = distance_meters(b, a);
            prop_assert!((ab - ba).abs() < 1e-6, "{} vs {}", ab, ba);
        }

        #[test]
        fn distance_to_self_is_zero(a in coordinate()) {
            prop_assert_eq!(distance_meters(a, a), 0.0);
        }

        #[test]
        fn distance_is_non_negative(a in coordinate(), b in coordinate()) {
            prop_assert!(distance_meters(a, b) >= 0.0);
        }

        #[test]
        fn bearing_in_range(a in coordinate(), b in coordinate()) {
            let bearing = bearing_degrees(a, b);
            prop_assert!((0.0..360.0).contains(&bearing), "bearing {}", bearing);
        }

        #[test]
        fn angle_difference_in_range(a in -720.0f64..720.0, b in -720.0f64..720.0) {
            let diff = angle_difference_degrees(a, b);
            prop_assert!((0.0..=180.0).contains(&diff), "diff {}", diff);
            let back = angle_difference_degrees(b, a);
            prop_assert!((diff - back).abs() < 1e-9);
        }
    }
}
