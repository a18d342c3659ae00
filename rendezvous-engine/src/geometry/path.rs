//! Brute-force queries over ordered point lists.
//!
//! Paths here are a few hundred points at most, so linear scans are used
//! throughout instead of a spatial index.

use crate::domain::Coordinate;

use super::distance::distance_meters;

/// Returns true if any point of `path` lies within `radius_m` of `point`.
pub fn is_near_path(point: Coordinate, path: &[Coordinate], radius_m: f64) -> bool {
    path.iter().any(|p| distance_meters(point, *p) <= radius_m)
}

/// Index of the path point closest to `target`.
///
/// Returns `None` for an empty path. Ties go to the earliest index.
pub fn nearest_path_index(path: &[Coordinate], target: Coordinate) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, point) in path.iter().enumerate() {
        let d = distance_meters(*point, target);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

/// Sum of point-to-point distances along a path, metres.
pub fn path_length_meters(path: &[Coordinate]) -> f64 {
    path.windows(2).map(|w| distance_meters(w[0], w[1])).sum()
}

/// Estimate the seconds needed to travel from the path start to `target_index`.
///
/// Providers only report a route's total duration, so the time to an
/// intermediate point is interpolated from the distance covered, assuming a
/// uniform speed along the whole route.
///
/// - Empty path or index 0: `0`
/// - Index at or past the last point: `total_duration_s`
/// - Otherwise: covered distance over `total_distance_m`, clamped to
///   `[0, 1]`, times `total_duration_s`, truncated to whole seconds
///
/// ```
/// use rendezvous_engine::domain::Coordinate;
/// use rendezvous_engine::geometry::{estimate_elapsed_seconds, path_length_meters};
///
/// let path: Vec<Coordinate> = (0..5)
///     .map(|i| Coordinate::new(37.0 + i as f64 * 0.001, 127.0).unwrap())
///     .collect();
/// let length = path_length_meters(&path);
///
/// assert_eq!(estimate_elapsed_seconds(&path, 0, length, 401), 0);
/// assert_eq!(estimate_elapsed_seconds(&path, 2, length, 401), 200);
/// assert_eq!(estimate_elapsed_seconds(&path, 4, length, 401), 401);
/// ```
pub fn estimate_elapsed_seconds(
    path: &[Coordinate],
    target_index: usize,
    total_distance_m: f64,
    total_duration_s: i64,
) -> i64 {
    if path.is_empty() || target_index == 0 {
        return 0;
    }
    if target_index >= path.len() - 1 {
        return total_duration_s;
    }
    if total_distance_m.is_nan() || total_distance_m <= 0.0 {
        return 0;
    }

    let covered = path_length_meters(&path[..=target_index]);
    let ratio = (covered / total_distance_m).clamp(0.0, 1.0);
    (ratio * total_duration_s as f64) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(lat: f64, lon: f64) -> Coordinate {
        Coordinate { lat, lon }
    }

    fn straight_path(n: usize) -> Vec<Coordinate> {
        (0..n).map(|i| c(37.0 + i as f64 * 0.001, 127.0)).collect()
    }

    #[test]
    fn near_path_radius_is_inclusive() {
        let path = vec![c(37.0, 127.0)];
        let target = c(37.0003, 127.0);
        let d = distance_meters(path[0], target);
        assert!(is_near_path(target, &path, d));
        assert!(!is_near_path(target, &path, d - 0.01));
    }

    #[test]
    fn near_empty_path_is_false() {
        assert!(!is_near_path(c(0.0, 0.0), &[], 1_000_000.0));
    }

    #[test]
    fn nearest_index_empty_is_none() {
        assert_eq!(nearest_path_index(&[], c(0.0, 0.0)), None);
    }

    #[test]
    fn nearest_index_single_point() {
        assert_eq!(nearest_path_index(&[c(10.0, 10.0)], c(0.0, 0.0)), Some(0));
    }

    #[test]
    fn nearest_index_ties_take_first() {
        let path = vec![c(37.001, 127.0), c(37.0, 127.0), c(37.0, 127.0)];
        assert_eq!(nearest_path_index(&path, c(37.0, 127.0)), Some(1));
    }

    #[test]
    fn elapsed_endpoints() {
        let path = straight_path(10);
        let length = path_length_meters(&path);
        assert_eq!(estimate_elapsed_seconds(&path, 0, length, 900), 0);
        assert_eq!(estimate_elapsed_seconds(&path, 9, length, 900), 900);
        assert_eq!(estimate_elapsed_seconds(&path, 50, length, 900), 900);
        assert_eq!(estimate_elapsed_seconds(&[], 3, length, 900), 0);
    }

    #[test]
    fn elapsed_clamps_when_provider_distance_is_short() {
        let path = straight_path(10);
        // Provider claims a shorter distance than the geometry covers
        assert_eq!(estimate_elapsed_seconds(&path, 8, 10.0, 900), 900);
    }

    #[test]
    fn elapsed_zero_distance_is_zero() {
        let path = straight_path(10);
        assert_eq!(estimate_elapsed_seconds(&path, 5, 0.0, 900), 0);
    }

    #[test]
    fn elapsed_truncates() {
        let path = straight_path(4);
        let length = path_length_meters(&path);
        // One third of 100 seconds
        assert_eq!(estimate_elapsed_seconds(&path, 1, length, 100), 33);
    }
}
