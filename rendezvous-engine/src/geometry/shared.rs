//! Shared-run detection between two paths.
//!
//! Two routes that merely cross share one or two nearby points. Two routes
//! that use the same road share a run of consecutive points that stay close
//! together AND head the same way. Only the latter is a place where one
//! traveler could join another.

use serde::Serialize;

use crate::domain::Coordinate;

use super::distance::{angle_difference_degrees, bearing_degrees, distance_meters};

/// Tolerances for shared-run detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SharedRunConfig {
    /// Maximum distance between matched points, metres.
    pub tolerance_m: f64,

    /// Maximum heading difference between matched steps, degrees.
    pub angle_tolerance_deg: f64,

    /// How many following points of the second path are searched when
    /// extending a run.
    pub lookahead: usize,

    /// Runs shorter than this many points are discarded as crossings.
    pub min_run_points: usize,
}

impl SharedRunConfig {
    pub fn new(
        tolerance_m: f64,
        angle_tolerance_deg: f64,
        lookahead: usize,
        min_run_points: usize,
    ) -> Self {
        Self {
            tolerance_m,
            angle_tolerance_deg,
            lookahead,
            min_run_points,
        }
    }
}

impl Default for SharedRunConfig {
    fn default() -> Self {
        Self {
            tolerance_m: 30.0,
            angle_tolerance_deg: 45.0,
            lookahead: 5,
            min_run_points: 6,
        }
    }
}

/// A maximal stretch where two paths travel together.
///
/// All indices are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SharedRun {
    pub start_a: usize,
    pub end_a: usize,
    pub start_b: usize,
    pub end_b: usize,
}

impl SharedRun {
    /// Number of points of the first path covered by the run.
    pub fn point_count(&self) -> usize {
        self.end_a - self.start_a + 1
    }

    /// The run's first point on the first path.
    pub fn first_point(&self, path_a: &[Coordinate]) -> Option<Coordinate> {
        path_a.get(self.start_a).copied()
    }
}

/// Shared runs found between one pair of paths.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairRuns {
    pub first: usize,
    pub second: usize,
    pub runs: Vec<SharedRun>,
}

/// Find every stretch where `path_a` and `path_b` travel together.
///
/// `path_a` is scanned in order. A run starts at the first point of `path_a`
/// that has a point of `path_b` within tolerance (the closest such point is
/// taken). The run then grows one `path_a` step at a time: among the next
/// `lookahead` points of `path_b` after the current match, the point closest
/// to the next `path_a` point is chosen; the run stops as soon as that point is
/// out of tolerance or its heading from the previous match disagrees with
/// `path_a`'s heading. Runs spanning fewer than `min_run_points` are dropped,
/// and scanning resumes after the run.
pub fn find_shared_runs(
    path_a: &[Coordinate],
    path_b: &[Coordinate],
    config: &SharedRunConfig,
) -> Vec<SharedRun> {
    let mut runs = Vec::new();
    if path_a.is_empty() || path_b.is_empty() {
        return runs;
    }

    let mut i = 0;
    while i < path_a.len() {
        let Some(start_b) = closest_within(path_b, 0, path_b.len(), path_a[i], config.tolerance_m)
        else {
            i += 1;
            continue;
        };

        let (end_a, end_b) = extend_run(path_a, path_b, i, start_b, config);

        if end_a - i + 1 >= config.min_run_points {
            runs.push(SharedRun {
                start_a: i,
                end_a,
                start_b,
                end_b,
            });
        }

        i = end_a + 1;
    }

    runs
}

/// Run shared-run detection over every unordered pair of paths.
///
/// Only pairs with at least one run are returned, ordered by `(first, second)`.
pub fn find_all_shared_runs(paths: &[&[Coordinate]], config: &SharedRunConfig) -> Vec<PairRuns> {
    let mut pairs = Vec::new();
    for first in 0..paths.len() {
        for second in (first + 1)..paths.len() {
            let runs = find_shared_runs(paths[first], paths[second], config);
            if !runs.is_empty() {
                pairs.push(PairRuns {
                    first,
                    second,
                    runs,
                });
            }
        }
    }
    pairs
}

/// Grow a run from `(a, b)`, returning the last matched indices.
fn extend_run(
    path_a: &[Coordinate],
    path_b: &[Coordinate],
    mut a: usize,
    mut b: usize,
    config: &SharedRunConfig,
) -> (usize, usize) {
    while a + 1 < path_a.len() {
        let target = path_a[a + 1];
        let window_end = (b + 1 + config.lookahead).min(path_b.len());

        let Some(next_b) = closest_in(path_b, b + 1, window_end, target) else {
            break;
        };

        if distance_meters(path_b[next_b], target) > config.tolerance_m {
            break;
        }

        let heading_a = bearing_degrees(path_a[a], target);
        let heading_b = bearing_degrees(path_b[b], path_b[next_b]);
        if angle_difference_degrees(heading_a, heading_b) > config.angle_tolerance_deg {
            break;
        }

        a += 1;
        b = next_b;
    }
    (a, b)
}

/// Closest point to `target` in `path[from..to]`.
fn closest_in(path: &[Coordinate], from: usize, to: usize, target: Coordinate) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for j in from..to {
        let d = distance_meters(path[j], target);
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((j, d));
        }
    }
    best.map(|(j, _)| j)
}

/// Closest point to `target` in `path[from..to]`, if within `radius_m`.
fn closest_within(
    path: &[Coordinate],
    from: usize,
    to: usize,
    target: Coordinate,
    radius_m: f64,
) -> Option<usize> {
    closest_in(path, from, to, target).filter(|&j| distance_meters(path[j], target) <= radius_m)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Roughly 22 m between consecutive points.
    const STEP: f64 = 0.0002;

    fn c(lat: f64, lon: f64) -> Coordinate {
        Coordinate { lat, lon }
    }

    fn northbound(n: usize, lon: f64) -> Vec<Coordinate> {
        (0..n).map(|i| c(37.5 + i as f64 * STEP, lon)).collect()
    }

    #[test]
    fn identical_paths_form_one_run() {
        let path = northbound(10, 127.0);
        let runs = find_shared_runs(&path, &path, &SharedRunConfig::default());
        assert_eq!(
            runs,
            vec![SharedRun {
                start_a: 0,
                end_a: 9,
                start_b: 0,
                end_b: 9
            }]
        );
        assert_eq!(runs[0].point_count(), 10);
        assert_eq!(runs[0].first_point(&path), Some(path[0]));
    }

    #[test]
    fn parallel_offset_within_tolerance_is_shared() {
        let a = northbound(12, 127.0);
        // About 9 m east
        let b = northbound(12, 127.0001);
        let runs = find_shared_runs(&a, &b, &SharedRunConfig::default());
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].point_count(), 12);
    }

    #[test]
    fn perpendicular_crossing_is_not_shared() {
        let a = northbound(11, 127.0);
        // Eastbound, crossing a at its midpoint
        let b: Vec<Coordinate> = (0..11)
            .map(|i| c(37.5 + 5.0 * STEP, 127.0 - 5.0 * STEP + i as f64 * STEP))
            .collect();
        assert!(find_shared_runs(&a, &b, &SharedRunConfig::default()).is_empty());
    }

    #[test]
    fn opposite_direction_is_not_shared() {
        let a = northbound(10, 127.0);
        let mut b = a.clone();
        b.reverse();
        assert!(find_shared_runs(&a, &b, &SharedRunConfig::default()).is_empty());
    }

    #[test]
    fn short_overlap_is_dropped() {
        let a = northbound(5, 127.0);
        assert!(find_shared_runs(&a, &a, &SharedRunConfig::default()).is_empty());

        let loose = SharedRunConfig {
            min_run_points: 5,
            ..SharedRunConfig::default()
        };
        assert_eq!(find_shared_runs(&a, &a, &loose).len(), 1);
    }

    #[test]
    fn run_starts_where_paths_merge() {
        // Points 44 m apart so the point before the merge is out of tolerance.
        // b approaches from the east, then follows a from index 4 onward
        let a: Vec<Coordinate> = (0..14).map(|i| c(37.5 + i as f64 * 0.0004, 127.0)).collect();
        let mut b: Vec<Coordinate> = (0..4)
            .map(|i| c(a[4].lat, 127.004 - i as f64 * 0.001))
            .collect();
        b.extend(a[4..].iter().copied());

        let runs = find_shared_runs(&a, &b, &SharedRunConfig::default());
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].start_a, 4);
        assert_eq!(runs[0].end_a, 13);
        assert_eq!(runs[0].start_b, 4);
    }

    #[test]
    fn diverging_paths_end_the_run() {
        let a = northbound(20, 127.0);
        // Shares the first 8 points, then turns east
        let mut b = a[..8].to_vec();
        let turn = b[7];
        b.extend((1..10).map(|i| c(turn.lat, turn.lon + i as f64 * STEP)));

        let runs = find_shared_runs(&a, &b, &SharedRunConfig::default());
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].start_a, 0);
        assert_eq!(runs[0].end_a, 7);
    }

    #[test]
    fn empty_inputs() {
        let a = northbound(10, 127.0);
        assert!(find_shared_runs(&a, &[], &SharedRunConfig::default()).is_empty());
        assert!(find_shared_runs(&[], &a, &SharedRunConfig::default()).is_empty());
    }

    #[test]
    fn all_pairs() {
        let a = northbound(10, 127.0);
        let b = northbound(10, 127.0001);
        let far = northbound(10, 127.1);

        let pairs = find_all_shared_runs(&[a.as_slice(), far.as_slice(), b.as_slice()], &SharedRunConfig::default());
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].first, 0);
        assert_eq!(pairs[0].second, 2);
        assert_eq!(pairs[0].runs.len(), 1);
    }
}
