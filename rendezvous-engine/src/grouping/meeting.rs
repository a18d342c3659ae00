//! Meeting-point detection between two routes.
//!
//! Strategies are tried in priority order. Each one may propose a location;
//! a proposal too close to the destination or rejected by the time policy
//! falls through to the next strategy.

use serde::Serialize;
use tracing::trace;

use crate::domain::{Coordinate, RouteSegment, TravelMode};
use crate::geometry::{
    distance_meters, estimate_elapsed_seconds, find_all_shared_runs, find_common_waypoint,
    is_near_path, nearest_path_index,
};

use super::config::GroupingConfig;
use super::policy::{MeetingTiming, TimeCompatibility};

/// How a meeting point was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingSource {
    /// Both routes pass a stop with the same (normalized) name.
    CommonWaypoint,
    /// A transit stop lies next to the car's path.
    CarTransitProximity,
    /// The walking path comes close to the car's path.
    CarWalkProximity,
    /// The two paths travel the same road for a while.
    SharedRun,
}

impl MeetingSource {
    pub fn describe(self) -> &'static str {
        match self {
            MeetingSource::CommonWaypoint => "shared stop",
            MeetingSource::CarTransitProximity => "pickup at a stop on the driving route",
            MeetingSource::CarWalkProximity => "pickup where the walk meets the driving route",
            MeetingSource::SharedRun => "where the routes merge",
        }
    }
}

/// A validated place where two travelers can meet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeetingCandidate {
    pub location: Coordinate,
    /// Set when the location is a named stop.
    pub name: Option<String>,
    pub source: MeetingSource,
}

/// Find where the traveler on `guest` can join the traveler on `host`.
///
/// `destination` is the shared destination used by the proximity guard.
/// Returns `None` when no strategy yields an acceptable location.
pub fn find_meeting_point<T: TimeCompatibility + ?Sized>(
    host: &RouteSegment,
    guest: &RouteSegment,
    destination: Coordinate,
    config: &GroupingConfig,
    policy: &T,
) -> Option<MeetingCandidate> {
    if !host.is_routable() || !guest.is_routable() {
        return None;
    }

    type Strategy = fn(&RouteSegment, &RouteSegment, &GroupingConfig) -> Option<MeetingCandidate>;
    let strategies: [Strategy; 3] = [by_common_waypoint, by_mode_proximity, by_shared_run];

    for strategy in strategies {
        let Some(candidate) = strategy(host, guest, config) else {
            continue;
        };

        let to_destination = distance_meters(candidate.location, destination);
        if to_destination <= config.destination_guard_m {
            trace!(
                source = ?candidate.source,
                to_destination,
                "Meeting point too close to destination, trying next strategy"
            );
            continue;
        }

        let timing = meeting_timing(host, guest, candidate.location);
        if !policy.is_compatible(&timing) {
            trace!(source = ?candidate.source, "Meeting point rejected by time policy");
            continue;
        }

        return Some(candidate);
    }

    None
}

fn meeting_timing<'a>(
    host: &'a RouteSegment,
    guest: &'a RouteSegment,
    location: Coordinate,
) -> MeetingTiming<'a> {
    let elapsed = |route: &RouteSegment| {
        nearest_path_index(&route.points, location)
            .map(|idx| estimate_elapsed_seconds(&route.points, idx, route.distance_m, route.duration_s))
            .unwrap_or(0)
    };

    MeetingTiming {
        host_route: host,
        guest_route: guest,
        location,
        host_elapsed_s: elapsed(host),
        guest_elapsed_s: elapsed(guest),
    }
}

fn by_common_waypoint(
    host: &RouteSegment,
    guest: &RouteSegment,
    _config: &GroupingConfig,
) -> Option<MeetingCandidate> {
    find_common_waypoint(&host.waypoints, &guest.waypoints).map(|w| MeetingCandidate {
        location: w.location,
        name: Some(w.name.clone()),
        source: MeetingSource::CommonWaypoint,
    })
}

fn by_mode_proximity(
    host: &RouteSegment,
    guest: &RouteSegment,
    config: &GroupingConfig,
) -> Option<MeetingCandidate> {
    let radius = config.proximity_radius_m;
    match (host.mode, guest.mode) {
        (TravelMode::Car, TravelMode::Transit) => transit_stop_on_drive(host, guest, radius),
        (TravelMode::Transit, TravelMode::Car) => transit_stop_on_drive(guest, host, radius),
        (TravelMode::Car, TravelMode::Walk) => walk_meets_drive(host, guest, radius),
        (TravelMode::Walk, TravelMode::Car) => walk_meets_drive(guest, host, radius),
        _ => None,
    }
}

/// First stop of the transit route within `radius` of the driving path.
fn transit_stop_on_drive(
    car: &RouteSegment,
    transit: &RouteSegment,
    radius: f64,
) -> Option<MeetingCandidate> {
    transit
        .waypoints
        .iter()
        .find(|w| is_near_path(w.location, &car.points, radius))
        .map(|w| MeetingCandidate {
            location: w.location,
            name: Some(w.name.clone()),
            source: MeetingSource::CarTransitProximity,
        })
}

/// First walking point within `radius` of the driving path, snapped onto it.
fn walk_meets_drive(
    car: &RouteSegment,
    walk: &RouteSegment,
    radius: f64,
) -> Option<MeetingCandidate> {
    let touch = walk
        .points
        .iter()
        .find(|p| is_near_path(**p, &car.points, radius))?;
    let idx = nearest_path_index(&car.points, *touch)?;

    Some(MeetingCandidate {
        location: car.points[idx],
        name: None,
        source: MeetingSource::CarWalkProximity,
    })
}

fn by_shared_run(
    host: &RouteSegment,
    guest: &RouteSegment,
    config: &GroupingConfig,
) -> Option<MeetingCandidate> {
    let pairs = find_all_shared_runs(&[host.points.as_slice(), guest.points.as_slice()], &config.shared_runs);
    let run = pairs.first()?.runs.first()?;

    Some(MeetingCandidate {
        location: run.first_point(&host.points)?,
        name: None,
        source: MeetingSource::SharedRun,
    })
}
