//! Greedy partition of travelers into converging groups.

use std::collections::{HashMap, VecDeque};

use serde::Serialize;
use tracing::debug;

use crate::domain::{Coordinate, RouteSegment, TravelMode, Traveler, TravelerId};

use super::config::GroupingConfig;
use super::meeting::{MeetingCandidate, find_meeting_point};
use super::policy::TimeCompatibility;

/// One member of a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupMember {
    pub id: TravelerId,
    pub mode: TravelMode,
}

impl GroupMember {
    fn of(traveler: &Traveler) -> Self {
        Self {
            id: traveler.id.clone(),
            mode: traveler.mode,
        }
    }
}

/// Travelers who will converge before the destination.
///
/// Members keep input order. A group of one with `routable == false` holds a
/// traveler for whom no usable route exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    members: Vec<GroupMember>,
    routable: bool,
}

impl Group {
    pub fn new(members: Vec<GroupMember>) -> Self {
        Self {
            members,
            routable: true,
        }
    }

    /// A singleton for a traveler without a usable route.
    pub fn unroutable(member: GroupMember) -> Self {
        Self {
            members: vec![member],
            routable: false,
        }
    }

    pub fn members(&self) -> &[GroupMember] {
        &self.members
    }

    pub fn ids(&self) -> impl Iterator<Item = &TravelerId> {
        self.members.iter().map(|m| &m.id)
    }

    pub fn contains(&self, id: &TravelerId) -> bool {
        self.members.iter().any(|m| &m.id == id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_singleton(&self) -> bool {
        self.members.len() == 1
    }

    pub fn is_routable(&self) -> bool {
        self.routable
    }
}

/// Look up a route that can take part in matching.
pub(crate) fn routable<'r>(
    routes: &'r HashMap<TravelerId, RouteSegment>,
    id: &TravelerId,
) -> Option<&'r RouteSegment> {
    routes.get(id).filter(|r| r.is_routable())
}

/// Group formation over one set of resolved routes.
pub struct GroupFormation<'a, T: TimeCompatibility + ?Sized> {
    config: &'a GroupingConfig,
    policy: &'a T,
    destination: Option<Coordinate>,
}

impl<'a, T: TimeCompatibility + ?Sized> GroupFormation<'a, T> {
    pub fn new(config: &'a GroupingConfig, policy: &'a T) -> Self {
        Self {
            config,
            policy,
            destination: None,
        }
    }

    /// Guard meeting points against this destination. Without one, each host
    /// route's final point is used.
    pub fn with_destination(mut self, destination: Coordinate) -> Self {
        self.destination = Some(destination);
        self
    }

    /// Find where `guest` can join `host`, applying the configured guard and
    /// time policy.
    pub fn meeting_point(
        &self,
        host: &RouteSegment,
        guest: &RouteSegment,
    ) -> Option<MeetingCandidate> {
        let destination = self.destination.or_else(|| host.end_point())?;
        find_meeting_point(host, guest, destination, self.config, self.policy)
    }

    /// Partition travelers into groups that can converge.
    ///
    /// The first unassigned traveler becomes the pivot, every other
    /// unassigned traveler who can meet the pivot joins its group, and the
    /// process repeats until nobody is left. Travelers without a routable
    /// route end up alone in an unroutable group.
    pub fn partition(
        &self,
        travelers: &[Traveler],
        routes: &HashMap<TravelerId, RouteSegment>,
    ) -> Vec<Group> {
        let mut pool: VecDeque<&Traveler> = travelers.iter().collect();
        let mut groups = Vec::new();

        while let Some(pivot) = pool.pop_front() {
            let Some(pivot_route) = routable(routes, &pivot.id) else {
                debug!(traveler = %pivot.id, "No usable route, closing singleton group");
                groups.push(Group::unroutable(GroupMember::of(pivot)));
                continue;
            };

            let mut members = vec![GroupMember::of(pivot)];

            pool.retain(|candidate| {
                let Some(candidate_route) = routable(routes, &candidate.id) else {
                    return true;
                };

                match self.meeting_point(pivot_route, candidate_route) {
                    Some(meeting) => {
                        debug!(
                            pivot = %pivot.id,
                            traveler = %candidate.id,
                            source = ?meeting.source,
                            "Traveler joins group"
                        );
                        members.push(GroupMember::of(candidate));
                        false
                    }
                    None => true,
                }
            });

            groups.push(Group::new(members));
        }

        debug!(
            travelers = travelers.len(),
            groups = groups.len(),
            "Partition complete"
        );

        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Color, NamedWaypoint};
    use crate::grouping::AlwaysCompatible;

    const STEP: f64 = 0.0004;

    fn c(lat: f64, lon: f64) -> Coordinate {
        Coordinate { lat, lon }
    }

    fn id(s: &str) -> TravelerId {
        TravelerId::parse(s).unwrap()
    }

    fn traveler(name: &str, mode: TravelMode) -> Traveler {
        Traveler::new(id(name), name, Some(c(37.5, 127.0)), mode, Color::parse("#112233").unwrap())
    }

    fn route(mode: TravelMode, lon: f64, stops: &[&str]) -> RouteSegment {
        let points: Vec<Coordinate> = (0..60).map(|i| c(37.5 + i as f64 * STEP, lon)).collect();
        let waypoints = stops
            .iter()
            .enumerate()
            .map(|(i, name)| NamedWaypoint::new(*name, c(37.5 + i as f64 * 0.005, lon)))
            .collect();
        RouteSegment {
            mode,
            distance_m: crate::geometry::path_length_meters(&points),
            points,
            duration_s: 2400,
            fare: 0,
            waypoints,
            legs: vec![],
        }
    }

    fn ids(group: &Group) -> Vec<&str> {
        group.ids().map(|i| i.as_str()).collect()
    }

    #[test]
    fn shared_stop_groups_transit_riders() {
        // Three transit riders on parallel lines far apart; A and B share a stop
        let travelers = vec![
            traveler("a", TravelMode::Transit),
            traveler("b", TravelMode::Transit),
            traveler("c", TravelMode::Transit),
        ];
        let routes = HashMap::from([
            (id("a"), route(TravelMode::Transit, 127.0, &["Riverside", "Central Station"])),
            (id("b"), route(TravelMode::Transit, 127.05, &["Central (Line 2)", "Market"])),
            (id("c"), route(TravelMode::Transit, 127.1, &["Harbor", "Airport"])),
        ]);

        let config = GroupingConfig::default();
        let groups = GroupFormation::new(&config, &AlwaysCompatible).partition(&travelers, &routes);

        assert_eq!(groups.len(), 2);
        assert_eq!(ids(&groups[0]), vec!["a", "b"]);
        assert_eq!(ids(&groups[1]), vec!["c"]);
        assert!(groups.iter().all(Group::is_routable));
    }

    #[test]
    fn missing_route_forms_unroutable_singleton() {
        let travelers = vec![
            traveler("a", TravelMode::Car),
            traveler("d", TravelMode::Walk),
            traveler("e", TravelMode::Car),
        ];
        let routes = HashMap::from([
            (id("a"), route(TravelMode::Car, 127.0, &[])),
            (id("d"), RouteSegment::empty(TravelMode::Walk)),
            (id("e"), route(TravelMode::Car, 127.0, &[])),
        ]);

        let config = GroupingConfig::default();
        let groups = GroupFormation::new(&config, &AlwaysCompatible).partition(&travelers, &routes);

        assert_eq!(groups.len(), 2);
        assert_eq!(ids(&groups[0]), vec!["a", "e"]);
        assert_eq!(ids(&groups[1]), vec!["d"]);
        assert!(!groups[1].is_routable());
    }

    #[test]
    fn traveler_absent_from_route_map_is_unroutable() {
        let travelers = vec![traveler("a", TravelMode::Walk)];
        let config = GroupingConfig::default();
        let groups = GroupFormation::new(&config, &AlwaysCompatible).partition(&travelers, &HashMap::new());

        assert_eq!(groups.len(), 1);
        assert!(!groups[0].is_routable());
        assert!(groups[0].contains(&id("a")));
    }

    #[test]
    fn requested_destination_guards_meeting_points() {
        let travelers = vec![traveler("a", TravelMode::Car), traveler("b", TravelMode::Car)];
        let routes = HashMap::from([
            (id("a"), route(TravelMode::Car, 127.0, &[])),
            (id("b"), route(TravelMode::Car, 127.0, &[])),
        ]);
        let config = GroupingConfig::default();

        // Both routes merge from their first point, right at this destination
        let groups = GroupFormation::new(&config, &AlwaysCompatible)
            .with_destination(c(37.5, 127.0))
            .partition(&travelers, &routes);
        assert_eq!(groups.len(), 2);

        // The requested destination wins over the host's end point
        let huge_guard = config.clone().with_destination_guard(10_000.0);
        let groups = GroupFormation::new(&huge_guard, &AlwaysCompatible)
            .with_destination(c(10.0, 10.0))
            .partition(&travelers, &routes);
        assert_eq!(groups.len(), 1);

        // Without one, the host's end point guards
        let groups = GroupFormation::new(&huge_guard, &AlwaysCompatible).partition(&travelers, &routes);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn empty_input() {
        let config = GroupingConfig::default();
        let groups = GroupFormation::new(&config, &AlwaysCompatible).partition(&[], &HashMap::new());
        assert!(groups.is_empty());
    }
}
