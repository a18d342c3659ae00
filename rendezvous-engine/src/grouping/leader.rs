//! Leader selection within a group.

use std::collections::HashMap;

use crate::domain::{RouteSegment, TravelMode, TravelerId};

use super::partition::{Group, routable};

/// Pick the traveler the rest of the group converges on.
///
/// The first member travelling by car leads, since only a car can pick
/// others up. Without a car the member with the shortest routable route
/// leads, earlier members winning ties. Returns `None` for an empty group
/// or one where nobody has a usable route.
pub fn select_leader(group: &Group, routes: &HashMap<TravelerId, RouteSegment>) -> Option<TravelerId> {
    if let Some(driver) = group.members().iter().find(|m| m.mode == TravelMode::Car) {
        return Some(driver.id.clone());
    }

    let mut best: Option<(&TravelerId, f64)> = None;
    for member in group.members() {
        let Some(route) = routable(routes, &member.id) else {
            continue;
        };
        if best.is_none_or(|(_, distance)| route.distance_m < distance) {
            best = Some((&member.id, route.distance_m));
        }
    }

    best.map(|(id, _)| id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;
    use crate::grouping::GroupMember;

    fn id(s: &str) -> TravelerId {
        TravelerId::parse(s).unwrap()
    }

    fn member(s: &str, mode: TravelMode) -> GroupMember {
        GroupMember { id: id(s), mode }
    }

    fn route(mode: TravelMode, distance_m: f64) -> RouteSegment {
        RouteSegment {
            mode,
            points: vec![Coordinate { lat: 37.5, lon: 127.0 }, Coordinate { lat: 37.6, lon: 127.0 }],
            distance_m,
            duration_s: 1200,
            fare: 0,
            waypoints: vec![],
            legs: vec![],
        }
    }

    #[test]
    fn car_leads_regardless_of_distance() {
        let group = Group::new(vec![
            member("walker", TravelMode::Walk),
            member("driver", TravelMode::Car),
            member("rider", TravelMode::Transit),
        ]);
        let routes = HashMap::from([
            (id("walker"), route(TravelMode::Walk, 1_000.0)),
            (id("driver"), route(TravelMode::Car, 20_000.0)),
            (id("rider"), route(TravelMode::Transit, 5_000.0)),
        ]);
        assert_eq!(select_leader(&group, &routes), Some(id("driver")));
    }

    #[test]
    fn first_car_wins_between_drivers() {
        let group = Group::new(vec![member("d1", TravelMode::Car), member("d2", TravelMode::Car)]);
        let routes = HashMap::from([
            (id("d1"), route(TravelMode::Car, 9_000.0)),
            (id("d2"), route(TravelMode::Car, 3_000.0)),
        ]);
        assert_eq!(select_leader(&group, &routes), Some(id("d1")));
    }

    #[test]
    fn shortest_route_without_car() {
        let group = Group::new(vec![
            member("a", TravelMode::Transit),
            member("b", TravelMode::Transit),
            member("c", TravelMode::Walk),
        ]);
        let routes = HashMap::from([
            (id("a"), route(TravelMode::Transit, 8_000.0)),
            (id("b"), route(TravelMode::Transit, 4_000.0)),
            (id("c"), route(TravelMode::Walk, 4_000.0)),
        ]);
        assert_eq!(select_leader(&group, &routes), Some(id("b")));
    }

    #[test]
    fn unroutable_members_are_skipped() {
        let group = Group::new(vec![member("a", TravelMode::Walk), member("b", TravelMode::Walk)]);
        let routes = HashMap::from([
            (id("a"), RouteSegment::empty(TravelMode::Walk)),
            (id("b"), route(TravelMode::Walk, 9_000.0)),
        ]);
        assert_eq!(select_leader(&group, &routes), Some(id("b")));
    }

    #[test]
    fn nobody_to_lead() {
        assert_eq!(select_leader(&Group::new(vec![]), &HashMap::new()), None);

        let group = Group::new(vec![member("a", TravelMode::Transit)]);
        assert_eq!(select_leader(&group, &HashMap::new()), None);
    }

    #[test]
    fn selection_is_deterministic() {
        let group = Group::new(vec![member("x", TravelMode::Walk), member("y", TravelMode::Walk)]);
        let routes = HashMap::from([
            (id("x"), route(TravelMode::Walk, 2_000.0)),
            (id("y"), route(TravelMode::Walk, 2_000.0)),
        ]);
        for _ in 0..10 {
            assert_eq!(select_leader(&group, &routes), Some(id("x")));
        }
    }
}
