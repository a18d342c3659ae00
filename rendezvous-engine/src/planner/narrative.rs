//! Human-readable itinerary text.
//!
//! Built after every route and meeting point is settled. Nothing here
//! touches the provider.

use chrono::NaiveDateTime;

use crate::domain::{Leg, NamedWaypoint, RouteSegment, TravelMode, Traveler, TravelerId};
use crate::geometry::nearest_path_index;
use crate::grouping::Group;

use super::result::{Role, TravelerPlan};

fn clock(t: NaiveDateTime) -> String {
    t.format("%H:%M").to_string()
}

fn minutes(secs: i64) -> i64 {
    secs.max(0).saturating_add(59) / 60
}

fn kilometres(meters: f64) -> String {
    format!("{:.1} km", meters / 1000.0)
}

/// One-line route summary: mode, distance, duration and fare.
fn summary(route: &RouteSegment) -> String {
    let mut line = format!(
        "By {}: {}, about {} min",
        route.mode.label(),
        kilometres(route.distance_m),
        minutes(route.duration_s)
    );
    if route.fare > 0 {
        line.push_str(&format!(", fare {}", route.fare));
    }
    line
}

fn leg_step(leg: &Leg) -> String {
    let line = leg
        .line_name
        .as_deref()
        .filter(|_| leg.mode.is_ride())
        .map(|name| format!(" {name}"))
        .unwrap_or_default();
    let stops = match (leg.waypoints.first(), leg.waypoints.last()) {
        (Some(from), Some(to)) if from.name != to.name => format!(" from {} to {}", from.name, to.name),
        (Some(to), _) => format!(" to {}", to.name),
        _ => String::new(),
    };
    format!("- {}{}{} ({} min)", leg.mode.label(), line, stops, minutes(leg.duration_s))
}

/// Waypoints a traveler passes before `cut` on their own path.
fn waypoints_until<'r>(route: &'r RouteSegment, cut: Option<usize>) -> Vec<&'r NamedWaypoint> {
    route
        .waypoints
        .iter()
        .filter(|w| match cut {
            Some(cut) => nearest_path_index(&route.points, w.location).is_some_and(|i| i <= cut),
            None => true,
        })
        .collect()
}

/// Legs that start before `cut` on the traveler's own path.
fn legs_until<'r>(route: &'r RouteSegment, cut: Option<usize>) -> Vec<&'r Leg> {
    route
        .legs
        .iter()
        .filter(|leg| match (cut, leg.geometry.to_points().first()) {
            (Some(cut), Some(start)) => nearest_path_index(&route.points, *start).is_some_and(|i| i < cut),
            _ => true,
        })
        .collect()
}

/// Narrative for one traveler.
pub(crate) fn traveler_log(
    plan: &TravelerPlan,
    traveler: &Traveler,
    route: Option<&RouteSegment>,
    leader_name: Option<&str>,
    destination: &NamedWaypoint,
) -> Vec<String> {
    let mut log = Vec::new();

    let Some(route) = route.filter(|r| r.is_routable()) else {
        if traveler.origin.is_none() {
            log.push("No starting location set, so no route was requested.".to_string());
        } else {
            log.push(format!(
                "No route available by {} to {}. Plan this trip separately.",
                traveler.mode.label(),
                destination.name
            ));
        }
        return log;
    };

    log.push(summary(route));

    match plan.role {
        Role::Leader if plan.followers.is_empty() => {
            log.push("Nobody can join along the way; travels independently.".to_string());
        }
        Role::Leader => {
            log.push(format!(
                "Leads the group; {} joining along the way.",
                plan.followers.len()
            ));
        }
        Role::Follower => {
            if let Some(meeting) = &plan.meeting {
                let when = meeting
                    .time
                    .map(|t| format!(" around {}", clock(t)))
                    .unwrap_or_default();
                log.push(format!(
                    "Meet {} at {}{} ({}), then continue together.",
                    leader_name.unwrap_or("the leader"),
                    meeting.name,
                    when,
                    meeting.source.describe()
                ));
            }
        }
        Role::Independent => {
            log.push(format!(
                "No meeting point found with {}'s route; travels independently.",
                leader_name.unwrap_or("the leader")
            ));
        }
        Role::Solo => {
            log.push("No other route passes close enough to meet; travels independently.".to_string());
        }
        Role::Unroutable => {}
    }

    if let Some(departure) = plan.departure {
        log.push(format!("Leave at {}.", clock(departure)));
    }
    if let Some(late) = plan.late_by_mins {
        log.push(format!(
            "Late by {late} min: the departure time has already passed."
        ));
    }

    let cut = match plan.role {
        Role::Follower => plan.cut_index,
        _ => None,
    };
    let target = plan
        .meeting
        .as_ref()
        .map(|m| m.name.as_str())
        .unwrap_or(destination.name.as_str());

    match route.mode {
        TravelMode::Car => log.push(format!("Drive to {target}.")),
        TravelMode::Walk => log.push(format!("Walk to {target}.")),
        TravelMode::Transit => {
            for leg in legs_until(route, cut) {
                log.push(leg_step(leg));
            }
        }
    }

    let stops = waypoints_until(route, cut);
    if !stops.is_empty() {
        let names: Vec<&str> = stops.iter().map(|w| w.name.as_str()).collect();
        log.push(format!("Via {}.", names.join(", ")));
    }

    log
}

fn plan_name<'p>(plans: &'p [TravelerPlan], id: &TravelerId) -> &'p str {
    plans
        .iter()
        .find(|p| &p.id == id)
        .map(|p| p.name.as_str())
        .unwrap_or("?")
}

/// Narrative for the whole plan.
pub(crate) fn overall_log(
    plans: &[TravelerPlan],
    groups: &[Group],
    destination: &NamedWaypoint,
    deadline: Option<NaiveDateTime>,
) -> Vec<String> {
    let mut log = vec![format!("Destination: {}.", destination.name)];

    match deadline {
        Some(deadline) => log.push(format!("Everyone arrives by {}.", clock(deadline))),
        None => log.push("No arrival time set, so departure times are not computed.".to_string()),
    }

    let name = |id: &TravelerId| plan_name(plans, id);

    for (i, group) in groups.iter().enumerate() {
        let line = if !group.is_routable() {
            format!("{}: no route available.", group.ids().map(name).collect::<Vec<_>>().join(", "))
        } else if group.is_singleton() {
            format!("{} travels alone.", group.ids().map(name).collect::<Vec<_>>().join(", "))
        } else {
            let members: Vec<String> = group
                .ids()
                .map(|id| {
                    let role = plans.iter().find(|p| &p.id == id).map(|p| p.role);
                    match role {
                        Some(Role::Leader) => format!("{} (leader)", name(id)),
                        Some(Role::Independent) => format!("{} (independent)", name(id)),
                        _ => name(id).to_string(),
                    }
                })
                .collect();
            format!("Group {}: {}.", i + 1, members.join(", "))
        };
        log.push(line);
    }

    let late: Vec<String> = plans
        .iter()
        .filter_map(|p| p.late_by_mins.map(|m| format!("{} ({m} min)", p.name)))
        .collect();
    if !late.is_empty() {
        log.push(format!("Running late: {}.", late.join(", ")));
    }

    log
}
