//! Per-group timing and cut-point resolution.

use std::collections::HashMap;

use chrono::{Duration, NaiveDateTime};
use tracing::debug;

use crate::domain::{RouteSegment, Traveler, TravelerId};
use crate::geometry::{estimate_elapsed_seconds, nearest_path_index};
use crate::grouping::{Group, GroupFormation, GroupMember, TimeCompatibility, select_leader};

use super::result::{MeetingPoint, Role, TravelerPlan};

/// Whole minutes `departure` lies before `now`, rounded up.
pub(crate) fn lateness_mins(departure: NaiveDateTime, now: NaiveDateTime) -> Option<i64> {
    if departure >= now {
        return None;
    }
    let secs = (now - departure).num_seconds();
    Some((secs + 59) / 60)
}

/// Fixed inputs for resolving every group of one calculation.
pub(crate) struct Schedule<'a, T: TimeCompatibility + ?Sized> {
    pub travelers: &'a HashMap<&'a TravelerId, &'a Traveler>,
    pub routes: &'a HashMap<TravelerId, RouteSegment>,
    pub formation: &'a GroupFormation<'a, T>,
    pub deadline: Option<NaiveDateTime>,
    pub now: NaiveDateTime,
    pub follower_buffer: Duration,
}

impl<T: TimeCompatibility + ?Sized> Schedule<'_, T> {
    /// Plans for every member of `group`, in member order. Meeting names
    /// are left empty unless the meeting point is a named stop.
    pub fn resolve(&self, group: &Group) -> Vec<TravelerPlan> {
        if group.len() > 1 {
            if let Some(plans) = self.resolve_shared(group) {
                return plans;
            }
        }

        group
            .members()
            .iter()
            .map(|m| self.alone(m, if group.len() > 1 { Role::Independent } else { Role::Solo }))
            .collect()
    }

    fn route(&self, id: &TravelerId) -> Option<&RouteSegment> {
        self.routes.get(id).filter(|r| r.is_routable())
    }

    fn blank_plan(&self, member: &GroupMember, role: Role) -> TravelerPlan {
        let name = self
            .travelers
            .get(&member.id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| member.id.to_string());

        TravelerPlan {
            id: member.id.clone(),
            name,
            mode: member.mode,
            role,
            leader: None,
            followers: Vec::new(),
            departure: None,
            travel_s: 0,
            late_by_mins: None,
            meeting: None,
            solo_points: Vec::new(),
            joined_points: Vec::new(),
            cut_index: None,
            log: Vec::new(),
        }
    }

    /// `deadline` minus the route's travel time, if both are representable.
    fn start_for(&self, route: &RouteSegment) -> Option<NaiveDateTime> {
        self.deadline?.checked_sub_signed(route.duration()?)
    }

    fn with_departure(&self, plan: &mut TravelerPlan, departure: Option<NaiveDateTime>) {
        plan.departure = departure;
        plan.late_by_mins = departure.and_then(|d| lateness_mins(d, self.now));
    }

    /// Back-calculate a traveler who goes straight to the destination.
    fn alone(&self, member: &GroupMember, role: Role) -> TravelerPlan {
        let Some(route) = self.route(&member.id) else {
            return self.blank_plan(member, Role::Unroutable);
        };

        let mut plan = self.blank_plan(member, role);
        plan.travel_s = route.duration_s;
        plan.solo_points = route.points.clone();
        self.with_departure(&mut plan, self.start_for(route));
        plan
    }

    /// Leader and followers. `None` if no member can lead.
    fn resolve_shared(&self, group: &Group) -> Option<Vec<TravelerPlan>> {
        let leader_id = select_leader(group, self.routes)?;
        let leader_route = self.route(&leader_id)?;
        let leader_member = group.members().iter().find(|m| m.id == leader_id)?;
        let leader_start = self.start_for(leader_route);

        let mut plans = Vec::with_capacity(group.len());
        let mut leader_slot = 0;
        let mut leader_cut: Option<usize> = None;
        let mut followers = Vec::new();

        for member in group.members() {
            if member.id == leader_id {
                leader_slot = plans.len();
                plans.push(self.blank_plan(member, Role::Leader));
                continue;
            }

            let Some(route) = self.route(&member.id) else {
                plans.push(self.blank_plan(member, Role::Unroutable));
                continue;
            };

            match self.follow(member, route, &leader_id, leader_route, leader_start) {
                Some(plan) => {
                    if let Some(meeting) = &plan.meeting {
                        leader_cut = Some(leader_cut.map_or(meeting.leader_index, |c| c.min(meeting.leader_index)));
                    }
                    followers.push(member.id.clone());
                    plans.push(plan);
                }
                None => {
                    debug!(
                        traveler = %member.id,
                        leader = %leader_id,
                        "No meeting point with leader, travelling independently"
                    );
                    let mut plan = self.alone(member, Role::Independent);
                    plan.leader = Some(leader_id.clone());
                    plans.push(plan);
                }
            }
        }

        let mut leader = self.blank_plan(leader_member, Role::Leader);
        leader.travel_s = leader_route.duration_s;
        leader.followers = followers;
        self.with_departure(&mut leader, leader_start);
        match leader_cut {
            Some(cut) => {
                leader.solo_points = leader_route.points[..=cut].to_vec();
                leader.joined_points = leader_route.points[cut..].to_vec();
                leader.cut_index = Some(cut);
            }
            None => leader.solo_points = leader_route.points.clone(),
        }
        plans[leader_slot] = leader;

        Some(plans)
    }

    fn follow(
        &self,
        member: &GroupMember,
        route: &RouteSegment,
        leader_id: &TravelerId,
        leader_route: &RouteSegment,
        leader_start: Option<NaiveDateTime>,
    ) -> Option<TravelerPlan> {
        let candidate = self.formation.meeting_point(leader_route, route)?;
        let leader_index = nearest_path_index(&leader_route.points, candidate.location)?;
        let follower_index = nearest_path_index(&route.points, candidate.location)?;

        let leader_elapsed = estimate_elapsed_seconds(
            &leader_route.points,
            leader_index,
            leader_route.distance_m,
            leader_route.duration_s,
        );
        let travel_s = estimate_elapsed_seconds(&route.points, follower_index, route.distance_m, route.duration_s);

        let meeting_time =
            leader_start.and_then(|s| s.checked_add_signed(Duration::try_seconds(leader_elapsed)?));
        let departure = meeting_time.and_then(|m| {
            m.checked_sub_signed(Duration::try_seconds(travel_s)?)?
                .checked_sub_signed(self.follower_buffer)
        });

        let mut plan = self.blank_plan(member, Role::Follower);
        plan.leader = Some(leader_id.clone());
        plan.travel_s = travel_s;
        plan.solo_points = route.points[..=follower_index].to_vec();
        plan.joined_points = leader_route.points[leader_index..].to_vec();
        plan.cut_index = Some(follower_index);
        plan.meeting = Some(MeetingPoint {
            location: candidate.location,
            name: candidate.name.unwrap_or_default(),
            leader_index,
            follower_index,
            source: candidate.source,
            time: meeting_time,
        });
        self.with_departure(&mut plan, departure);

        Some(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2026, 5, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn lateness_rounds_up() {
        assert_eq!(lateness_mins(at(10, 0), at(10, 30)), Some(30));
        assert_eq!(lateness_mins(at(10, 0), at(10, 0) + Duration::seconds(20)), Some(1));
        assert_eq!(lateness_mins(at(10, 0), at(10, 0)), None);
        assert_eq!(lateness_mins(at(11, 0), at(10, 0)), None);
    }
}
