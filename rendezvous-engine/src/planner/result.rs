//! Calculation results.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::{Coordinate, Leg, RouteSegment, TravelMode, TravelerId};
use crate::grouping::{Group, MeetingSource};

/// A traveler's part in the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Others join this traveler's route.
    Leader,
    /// Joins the leader en route.
    Follower,
    /// In a group, but no meeting point with the leader was found.
    Independent,
    /// Alone in a group of one.
    Solo,
    /// No usable route.
    Unroutable,
}

/// Where a follower meets the leader.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeetingPoint {
    pub location: Coordinate,
    pub name: String,
    /// Index of the nearest point on the leader's path.
    pub leader_index: usize,
    /// Index of the nearest point on the follower's path.
    pub follower_index: usize,
    pub source: MeetingSource,
    /// When the leader reaches the meeting point, if a deadline was given.
    pub time: Option<NaiveDateTime>,
}

/// One traveler's itinerary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TravelerPlan {
    pub id: TravelerId,
    pub name: String,
    pub mode: TravelMode,
    pub role: Role,

    /// The group leader, for followers and independent members.
    pub leader: Option<TravelerId>,

    /// Travelers who join this one, for leaders.
    pub followers: Vec<TravelerId>,

    /// When to leave. Unset without a deadline or a route.
    pub departure: Option<NaiveDateTime>,

    /// Own travel time in seconds: to the meeting point for followers,
    /// to the destination otherwise.
    pub travel_s: i64,

    /// Minutes the departure time is already in the past.
    pub late_by_mins: Option<i64>,

    pub meeting: Option<MeetingPoint>,

    /// Points drawn in the traveler's own color.
    pub solo_points: Vec<Coordinate>,

    /// Points drawn in joined style.
    pub joined_points: Vec<Coordinate>,

    /// Where `solo_points` ends on the traveler's own path.
    pub cut_index: Option<usize>,

    pub log: Vec<String>,
}

impl TravelerPlan {
    pub fn is_late(&self) -> bool {
        self.late_by_mins.is_some()
    }
}

/// Result of a rendezvous calculation.
#[derive(Debug, Clone, Serialize)]
pub struct CalculationResult {
    pub groups: Vec<Group>,

    pub overall_log: Vec<String>,

    /// One plan per input traveler, in input order.
    pub plans: Vec<TravelerPlan>,

    /// Every drawn point, for camera framing.
    pub bounds: Vec<Coordinate>,

    /// Fetched routes, including empty ones for failed fetches.
    pub routes: HashMap<TravelerId, RouteSegment>,

    /// Transit legs of each fetched route.
    pub legs: HashMap<TravelerId, Vec<Leg>>,
}

impl CalculationResult {
    /// A result with nothing planned, explained by `reason`.
    pub fn empty(reason: impl Into<String>) -> Self {
        Self {
            groups: Vec::new(),
            overall_log: vec![reason.into()],
            plans: Vec::new(),
            bounds: Vec::new(),
            routes: HashMap::new(),
            legs: HashMap::new(),
        }
    }

    pub fn plan(&self, id: &TravelerId) -> Option<&TravelerPlan> {
        self.plans.iter().find(|p| &p.id == id)
    }

    pub fn group_of(&self, id: &TravelerId) -> Option<&Group> {
        self.groups.iter().find(|g| g.contains(id))
    }

    /// Overall and per-traveler narrative as display text.
    pub fn narrative(&self) -> String {
        let mut out = self.overall_log.join("\n");
        for plan in &self.plans {
            out.push_str("\n\n");
            out.push_str(&format!("[{}]\n", plan.name));
            out.push_str(&plan.log.join("\n"));
        }
        out
    }
}
