//! The rendezvous planner.

use std::collections::HashMap;

use chrono::{Local, NaiveDateTime};
use futures::future::join_all;
use tracing::{debug, info};

use crate::domain::{Coordinate, Traveler, TravelerId};
use crate::grouping::{AlwaysCompatible, GroupFormation, TimeCompatibility};
use crate::provider::{RouteProvider, name_location};

use super::config::PlannerConfig;
use super::fetch::fetch_routes;
use super::narrative::{overall_log, traveler_log};
use super::request::{PlanError, PlanRequest};
use super::resolve::Schedule;
use super::result::{CalculationResult, TravelerPlan};

/// Plans how a group of travelers converges on one destination.
///
/// Holds no per-calculation state; one planner can serve many requests.
pub struct RendezvousPlanner<P, T = AlwaysCompatible> {
    provider: P,
    config: PlannerConfig,
    policy: T,
}

impl<P: RouteProvider> RendezvousPlanner<P> {
    /// Create a planner that accepts every geometric meeting.
    pub fn new(provider: P, config: PlannerConfig) -> Self {
        Self {
            provider,
            config,
            policy: AlwaysCompatible,
        }
    }
}

impl<P: RouteProvider, T: TimeCompatibility> RendezvousPlanner<P, T> {
    /// Replace the time-compatibility policy.
    pub fn with_policy<U: TimeCompatibility>(self, policy: U) -> RendezvousPlanner<P, U> {
        RendezvousPlanner {
            provider: self.provider,
            config: self.config,
            policy,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan the request against the local clock.
    pub async fn calculate(&self, request: &PlanRequest) -> Result<CalculationResult, PlanError> {
        self.calculate_at(request, Local::now().naive_local()).await
    }

    /// Plan the request, judging lateness against `now`.
    ///
    /// Fails only when the request itself is unusable. Travelers without a
    /// route, without a meeting point, or already late are reported in the
    /// result.
    pub async fn calculate_at(
        &self,
        request: &PlanRequest,
        now: NaiveDateTime,
    ) -> Result<CalculationResult, PlanError> {
        let destination = request.validate()?;

        if request.travelers.iter().all(|t| t.origin.is_none()) {
            info!("No traveler has a starting location");
            return Ok(CalculationResult::empty(
                "No traveler has a starting location yet, so there is nothing to plan.",
            ));
        }

        info!(
            travelers = request.travelers.len(),
            destination = %destination.name,
            "Planning rendezvous"
        );

        let routes = fetch_routes(
            &self.provider,
            &request.travelers,
            destination.location,
            self.config.batch_size(),
        )
        .await;

        let formation = GroupFormation::new(&self.config.grouping, &self.policy)
            .with_destination(destination.location);
        let groups = formation.partition(&request.travelers, &routes);

        let travelers: HashMap<&TravelerId, &Traveler> =
            request.travelers.iter().map(|t| (&t.id, t)).collect();
        let schedule = Schedule {
            travelers: &travelers,
            routes: &routes,
            formation: &formation,
            deadline: request.arrival_deadline,
            now,
            follower_buffer: self.config.follower_buffer(),
        };
        let mut plans: Vec<TravelerPlan> = groups.iter().flat_map(|g| schedule.resolve(g)).collect();

        self.name_meetings(&mut plans).await;

        for plan in &mut plans {
            let Some(traveler) = travelers.get(&plan.id) else {
                continue;
            };
            let leader_name = plan
                .leader
                .as_ref()
                .and_then(|id| travelers.get(id))
                .map(|t| t.name.as_str());
            let log = traveler_log(plan, traveler, routes.get(&plan.id), leader_name, destination);
            plan.log = log;
        }

        let order: HashMap<&TravelerId, usize> =
            request.travelers.iter().enumerate().map(|(i, t)| (&t.id, i)).collect();
        plans.sort_by_key(|p| order.get(&p.id).copied().unwrap_or(usize::MAX));

        let overall_log = overall_log(&plans, &groups, destination, request.arrival_deadline);

        let mut bounds: Vec<Coordinate> = plans
            .iter()
            .flat_map(|p| p.solo_points.iter().chain(&p.joined_points))
            .copied()
            .collect();
        bounds.push(destination.location);

        let legs = routes
            .iter()
            .filter(|(_, r)| !r.legs.is_empty())
            .map(|(id, r)| (id.clone(), r.legs.clone()))
            .collect();

        info!(
            groups = groups.len(),
            late = plans.iter().filter(|p| p.is_late()).count(),
            "Rendezvous planned"
        );

        Ok(CalculationResult {
            groups,
            overall_log,
            plans,
            bounds,
            routes,
            legs,
        })
    }

    /// Give every unnamed meeting point a display name.
    async fn name_meetings(&self, plans: &mut [TravelerPlan]) {
        let pending: Vec<(usize, Coordinate)> = plans
            .iter()
            .enumerate()
            .filter_map(|(i, p)| {
                let meeting = p.meeting.as_ref()?;
                meeting.name.trim().is_empty().then_some((i, meeting.location))
            })
            .collect();

        for batch in pending.chunks(self.config.batch_size()) {
            let futures: Vec<_> = batch
                .iter()
                .map(|(i, location)| async move {
                    let name = name_location(&self.provider, *location, &self.config.naming).await;
                    (*i, name)
                })
                .collect();

            for (i, name) in join_all(futures).await {
                let Some(plan) = plans.get_mut(i) else {
                    continue;
                };
                debug!(traveler = %plan.id, name = %name, "Named meeting point");
                if let Some(meeting) = plan.meeting.as_mut() {
                    meeting.name = name;
                }
            }
        }
    }
}
