//! Rendezvous planning.
//!
//! This module turns a set of travelers and one destination into a group
//! itinerary:
//!
//! 1. fetch each traveler's route concurrently, degrading failures to an
//!    empty route;
//! 2. partition travelers into groups that can meet en route;
//! 3. pick a leader per group and back-calculate departures from the
//!    arrival deadline;
//! 4. name meeting points and write the narrative.
//!
//! Everything after the fetch is synchronous over an immutable route map.

mod config;
mod fetch;
mod narrative;
mod rendezvous;
mod request;
mod resolve;
mod result;


pub use config::PlannerConfig;
pub use rendezvous::RendezvousPlanner;
pub use request::{PlanError, PlanRequest};
pub use result::{CalculationResult, MeetingPoint, Role, TravelerPlan};
