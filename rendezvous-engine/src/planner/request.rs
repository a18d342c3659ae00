//! Plan requests and their validation.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::{NamedWaypoint, Traveler};

/// Error from a rendezvous calculation.
///
/// Only whole-request preconditions fail a calculation. Per-traveler
/// problems (no route, no meeting point, late departure) are reported in
/// the result instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// No destination was given
    #[error("no destination set")]
    MissingDestination,

    /// The traveler list is empty
    #[error("no travelers to plan for")]
    NoTravelers,

    /// Invalid plan request
    #[error("invalid plan request: {0}")]
    InvalidRequest(String),
}

/// Request for a rendezvous plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    pub travelers: Vec<Traveler>,

    pub destination: Option<NamedWaypoint>,

    /// Everyone should arrive by this time. Without one, the plan still
    /// groups travelers and estimates travel times but sets no departures.
    #[serde(default)]
    pub arrival_deadline: Option<NaiveDateTime>,
}

impl PlanRequest {
    /// Create a new plan request.
    pub fn new(
        travelers: Vec<Traveler>,
        destination: NamedWaypoint,
        arrival_deadline: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            travelers,
            destination: Some(destination),
            arrival_deadline,
        }
    }

    /// Validate the plan request, returning the destination.
    pub fn validate(&self) -> Result<&NamedWaypoint, PlanError> {
        let destination = self.destination.as_ref().ok_or(PlanError::MissingDestination)?;

        if self.travelers.is_empty() {
            return Err(PlanError::NoTravelers);
        }

        let mut seen = HashSet::new();
        for traveler in &self.travelers {
            if !seen.insert(&traveler.id) {
                return Err(PlanError::InvalidRequest(format!(
                    "duplicate traveler id {}",
                    traveler.id
                )));
            }
        }

        Ok(destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Color, Coordinate, TravelMode, TravelerId};

    fn traveler(id: &str) -> Traveler {
        Traveler::new(
            TravelerId::parse(id).unwrap(),
            id,
            None,
            TravelMode::Walk,
            Color::parse("#336699").unwrap(),
        )
    }

    fn destination() -> NamedWaypoint {
        NamedWaypoint::new("Stadium", Coordinate { lat: 37.5, lon: 127.0 })
    }

    #[test]
    fn valid_request() {
        let request = PlanRequest::new(vec![traveler("a"), traveler("b")], destination(), None);
        assert_eq!(request.validate().unwrap().name, "Stadium");
    }

    #[test]
    fn missing_destination_checked_first() {
        let request = PlanRequest {
            travelers: vec![],
            destination: None,
            arrival_deadline: None,
        };
        assert_eq!(request.validate().unwrap_err(), PlanError::MissingDestination);
    }

    #[test]
    fn no_travelers() {
        let request = PlanRequest::new(vec![], destination(), None);
        assert_eq!(request.validate().unwrap_err(), PlanError::NoTravelers);
    }

    #[test]
    fn duplicate_ids_rejected() {
        let request = PlanRequest::new(vec![traveler("a"), traveler("a")], destination(), None);
        assert!(matches!(request.validate(), Err(PlanError::InvalidRequest(_))));
    }

    #[test]
    fn error_display() {
        assert_eq!(PlanError::MissingDestination.to_string(), "no destination set");
        assert_eq!(PlanError::NoTravelers.to_string(), "no travelers to plan for");
        assert_eq!(
            PlanError::InvalidRequest("duplicate traveler id a".into()).to_string(),
            "invalid plan request: duplicate traveler id a"
        );
    }
}
