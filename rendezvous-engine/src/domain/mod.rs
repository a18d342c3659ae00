//! Domain types for the rendezvous planner.
//!
//! Validated value types are checked at construction time, so the geometry
//! and planning code that receives them can trust their invariants.

mod coordinate;
mod error;
mod route;
mod traveler;

pub use coordinate::{Coordinate, NamedWaypoint};
pub use error::DomainError;
pub use route::{Leg, LegMode, Position, RouteGeometry, RouteSegment};
pub use traveler::{Color, SearchOption, TravelMode, Traveler, TravelerId};
