//! Route provider error types.

use std::path::PathBuf;

use crate::domain::{Coordinate, TravelMode};

/// Errors from a route provider.
///
/// The planner never surfaces these to callers: a failed lookup degrades to
/// an empty route or the next naming step.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// No route between the requested endpoints
    #[error("no route from {origin} to {destination} ({mode})")]
    RouteNotFound {
        mode: TravelMode,
        origin: Coordinate,
        destination: Coordinate,
    },

    /// Fixture file could not be read
    #[error("failed to read fixture {}: {source}", path.display())]
    FixtureIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Fixture file is not valid JSON for a fixture set
    #[error("failed to parse fixture {}: {source}", path.display())]
    FixtureJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Fixture directory held no fixture files
    #[error("no fixture files found in {}", .0.display())]
    NoFixtures(PathBuf),

    /// Upstream service cannot be reached
    #[error("provider unavailable: {0}")]
    Unavailable(String),
}
