//! Thresholds for group formation.

use crate::geometry::SharedRunConfig;

/// Configuration parameters for meeting-point detection.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupingConfig {
    /// How close a transit stop or walking point must be to a car's path
    /// for the car to pick that traveler up (metres).
    pub proximity_radius_m: f64,

    /// Meeting points this close to the destination are rejected (metres).
    /// Two routes always converge at the destination itself, which says
    /// nothing about meeting on the way.
    pub destination_guard_m: f64,

    /// Tolerances for detecting two paths on the same road.
    pub shared_runs: SharedRunConfig,
}

impl GroupingConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        proximity_radius_m: f64,
        destination_guard_m: f64,
        shared_runs: SharedRunConfig,
    ) -> Self {
        Self {
            proximity_radius_m,
            destination_guard_m,
            shared_runs,
        }
    }

    /// Set the pickup proximity radius.
    pub fn with_proximity_radius(mut self, meters: f64) -> Self {
        self.proximity_radius_m = meters;
        self
    }

    /// Set the destination guard distance.
    pub fn with_destination_guard(mut self, meters: f64) -> Self {
        self.destination_guard_m = meters;
        self
    }

    /// Set the shared-run tolerances.
    pub fn with_shared_runs(mut self, shared_runs: SharedRunConfig) -> Self {
        self.shared_runs = shared_runs;
        self
    }
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            proximity_radius_m: 50.0,
            destination_guard_m: 500.0,
            shared_runs: SharedRunConfig::default(),
        }
    }
}
