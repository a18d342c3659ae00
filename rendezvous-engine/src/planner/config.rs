//! Planner configuration.

use chrono::Duration;

use crate::grouping::GroupingConfig;
use crate::provider::NamingConfig;

/// Configuration parameters for a rendezvous calculation.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// How early a follower should reach the meeting point before the
    /// leader (minutes).
    pub follower_buffer_mins: i64,

    /// Maximum number of route requests in flight at once.
    pub max_concurrent_fetches: usize,

    /// Meeting-point detection thresholds.
    pub grouping: GroupingConfig,

    /// Meeting-point naming radii.
    pub naming: NamingConfig,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        follower_buffer_mins: i64,
        max_concurrent_fetches: usize,
        grouping: GroupingConfig,
        naming: NamingConfig,
    ) -> Self {
        Self {
            follower_buffer_mins,
            max_concurrent_fetches,
            grouping,
            naming,
        }
    }

    /// Returns the follower buffer as a Duration.
    pub fn follower_buffer(&self) -> Duration {
        Duration::minutes(self.follower_buffer_mins)
    }

    /// Fetch batch size, never zero.
    pub(crate) fn batch_size(&self) -> usize {
        self.max_concurrent_fetches.max(1)
    }

    pub fn with_grouping(mut self, grouping: GroupingConfig) -> Self {
        self.grouping = grouping;
        self
    }

    pub fn with_naming(mut self, naming: NamingConfig) -> Self {
        self.naming = naming;
        self
    }

    pub fn with_max_concurrent_fetches(mut self, n: usize) -> Self {
        self.max_concurrent_fetches = n;
        self
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            follower_buffer_mins: 5,
            max_concurrent_fetches: 4,
            grouping: GroupingConfig::default(),
            naming: NamingConfig::default(),
        }
    }
}
