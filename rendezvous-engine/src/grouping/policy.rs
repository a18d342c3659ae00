//! Time-compatibility policy for meeting candidates.
//!
//! A geometric match says two travelers' paths touch; it does not say they
//! reach that spot at compatible times. Whether a leader should wait for a
//! follower who arrives much later (or the reverse) is a policy decision,
//! kept behind this trait so it can be replaced without touching the
//! grouping algorithm.

use crate::domain::{Coordinate, RouteSegment};

/// Timing facts about a proposed meeting.
#[derive(Debug, Clone, Copy)]
pub struct MeetingTiming<'a> {
    /// Route of the traveler others would join (pivot or leader).
    pub host_route: &'a RouteSegment,

    /// Route of the traveler who would join.
    pub guest_route: &'a RouteSegment,

    /// Proposed meeting location.
    pub location: Coordinate,

    /// Estimated seconds from the host's departure to the meeting point.
    pub host_elapsed_s: i64,

    /// Estimated seconds from the guest's departure to the meeting point.
    pub guest_elapsed_s: i64,
}

/// Decides whether a geometrically valid meeting is acceptable in time.
pub trait TimeCompatibility {
    fn is_compatible(&self, timing: &MeetingTiming<'_>) -> bool;
}

/// Accepts every meeting regardless of arrival-time mismatch.
///
/// Departures are back-calculated from the meeting time, so travelers can
/// always be told to leave early enough. No maximum wait window is enforced.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysCompatible;

impl TimeCompatibility for AlwaysCompatible {
    fn is_compatible(&self, _timing: &MeetingTiming<'_>) -> bool {
        true
    }
}

impl<F> TimeCompatibility for F
where
    F: Fn(&MeetingTiming<'_>) -> bool,
{
    fn is_compatible(&self, timing: &MeetingTiming<'_>) -> bool {
        self(timing)
    }
}
