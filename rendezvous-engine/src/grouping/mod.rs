//! Group formation: who can travel together, and where they meet.
//!
//! Pure and synchronous. Works over routes already fetched by the planner.

mod config;
mod leader;
mod meeting;
mod partition;
mod policy;

pub use config::GroupingConfig;
pub use leader::select_leader;
pub use meeting::{MeetingCandidate, MeetingSource, find_meeting_point};
pub use partition::{Group, GroupFormation, GroupMember};
pub use policy::{AlwaysCompatible, MeetingTiming, TimeCompatibility};
