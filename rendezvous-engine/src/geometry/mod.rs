//! Stateless spatial primitives.
//!
//! Everything here is a pure function over coordinates and point lists, safe
//! to call from any thread. The grouping and planning layers build on these
//! to decide where travelers can meet.

mod distance;
mod names;
mod path;
mod shared;

pub use distance::{EARTH_RADIUS_M, angle_difference_degrees, bearing_degrees, distance_meters};
pub use names::{find_common_waypoint, normalize_optional_name, normalize_station_name};
pub use path::{estimate_elapsed_seconds, is_near_path, nearest_path_index, path_length_meters};
pub use shared::{PairRuns, SharedRun, SharedRunConfig, find_all_shared_runs, find_shared_runs};
