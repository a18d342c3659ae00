//! Station name normalization and matching.
//!
//! Independent providers name the same physical stop differently: one adds a
//! line number in parentheses, another appends the local word for "station".
//! Names are compared after stripping those cosmetic parts.

use std::collections::HashSet;

use crate::domain::NamedWaypoint;

/// Suffixes meaning "station" that providers append to stop names.
const STATION_SUFFIXES: &[&str] = &["station", "역", "駅", "站"];

/// Reduce a station name to a comparison key.
///
/// Strips parenthetical parts (an unclosed `(` drops the rest of the name),
/// lowercases, strips a trailing "station" morpheme, and removes all
/// whitespace. Blank input yields an empty string.
///
/// ```
/// use rendezvous_engine::geometry::normalize_station_name;
///
/// assert_eq!(normalize_station_name("Central Station (Line 2)"), "central");
/// assert_eq!(normalize_station_name("central"), "central");
/// assert_eq!(normalize_station_name("서울역(1호선)"), "서울");
/// assert_eq!(normalize_station_name("   "), "");
/// ```
pub fn normalize_station_name(raw: &str) -> String {
    let stripped = strip_parentheticals(raw).to_lowercase();
    let mut name = stripped.trim();

    for suffix in STATION_SUFFIXES {
        if let Some(rest) = name.strip_suffix(suffix) {
            if !rest.trim().is_empty() {
                name = rest;
                break;
            }
        }
    }

    name.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Normalize an optional name, treating `None` as blank.
pub fn normalize_optional_name(raw: Option<&str>) -> String {
    raw.map(normalize_station_name).unwrap_or_default()
}

/// Remove `(...)` groups, including full-width parentheses.
fn strip_parentheticals(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut depth = 0usize;

    for c in raw.chars() {
        match c {
            '(' | '（' => depth += 1,
            ')' | '）' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }

    out
}

/// Find the first waypoint of `list_b` whose normalized name appears in `list_a`.
///
/// Names that normalize to an empty string never match.
pub fn find_common_waypoint<'b>(
    list_a: &[NamedWaypoint],
    list_b: &'b [NamedWaypoint],
) -> Option<&'b NamedWaypoint> {
    let names: HashSet<String> = list_a
        .iter()
        .map(|w| normalize_station_name(&w.name))
        .filter(|n| !n.is_empty())
        .collect();

    if names.is_empty() {
        return None;
    }

    list_b
        .iter()
        .find(|w| names.contains(&normalize_station_name(&w.name)))
}
