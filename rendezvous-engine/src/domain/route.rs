//! Route types.
//!
//! A `RouteSegment` is one traveler's complete route from origin to
//! destination as returned by a route provider. Transit routes additionally
//! carry `Leg`s so the narrative can describe each ride and walk.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::{Color, Coordinate, NamedWaypoint, TravelMode};

/// A GeoJSON `[lon, lat]` position.
pub type Position = [f64; 2];

/// Line geometry as delivered by providers.
///
/// Providers return either a single line or a multi-part line (one part per
/// road section or per vehicle). Both flatten to one ordered point list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum RouteGeometry {
    LineString(Vec<Position>),
    MultiLineString(Vec<Vec<Position>>),
}

impl RouteGeometry {
    /// Flatten into an ordered coordinate list.
    ///
    /// Parts are concatenated in order. When a part starts exactly where the
    /// previous one ended, the repeated joint is emitted once.
    pub fn to_points(&self) -> Vec<Coordinate> {
        match self {
            RouteGeometry::LineString(positions) => {
                positions.iter().copied().map(Coordinate::from_lon_lat).collect()
            }
            RouteGeometry::MultiLineString(parts) => {
                let mut points: Vec<Coordinate> = Vec::new();
                for part in parts {
                    for (i, position) in part.iter().enumerate() {
                        let point = Coordinate::from_lon_lat(*position);
                        if i == 0 && points.last() == Some(&point) {
                            continue;
                        }
                        points.push(point);
                    }
                }
                points
            }
        }
    }

    /// Build a single-line geometry from coordinates.
    pub fn from_points(points: &[Coordinate]) -> Self {
        RouteGeometry::LineString(points.iter().map(|c| c.to_lon_lat()).collect())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RouteGeometry::LineString(positions) => positions.is_empty(),
            RouteGeometry::MultiLineString(parts) => parts.iter().all(Vec::is_empty),
        }
    }
}

impl Default for RouteGeometry {
    fn default() -> Self {
        RouteGeometry::LineString(Vec::new())
    }
}

/// Vehicle or movement type of a single transit leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegMode {
    Walk,
    Bus,
    Subway,
    Rail,
    Car,
}

impl LegMode {
    /// Returns true for legs ridden on a vehicle with stops.
    pub fn is_ride(self) -> bool {
        matches!(self, LegMode::Bus | LegMode::Subway | LegMode::Rail)
    }

    pub fn label(self) -> &'static str {
        match self {
            LegMode::Walk => "walk",
            LegMode::Bus => "bus",
            LegMode::Subway => "subway",
            LegMode::Rail => "train",
            LegMode::Car => "car",
        }
    }
}

/// One sub-segment of a transit route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub mode: LegMode,
    #[serde(default)]
    pub line_name: Option<String>,
    #[serde(default)]
    pub line_color: Option<Color>,
    #[serde(default)]
    pub waypoints: Vec<NamedWaypoint>,
    #[serde(default)]
    pub geometry: RouteGeometry,
    pub distance_m: f64,
    pub duration_s: i64,
}

/// A traveler's complete route.
///
/// `points` run from start to destination and are never reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    pub mode: TravelMode,
    pub points: Vec<Coordinate>,
    pub distance_m: f64,
    pub duration_s: i64,
    /// Fare in minor currency units, 0 if unknown.
    #[serde(default)]
    pub fare: i64,
    #[serde(default)]
    pub waypoints: Vec<NamedWaypoint>,
    #[serde(default)]
    pub legs: Vec<Leg>,
}

impl RouteSegment {
    /// The "no route" value used for failed or empty provider responses.
    pub fn empty(mode: TravelMode) -> Self {
        Self {
            mode,
            points: Vec::new(),
            distance_m: 0.0,
            duration_s: 0,
            fare: 0,
            waypoints: Vec::new(),
            legs: Vec::new(),
        }
    }

    /// Assemble a route from transit legs.
    ///
    /// Points and waypoints are concatenated in leg order; a waypoint repeated
    /// across a leg boundary (alight here, board there) is kept once.
    pub fn from_legs(mode: TravelMode, legs: Vec<Leg>, fare: i64) -> Self {
        let mut points: Vec<Coordinate> = Vec::new();
        let mut waypoints: Vec<NamedWaypoint> = Vec::new();

        for leg in &legs {
            for (i, point) in leg.geometry.to_points().into_iter().enumerate() {
                if i == 0 && points.last() == Some(&point) {
                    continue;
                }
                points.push(point);
            }
            for waypoint in &leg.waypoints {
                if waypoints.last().map(|w| &w.name) == Some(&waypoint.name) {
                    continue;
                }
                waypoints.push(waypoint.clone());
            }
        }

        Self {
            mode,
            points,
            distance_m: legs.iter().map(|l| l.distance_m).sum(),
            duration_s: legs.iter().map(|l| l.duration_s).sum(),
            fare,
            waypoints,
            legs,
        }
    }

    /// Returns true if the route has geometry usable for matching.
    pub fn is_routable(&self) -> bool {
        !self.points.is_empty()
    }

    /// Final point of the route.
    pub fn end_point(&self) -> Option<Coordinate> {
        self.points.last().copied()
    }

    /// Travel time, or `None` if `duration_s` is out of range.
    pub fn duration(&self) -> Option<Duration> {
        Duration::try_seconds(self.duration_s)
    }
}
