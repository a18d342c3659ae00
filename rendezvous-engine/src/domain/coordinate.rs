//! Coordinate and named waypoint types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// A WGS-84 coordinate in degrees.
///
/// Values built through [`Coordinate::new`] are finite and in range. The
/// fields stay public so fixtures and geometry code can construct points
/// directly; the geometry kernel never assumes more than finiteness.
/// Deserialization goes through [`Coordinate::new`].
///
/// # Examples
///
/// ```
/// use rendezvous_engine::domain::Coordinate;
///
/// let city_hall = Coordinate::new(37.5663, 126.9779).unwrap();
/// assert_eq!(city_hall.to_string(), "(37.566300, 126.977900)");
///
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// assert!(Coordinate::new(0.0, f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

/// Unchecked wire form of [`Coordinate`].
#[derive(Deserialize)]
struct RawCoordinate {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = DomainError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Self::new(raw.lat, raw.lon)
    }
}

impl Coordinate {
    /// Create a validated coordinate.
    pub fn new(lat: f64, lon: f64) -> Result<Self, DomainError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(DomainError::InvalidCoordinate {
                lat,
                lon,
                reason: "must be finite",
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(DomainError::InvalidCoordinate {
                lat,
                lon,
                reason: "latitude must be within -90..=90",
            });
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(DomainError::InvalidCoordinate {
                lat,
                lon,
                reason: "longitude must be within -180..=180",
            });
        }
        Ok(Self { lat, lon })
    }

    /// Build a coordinate from a GeoJSON `[lon, lat]` position.
    pub fn from_lon_lat(position: [f64; 2]) -> Self {
        Self {
            lat: position[1],
            lon: position[0],
        }
    }

    /// Returns the GeoJSON `[lon, lat]` position.
    pub fn to_lon_lat(self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// A coordinate with a human-readable name, such as a transit stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedWaypoint {
    pub name: String,
    pub location: Coordinate,
}

impl NamedWaypoint {
    pub fn new(name: impl Into<String>, location: Coordinate) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }
}
