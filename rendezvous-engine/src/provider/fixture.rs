//! Fixture-backed route provider.
//!
//! Serves routes, places and addresses from JSON fixture sets, as if they
//! were live provider responses. Useful for development, the demo binary,
//! and tests that need realistic geometry without network access.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{
    Coordinate, Leg, NamedWaypoint, RouteGeometry, RouteSegment, SearchOption, TravelMode,
};
use crate::geometry::{distance_meters, path_length_meters};

use super::error::ProviderError;
use super::{PlaceCategory, RouteProvider, RouteQuery};

/// How far a query endpoint may be from a fixture endpoint and still match.
const DEFAULT_MATCH_RADIUS_M: f64 = 150.0;

/// A canned route between two endpoints.
///
/// Either `legs` (transit) or `geometry` describes the path. With legs the
/// route's distance and duration are the leg totals; otherwise `distance_m`
/// defaults to the geometry length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteFixture {
    pub mode: TravelMode,
    /// Only served for this search option. Unset serves any option.
    #[serde(default)]
    pub option: Option<SearchOption>,
    pub origin: Coordinate,
    pub destination: Coordinate,
    #[serde(default)]
    pub geometry: RouteGeometry,
    #[serde(default)]
    pub distance_m: Option<f64>,
    #[serde(default)]
    pub duration_s: i64,
    #[serde(default)]
    pub fare: i64,
    #[serde(default)]
    pub waypoints: Vec<NamedWaypoint>,
    #[serde(default)]
    pub legs: Vec<Leg>,
}

impl RouteFixture {
    pub fn to_segment(&self) -> RouteSegment {
        if !self.legs.is_empty() {
            return RouteSegment::from_legs(self.mode, self.legs.clone(), self.fare);
        }

        let points = self.geometry.to_points();
        RouteSegment {
            mode: self.mode,
            distance_m: self.distance_m.unwrap_or_else(|| path_length_meters(&points)),
            points,
            duration_s: self.duration_s,
            fare: self.fare,
            waypoints: self.waypoints.clone(),
            legs: Vec::new(),
        }
    }

    fn serves(&self, query: &RouteQuery, radius_m: f64) -> bool {
        self.mode == query.mode
            && self.option.is_none_or(|o| o == query.option)
            && distance_meters(self.origin, query.origin) <= radius_m
            && distance_meters(self.destination, query.destination) <= radius_m
    }
}

/// A named place for nearby search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceFixture {
    pub category: PlaceCategory,
    pub name: String,
    pub location: Coordinate,
}

/// An address label for reverse geocoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressFixture {
    pub location: Coordinate,
    pub label: String,
}

/// Contents of one fixture file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixtureSet {
    #[serde(default)]
    pub routes: Vec<RouteFixture>,
    #[serde(default)]
    pub places: Vec<PlaceFixture>,
    #[serde(default)]
    pub addresses: Vec<AddressFixture>,
}

impl FixtureSet {
    /// Load a fixture set from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProviderError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ProviderError::FixtureIo {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&json).map_err(|source| ProviderError::FixtureJson {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Route provider that serves data from fixture sets.
#[derive(Debug, Clone)]
pub struct StaticRouteProvider {
    routes: Vec<RouteFixture>,
    places: Vec<PlaceFixture>,
    addresses: Vec<AddressFixture>,
    match_radius_m: f64,
}

impl StaticRouteProvider {
    /// Create a provider from fixture sets, merged in order.
    pub fn new(sets: impl IntoIterator<Item = FixtureSet>) -> Self {
        let mut provider = Self {
            routes: Vec::new(),
            places: Vec::new(),
            addresses: Vec::new(),
            match_radius_m: DEFAULT_MATCH_RADIUS_M,
        };
        for set in sets {
            provider.extend(set);
        }
        provider
    }

    /// Create a provider by loading every `.json` file in a directory.
    ///
    /// Files load in name order, so earlier files win when two fixtures
    /// serve the same query.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, ProviderError> {
        let dir = dir.as_ref();
        let io_err = |source| ProviderError::FixtureIo {
            path: dir.to_path_buf(),
            source,
        };

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json") {
                paths.push(path);
            }
        }
        paths.sort();

        if paths.is_empty() {
            return Err(ProviderError::NoFixtures(dir.to_path_buf()));
        }

        let sets = paths
            .iter()
            .map(FixtureSet::load)
            .collect::<Result<Vec<_>, _>>()?;

        let provider = Self::new(sets);
        debug!(
            dir = %dir.display(),
            routes = provider.routes.len(),
            places = provider.places.len(),
            addresses = provider.addresses.len(),
            "Loaded fixtures"
        );
        Ok(provider)
    }

    /// Set the endpoint match radius.
    pub fn with_match_radius(mut self, meters: f64) -> Self {
        self.match_radius_m = meters;
        self
    }

    pub fn extend(&mut self, set: FixtureSet) {
        self.routes.extend(set.routes);
        self.places.extend(set.places);
        self.addresses.extend(set.addresses);
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }
}

impl Default for StaticRouteProvider {
    fn default() -> Self {
        Self::new([])
    }
}

impl RouteProvider for StaticRouteProvider {
    async fn fetch_route(&self, query: &RouteQuery) -> Result<RouteSegment, ProviderError> {
        // An option-specific fixture beats a catch-all one
        let exact = self
            .routes
            .iter()
            .find(|r| r.option.is_some() && r.serves(query, self.match_radius_m));
        let any = || self.routes.iter().find(|r| r.serves(query, self.match_radius_m));

        exact
            .or_else(any)
            .map(RouteFixture::to_segment)
            .ok_or(ProviderError::RouteNotFound {
                mode: query.mode,
                origin: query.origin,
                destination: query.destination,
            })
    }

    async fn search_nearby(
        &self,
        category: PlaceCategory,
        center: Coordinate,
        radius_m: f64,
    ) -> Result<Vec<NamedWaypoint>, ProviderError> {
        let mut found: Vec<(f64, &PlaceFixture)> = self
            .places
            .iter()
            .filter(|p| p.category == category)
            .map(|p| (distance_meters(center, p.location), p))
            .filter(|(d, _)| *d <= radius_m)
            .collect();
        found.sort_by(|a, b| a.0.total_cmp(&b.0));

        Ok(found
            .into_iter()
            .map(|(_, p)| NamedWaypoint::new(p.name.clone(), p.location))
            .collect())
    }

    async fn reverse_geocode(&self, location: Coordinate) -> Result<Option<String>, ProviderError> {
        let nearest = self
            .addresses
            .iter()
            .map(|a| (distance_meters(location, a.location), a))
            .filter(|(d, _)| *d <= self.match_radius_m)
            .min_by(|a, b| a.0.total_cmp(&b.0));

        Ok(nearest.map(|(_, a)| a.label.clone()))
    }
}
