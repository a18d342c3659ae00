//! Route provider boundary.
//!
//! The engine never speaks a provider's wire format. Everything it needs
//! from the outside world (routes, nearby places, addresses) comes through
//! [`RouteProvider`], so the planner can be driven by a live client, the
//! fixture-backed [`StaticRouteProvider`], or a test mock.

mod cache;
mod error;
mod fixture;
mod naming;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, NamedWaypoint, RouteSegment, SearchOption, TravelMode};

pub use cache::{CacheConfig, CachedRouteProvider};
pub use error::ProviderError;
pub use fixture::{AddressFixture, FixtureSet, PlaceFixture, RouteFixture, StaticRouteProvider};
pub use naming::{NamingConfig, name_location};

/// A single route request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteQuery {
    pub mode: TravelMode,
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub option: SearchOption,
}

impl RouteQuery {
    pub fn new(mode: TravelMode, origin: Coordinate, destination: Coordinate) -> Self {
        Self {
            mode,
            origin,
            destination,
            option: SearchOption::RECOMMENDED,
        }
    }

    pub fn with_option(mut self, option: SearchOption) -> Self {
        self.option = option;
        self
    }
}

/// Kinds of place used to name meeting points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaceCategory {
    #[serde(rename = "SW8")]
    Subway,
    #[serde(rename = "CE7")]
    Cafe,
    #[serde(rename = "CS2")]
    ConvenienceStore,
}

impl PlaceCategory {
    /// Category code understood by place-search services.
    pub fn code(self) -> &'static str {
        match self {
            PlaceCategory::Subway => "SW8",
            PlaceCategory::Cafe => "CE7",
            PlaceCategory::ConvenienceStore => "CS2",
        }
    }
}

impl fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Source of routes and place information.
///
/// This abstraction allows the planner to be tested with mock data.
#[allow(async_fn_in_trait)]
pub trait RouteProvider {
    /// Route from `query.origin` to `query.destination` by `query.mode`.
    ///
    /// An `Ok` route with no points means the provider found nothing usable.
    async fn fetch_route(&self, query: &RouteQuery) -> Result<RouteSegment, ProviderError>;

    /// Places of `category` within `radius_m` of `center`, nearest first.
    async fn search_nearby(
        &self,
        category: PlaceCategory,
        center: Coordinate,
        radius_m: f64,
    ) -> Result<Vec<NamedWaypoint>, ProviderError>;

    /// Human-readable address for a coordinate, if one is known.
    async fn reverse_geocode(&self, location: Coordinate) -> Result<Option<String>, ProviderError>;
}
