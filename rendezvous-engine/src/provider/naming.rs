//! Display names for meeting points.

use tracing::debug;

use crate::domain::Coordinate;

use super::{PlaceCategory, RouteProvider};

/// Search radii for the meeting-point naming chain.
#[derive(Debug, Clone, PartialEq)]
pub struct NamingConfig {
    /// Subway stations within this distance name the point (metres).
    pub subway_radius_m: f64,

    /// Cafes within this distance (metres).
    pub cafe_radius_m: f64,

    /// Convenience stores within this distance (metres).
    pub store_radius_m: f64,

    /// Used when nothing nearby has a name.
    pub fallback_label: String,
}

impl NamingConfig {
    /// Nearby-search steps in priority order.
    fn steps(&self) -> [(PlaceCategory, f64); 3] {
        [
            (PlaceCategory::Subway, self.subway_radius_m),
            (PlaceCategory::Cafe, self.cafe_radius_m),
            (PlaceCategory::ConvenienceStore, self.store_radius_m),
        ]
    }

    pub fn with_fallback_label(mut self, label: impl Into<String>) -> Self {
        self.fallback_label = label.into();
        self
    }
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            subway_radius_m: 300.0,
            cafe_radius_m: 100.0,
            store_radius_m: 100.0,
            fallback_label: "meeting point".to_string(),
        }
    }
}

/// Name a location the way a person would describe it.
///
/// Tries a nearby subway station, then a cafe, then a convenience store,
/// then the street address, and finally the fallback label. A failed lookup
/// moves on to the next step.
pub async fn name_location<P: RouteProvider + ?Sized>(
    provider: &P,
    location: Coordinate,
    config: &NamingConfig,
) -> String {
    for (category, radius) in config.steps() {
        match provider.search_nearby(category, location, radius).await {
            Ok(places) => {
                if let Some(place) = places.into_iter().find(|p| !p.name.trim().is_empty()) {
                    return place.name;
                }
            }
            Err(e) => {
                debug!(
                    category = %category,
                    error = %e,
                    "Failed nearby search, trying next category"
                );
            }
        }
    }

    match provider.reverse_geocode(location).await {
        Ok(Some(label)) if !label.trim().is_empty() => label,
        Ok(_) => config.fallback_label.clone(),
        Err(e) => {
            debug!(location = %location, error = %e, "Failed reverse geocode, using fallback");
            config.fallback_label.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NamedWaypoint, RouteSegment};
    use crate::provider::{ProviderError, RouteQuery};
    use std::collections::HashMap;

    /// Answers nearby searches from a fixed table; categories listed in
    /// `failing` return errors.
    #[derive(Default)]
    struct TableProvider {
        places: HashMap<PlaceCategory, Vec<&'static str>>,
        failing: Vec<PlaceCategory>,
        address: Option<&'static str>,
        geocode_fails: bool,
    }

    impl RouteProvider for TableProvider {
        async fn fetch_route(&self, query: &RouteQuery) -> Result<RouteSegment, ProviderError> {
            Ok(RouteSegment::empty(query.mode))
        }

        async fn search_nearby(
            &self,
            category: PlaceCategory,
            center: Coordinate,
            _radius_m: f64,
        ) -> Result<Vec<NamedWaypoint>, ProviderError> {
            if self.failing.contains(&category) {
                return Err(ProviderError::Unavailable("down".into()));
            }
            Ok(self
                .places
                .get(&category)
                .into_iter()
                .flatten()
                .map(|name| NamedWaypoint::new(*name, center))
                .collect())
        }

        async fn reverse_geocode(&self, _location: Coordinate) -> Result<Option<String>, ProviderError> {
            if self.geocode_fails {
                return Err(ProviderError::Unavailable("down".into()));
            }
            Ok(self.address.map(str::to_string))
        }
    }

    fn here() -> Coordinate {
        Coordinate { lat: 37.5, lon: 127.0 }
    }

    #[test]
    fn default_config() {
        let config = NamingConfig::default();
        assert_eq!(config.subway_radius_m, 300.0);
        assert_eq!(config.cafe_radius_m, 100.0);
        assert_eq!(config.store_radius_m, 100.0);
        assert_eq!(config.fallback_label, "meeting point");
    }

    #[tokio::test]
    async fn subway_beats_cafe() {
        let provider = TableProvider {
            places: HashMap::from([
                (PlaceCategory::Subway, vec!["Central Station"]),
                (PlaceCategory::Cafe, vec!["Bean There"]),
            ]),
            ..Default::default()
        };
        assert_eq!(
            name_location(&provider, here(), &NamingConfig::default()).await,
            "Central Station"
        );
    }

    #[tokio::test]
    async fn failed_search_falls_through() {
        let provider = TableProvider {
            places: HashMap::from([
                (PlaceCategory::Subway, vec!["Central Station"]),
                (PlaceCategory::ConvenienceStore, vec!["Corner Shop"]),
            ]),
            failing: vec![PlaceCategory::Subway],
            ..Default::default()
        };
        assert_eq!(
            name_location(&provider, here(), &NamingConfig::default()).await,
            "Corner Shop"
        );
    }

    #[tokio::test]
    async fn address_when_no_places() {
        let provider = TableProvider {
            address: Some("12 Harbor Rd"),
            ..Default::default()
        };
        assert_eq!(
            name_location(&provider, here(), &NamingConfig::default()).await,
            "12 Harbor Rd"
        );
    }

    #[tokio::test]
    async fn fallback_label_last() {
        let provider = TableProvider {
            places: HashMap::from([(PlaceCategory::Cafe, vec!["  "])]),
            geocode_fails: true,
            ..Default::default()
        };
        let config = NamingConfig::default().with_fallback_label("pickup spot");
        assert_eq!(name_location(&provider, here(), &config).await, "pickup spot");
    }
}
