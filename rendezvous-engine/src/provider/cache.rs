//! Caching layer for route provider responses.
//!
//! Travelers who plan together repeatedly tend to re-request the same
//! routes while they adjust one person's mode or origin. Endpoints are
//! bucketed onto a coarse grid so small GPS jitter still hits the cache.
//!
//! Only routable results are cached. Errors and empty routes go back to the
//! upstream provider on the next request.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tokio::sync::Semaphore;
use tracing::trace;

use crate::domain::{Coordinate, NamedWaypoint, RouteSegment, SearchOption, TravelMode};

use super::error::ProviderError;
use super::{PlaceCategory, RouteProvider, RouteQuery};

/// Grid cell of a bucketed coordinate.
type Cell = (i64, i64);

/// Cache key for routes: (mode, option, origin cell, destination cell).
type RouteKey = (TravelMode, SearchOption, Cell, Cell);

/// Cache key for nearby searches: (category, center cell, radius in metres).
type PlaceKey = (PlaceCategory, Cell, u32);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries per cache.
    pub max_capacity: u64,

    /// Grid cell size in degrees.
    pub bucket_deg: f64,

    /// Maximum concurrent upstream requests.
    pub max_concurrent: usize,
}

impl CacheConfig {
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_bucket_deg(mut self, degrees: f64) -> Self {
        self.bucket_deg = degrees;
        self
    }

    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 1000,
            bucket_deg: 0.0005,
            max_concurrent: 4,
        }
    }
}

fn build_cache<K, V>(config: &CacheConfig) -> MokaCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    MokaCache::builder()
        .time_to_live(config.ttl)
        .max_capacity(config.max_capacity)
        .build()
}

/// Route provider with caching.
///
/// Wraps any `RouteProvider`, caches its responses, and limits how many
/// upstream requests run at once.
pub struct CachedRouteProvider<P> {
    inner: P,
    routes: MokaCache<RouteKey, Arc<RouteSegment>>,
    places: MokaCache<PlaceKey, Arc<Vec<NamedWaypoint>>>,
    addresses: MokaCache<Cell, Option<String>>,
    semaphore: Arc<Semaphore>,
    bucket_deg: f64,
}

impl<P: RouteProvider> CachedRouteProvider<P> {
    /// Create a new cached provider.
    pub fn new(inner: P, config: &CacheConfig) -> Self {
        Self {
            inner,
            routes: build_cache(config),
            places: build_cache(config),
            addresses: build_cache(config),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
            bucket_deg: config.bucket_deg,
        }
    }

    /// Grid cell containing a coordinate.
    fn cell(&self, c: Coordinate) -> Cell {
        (
            (c.lat / self.bucket_deg).floor() as i64,
            (c.lon / self.bucket_deg).floor() as i64,
        )
    }

    fn route_key(&self, query: &RouteQuery) -> RouteKey {
        (
            query.mode,
            query.option,
            self.cell(query.origin),
            self.cell(query.destination),
        )
    }

    async fn permit(&self) -> Result<tokio::sync::SemaphorePermit<'_>, ProviderError> {
        self.semaphore
            .acquire()
            .await
            .map_err(|_| ProviderError::Unavailable("semaphore closed".to_string()))
    }

    /// Access the underlying provider for operations that bypass the cache.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.routes.invalidate_all();
        self.places.invalidate_all();
        self.addresses.invalidate_all();
    }
}

impl<P: RouteProvider> RouteProvider for CachedRouteProvider<P> {
    async fn fetch_route(&self, query: &RouteQuery) -> Result<RouteSegment, ProviderError> {
        let key = self.route_key(query);

        if let Some(cached) = self.routes.get(&key).await {
            trace!(mode = ?query.mode, "Route cache hit");
            return Ok(RouteSegment::clone(&cached));
        }

        let route = {
            let _permit = self.permit().await?;
            self.inner.fetch_route(query).await?
        };

        if route.is_routable() {
            self.routes.insert(key, Arc::new(route.clone())).await;
        }

        Ok(route)
    }

    async fn search_nearby(
        &self,
        category: PlaceCategory,
        center: Coordinate,
        radius_m: f64,
    ) -> Result<Vec<NamedWaypoint>, ProviderError> {
        let key = (category, self.cell(center), radius_m.round() as u32);

        if let Some(cached) = self.places.get(&key).await {
            return Ok(Vec::clone(&cached));
        }

        let places = {
            let _permit = self.permit().await?;
            self.inner.search_nearby(category, center, radius_m).await?
        };
        self.places.insert(key, Arc::new(places.clone())).await;

        Ok(places)
    }

    async fn reverse_geocode(&self, location: Coordinate) -> Result<Option<String>, ProviderError> {
        let key = self.cell(location);

        if let Some(cached) = self.addresses.get(&key).await {
            return Ok(cached);
        }

        let label = {
            let _permit = self.permit().await?;
            self.inner.reverse_geocode(location).await?
        };
        self.addresses.insert(key, label.clone()).await;

        Ok(label)
    }
}
