//! Route fan-out.

use std::collections::HashMap;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::domain::{Coordinate, RouteSegment, Traveler, TravelerId};
use crate::provider::{RouteProvider, RouteQuery};

/// Fetch a route for every traveler with an origin.
///
/// Requests run concurrently in batches of `batch_size`. A failed or empty
/// response is recorded as an empty route so the traveler is treated as
/// unroutable; it never aborts the batch. Travelers without an origin are
/// left out of the map.
pub(crate) async fn fetch_routes<P: RouteProvider + ?Sized>(
    provider: &P,
    travelers: &[Traveler],
    destination: Coordinate,
    batch_size: usize,
) -> HashMap<TravelerId, RouteSegment> {
    let queries: Vec<(&Traveler, RouteQuery)> = travelers
        .iter()
        .filter_map(|t| {
            let origin = t.origin?;
            Some((t, RouteQuery::new(t.mode, origin, destination).with_option(t.option)))
        })
        .collect();

    let mut routes = HashMap::with_capacity(queries.len());

    for batch in queries.chunks(batch_size.max(1)) {
        let futures: Vec<_> = batch
            .iter()
            .map(|(traveler, query)| async move {
                let result = provider.fetch_route(query).await;
                (*traveler, result)
            })
            .collect();

        let results = join_all(futures).await;

        for (traveler, result) in results {
            let route = match result {
                Ok(route) if route.is_routable() => route,
                Ok(_) => {
                    debug!(traveler = %traveler.id, mode = %traveler.mode, "Provider returned no route");
                    RouteSegment::empty(traveler.mode)
                }
                Err(e) => {
                    warn!(
                        traveler = %traveler.id,
                        error = %e,
                        "Failed to fetch route, using empty"
                    );
                    RouteSegment::empty(traveler.mode)
                }
            };
            routes.insert(traveler.id.clone(), route);
        }
    }

    debug!(
        requested = queries.len(),
        routable = routes.values().filter(|r| r.is_routable()).count(),
        "Route fetch complete"
    );

    routes
}
