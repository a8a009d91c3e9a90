//! Lookup indexes built once per search.
//!
//! Both indexes borrow from the route list, so building them costs a pass
//! over every route's stop list and no string copies.

use std::collections::HashMap;

use crate::domain::{Route, RouteId};

/// Map from stop id to the routes calling there.
///
/// Routes are listed in load order, each at most once per stop even if a
/// route lists the stop several times.
#[derive(Debug, Default)]
pub struct StopRoutes<'a> {
    routes_at: HashMap<&'a str, Vec<&'a RouteId>>,
}

impl<'a> StopRoutes<'a> {
    /// Build the index from the route list.
    pub fn build(routes: &'a [Route]) -> Self {
        let mut routes_at: HashMap<&'a str, Vec<&'a RouteId>> = HashMap::new();

        for route in routes {
            for stop in &route.stop_ids {
                let serving = routes_at.entry(stop.as_str()).or_default();
                // A route's stops are all indexed before the next route's,
                // so a repeat can only be the last entry.
                if serving.last() != Some(&&route.id) {
                    serving.push(&route.id);
                }
            }
        }

        Self { routes_at }
    }

    /// Routes calling at `stop`; empty if none.
    pub fn routes_at(&self, stop: &str) -> &[&'a RouteId] {
        self.routes_at.get(stop).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns true if any route calls at `stop`.
    pub fn serves(&self, stop: &str) -> bool {
        self.routes_at.contains_key(stop)
    }

    /// Number of distinct stops served.
    pub fn len(&self) -> usize {
        self.routes_at.len()
    }

    /// Returns true if no stop is served.
    pub fn is_empty(&self) -> bool {
        self.routes_at.is_empty()
    }
}

/// Direct lookup from route id to route.
///
/// If the list holds two routes with the same id, the later one wins.
#[derive(Debug, Default)]
pub struct RouteIndex<'a> {
    by_id: HashMap<&'a str, &'a Route>,
}

impl<'a> RouteIndex<'a> {
    /// Build the index from the route list.
    pub fn build(routes: &'a [Route]) -> Self {
        let by_id = routes.iter().map(|r| (r.id.as_str(), r)).collect();
        Self { by_id }
    }

    /// Look up a route by id.
    pub fn get(&self, id: &str) -> Option<&'a Route> {
        self.by_id.get(id).copied()
    }
}
