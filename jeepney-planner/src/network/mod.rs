//! The route network: an immutable snapshot of every route and stop.
//!
//! A `Network` is built once at start-up (usually from the bundled JSON
//! file) and then shared read-only by every planner call.

mod error;
mod loader;
mod lookup;

use std::collections::{HashMap, HashSet};

use crate::domain::{Route, RouteColor, RouteId, Stop, StopId};

pub use error::NetworkError;
pub use loader::{NetworkFile, RouteRecord, StopRecord};

/// All routes and stops known to the planner.
#[derive(Debug, Clone, Default)]
pub struct Network {
    /// Routes in load order. The planner's tie-breaking follows this order.
    routes: Vec<Route>,
    stops: HashMap<StopId, Stop>,
}

impl Network {
    /// Create a network from parts without validating it.
    ///
    /// Dangling stop references are allowed here; the planner skips them.
    /// Call [`Network::validate`] when loading untrusted data.
    pub fn new(routes: Vec<Route>, stops: HashMap<StopId, Stop>) -> Self {
        Self { routes, stops }
    }

    /// Check the network's referential and display invariants.
    ///
    /// - stop and route names are non-empty
    /// - route ids and colours are unique, route numbers start at 1
    /// - every route has at least one stop, and every stop it lists exists
    pub fn validate(&self) -> Result<(), NetworkError> {
        let mut stop_ids: Vec<&StopId> = self.stops.keys().collect();
        stop_ids.sort();
        for id in stop_ids {
            if self.stops[id].name.trim().is_empty() {
                return Err(NetworkError::EmptyName(format!("stop {id}")));
            }
        }

        let mut seen_ids: HashSet<&RouteId> = HashSet::new();
        let mut seen_colors: HashMap<RouteColor, &RouteId> = HashMap::new();

        for route in &self.routes {
            if !seen_ids.insert(&route.id) {
                return Err(NetworkError::DuplicateRoute(route.id.clone()));
            }

            if let Some(first) = seen_colors.insert(route.color, &route.id) {
                return Err(NetworkError::DuplicateColor {
                    first: first.clone(),
                    second: route.id.clone(),
                    color: route.color.to_string(),
                });
            }

            if route.name.trim().is_empty() {
                return Err(NetworkError::EmptyName(format!("route {}", route.id)));
            }

            if route.number == 0 {
                return Err(NetworkError::InvalidRouteNumber(route.id.clone()));
            }

            if route.is_empty() {
                return Err(NetworkError::EmptyRoute(route.id.clone()));
            }

            if let Some(missing) = route.stop_ids.iter().find(|s| !self.stops.contains_key(*s)) {
                return Err(NetworkError::UnknownStop {
                    route: route.id.clone(),
                    stop: missing.clone(),
                });
            }
        }

        Ok(())
    }

    /// All routes, in load order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// All stops, keyed by id.
    pub fn stops(&self) -> &HashMap<StopId, Stop> {
        &self.stops
    }

    /// Look up a stop by id.
    pub fn stop(&self, id: &str) -> Option<&Stop> {
        self.stops.get(id)
    }

    /// Look up a route by id.
    pub fn route(&self, id: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.id.as_str() == id)
    }

    /// Routes calling at `stop`, in load order.
    pub fn routes_serving<'a>(&'a self, stop: &'a str) -> impl Iterator<Item = &'a Route> + 'a {
        self.routes.iter().filter(move |r| r.serves(stop))
    }

    /// Number of routes.
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Number of stops.
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }
}
