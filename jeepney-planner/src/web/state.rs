//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::PlanCache;
use crate::network::Network;
use crate::planner::SearchConfig;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Loaded route network
    pub network: Arc<Network>,

    /// Route planner configuration
    pub config: Arc<SearchConfig>,

    /// Plans already computed, by (origin, destination)
    pub cache: Arc<PlanCache>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(network: Network, config: SearchConfig, cache: PlanCache) -> Self {
        Self {
            network: Arc::new(network),
            config: Arc::new(config),
            cache: Arc::new(cache),
        }
    }
}
