//! Caching layer for route plans.
//!
//! The network is immutable once loaded, so a plan for a given
//! (origin, destination) pair never changes. Entries still expire so that
//! memory stays bounded under a scan of every pair. Negative results are
//! cached too: an unreachable pair costs a full search.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::{RoutePlan, StopId};
use crate::network::Network;
use crate::planner::{Planner, SearchConfig};

/// Cache key: (origin, destination).
type PlanKey = (StopId, StopId);

/// Cached plan, or `None` when no route connects the pair.
type PlanEntry = Option<Arc<RoutePlan>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Cache of planner answers keyed by stop pair.
pub struct PlanCache {
    plans: MokaCache<PlanKey, PlanEntry>,
}

impl PlanCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let plans = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { plans }
    }

    /// Return the cached plan for the pair, searching on a miss.
    ///
    /// Concurrent misses for the same key run the search once.
    pub async fn get_or_search(
        &self,
        network: &Network,
        config: &SearchConfig,
        origin: &StopId,
        destination: &StopId,
    ) -> PlanEntry {
        let key = (origin.clone(), destination.clone());

        self.plans
            .get_with(key, async {
                debug!(%origin, %destination, "Plan cache miss");
                Planner::new(network, config)
                    .find(origin.as_str(), destination.as_str())
                    .map(Arc::new)
            })
            .await
    }

    /// Get a cached entry without searching.
    pub async fn get(&self, origin: &StopId, destination: &StopId) -> Option<PlanEntry> {
        self.plans
            .get(&(origin.clone(), destination.clone()))
            .await
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.plans.invalidate_all();
    }
}
