//! Search configuration for the route planner.

/// When a (stop, route) boarding is marked as seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisitPolicy {
    /// Mark a boarding the moment a state for it is queued.
    ///
    /// The first queued occurrence of a boarding wins even if a cheaper
    /// path to it turns up later, so among plans with equal transfers the
    /// stop count is only minimal over what the search kept.
    #[default]
    OnCreate,

    /// Mark a boarding when its state is dequeued.
    ///
    /// A queued boarding is replaced whenever a strictly cheaper path to it
    /// is found, which makes the returned plan optimal over all plans.
    OnSettle,
}

/// Configuration parameters for route search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum number of states to expand before giving up.
    /// The best plan found so far is still returned.
    pub max_expansions: usize,

    /// How revisits of a (stop, route) boarding are handled.
    pub visit_policy: VisitPolicy,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(max_expansions: usize, visit_policy: VisitPolicy) -> Self {
        Self {
            max_expansions,
            visit_policy,
        }
    }

    /// Returns this configuration with a different visit policy.
    pub fn with_visit_policy(mut self, visit_policy: VisitPolicy) -> Self {
        self.visit_policy = visit_policy;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_expansions: 100_000,
            visit_policy: VisitPolicy::OnCreate,
        }
    }
}
