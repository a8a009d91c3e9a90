//! Best-first route search.
//!
//! A search state is "boarded route R, standing at stop S". States are
//! expanded cheapest-first by (transfers, stops ridden): each expansion
//! rides R away from S in both directions along its stop list, recording a
//! plan when the destination is reached and queueing a transfer state at
//! every stop where another route can be boarded.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::{debug, trace, warn};

use crate::domain::{PlanCost, Ride, Route, RouteId, RoutePlan, Stop, StopId, TransferStep};
use crate::network::Network;

use super::config::{SearchConfig, VisitPolicy};
use super::index::{RouteIndex, StopRoutes};

/// Error from route search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// No plan connects the two stops.
    ///
    /// Also returned when origin equals destination or either stop is
    /// unknown; callers needing to tell these apart must check the stop ids
    /// themselves.
    #[error("no route found from {origin} to {destination}")]
    NoPathFound { origin: String, destination: String },
}

/// Result of a successful search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The best plan found.
    pub plan: RoutePlan,

    /// Number of states expanded.
    pub states_expanded: usize,

    /// True if the search hit `max_expansions` before the frontier emptied.
    pub truncated: bool,
}

/// Find the best plan from `origin` to `destination`.
///
/// Plans are compared by transfers first, then by stops ridden. Returns
/// `None` when origin equals destination, when either stop is missing from
/// `stops` or served by no route, and when no chain of routes connects
/// them.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use jeepney_planner::domain::{Route, RouteColor, RouteId, Stop, StopId};
/// use jeepney_planner::planner::find_route;
///
/// let id = |s: &str| StopId::parse(s).unwrap();
/// let route = Route {
///     id: RouteId::parse("route-1").unwrap(),
///     number: 1,
///     name: "Loop".into(),
///     color: RouteColor::parse("#3B82F6").unwrap(),
///     stop_ids: vec![id("a"), id("b"), id("c")],
/// };
/// let stops: HashMap<StopId, Stop> = ["a", "b", "c"]
///     .into_iter()
///     .map(|s| (id(s), Stop::new(id(s), s, 0.0, 0.0)))
///     .collect();
///
/// let plan = find_route("c", "a", &[route], &stops).unwrap();
/// assert_eq!(plan.total_transfers(), 0);
/// assert_eq!(plan.total_stops(), 2);
/// ```
pub fn find_route(
    origin: &str,
    destination: &str,
    routes: &[Route],
    stops: &HashMap<StopId, Stop>,
) -> Option<RoutePlan> {
    run(origin, destination, routes, stops, &SearchConfig::default()).plan
}

/// Route planner over a loaded network.
#[derive(Debug, Clone, Copy)]
pub struct Planner<'a> {
    network: &'a Network,
    config: &'a SearchConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(network: &'a Network, config: &'a SearchConfig) -> Self {
        Self { network, config }
    }

    /// Search for the best plan from `origin` to `destination`.
    pub fn search(&self, origin: &str, destination: &str) -> Result<SearchResult, SearchError> {
        let outcome = run(
            origin,
            destination,
            self.network.routes(),
            self.network.stops(),
            self.config,
        );

        match outcome.plan {
            Some(plan) => Ok(SearchResult {
                plan,
                states_expanded: outcome.states_expanded,
                truncated: outcome.truncated,
            }),
            None => Err(SearchError::NoPathFound {
                origin: origin.to_string(),
                destination: destination.to_string(),
            }),
        }
    }

    /// Like [`Planner::search`], discarding search statistics.
    pub fn find(&self, origin: &str, destination: &str) -> Option<RoutePlan> {
        self.search(origin, destination).ok().map(|r| r.plan)
    }
}

/// Raw search outcome, before absence is turned into an error.
#[derive(Debug, Default)]
struct Outcome {
    plan: Option<RoutePlan>,
    states_expanded: usize,
    truncated: bool,
}

/// A boarding event: (stop, route).
type Boarding<'a> = (&'a str, &'a str);

/// Search state: standing at `stop` with `route` boarded.
#[derive(Debug, Clone)]
struct SearchState<'a> {
    stop: &'a StopId,
    route: &'a RouteId,
    cost: PlanCost,
    steps: Vec<TransferStep>,
}

impl<'a> SearchState<'a> {
    /// A state boarding `route` at the origin with nothing ridden yet.
    fn initial(stop: &'a StopId, route: &'a RouteId) -> Self {
        Self {
            stop,
            route,
            cost: PlanCost::default(),
            steps: Vec::new(),
        }
    }

    fn boarding(&self) -> Boarding<'a> {
        (self.stop.as_str(), self.route.as_str())
    }

    /// The ride on the boarded route from here to `to`.
    fn ride_to(&self, to: &StopId, stop_count: usize) -> TransferStep {
        TransferStep::Ride(Ride::new(
            self.route.clone(),
            self.stop.clone(),
            to.clone(),
            stop_count,
        ))
    }

    /// Steps taken so far followed by `last`.
    fn steps_with(&self, last: TransferStep) -> Vec<TransferStep> {
        let mut steps = Vec::with_capacity(self.steps.len() + 1);
        steps.extend(self.steps.iter().cloned());
        steps.push(last);
        steps
    }
}

/// Frontier entry. Ordered so that `BinaryHeap` pops the lowest cost first,
/// and among equal costs the earliest queued.
#[derive(Debug)]
struct Queued<'a> {
    seq: u64,
    state: SearchState<'a>,
}

impl PartialEq for Queued<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Queued<'_> {}

impl PartialOrd for Queued<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .state
            .cost
            .cmp(&self.state.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Priority queue of states keyed by (transfers, stops, insertion order).
#[derive(Debug, Default)]
struct Frontier<'a> {
    heap: BinaryHeap<Queued<'a>>,
    next_seq: u64,
}

impl<'a> Frontier<'a> {
    fn push(&mut self, state: SearchState<'a>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Queued { seq, state });
    }

    fn pop(&mut self) -> Option<SearchState<'a>> {
        self.heap.pop().map(|q| q.state)
    }
}

/// Tracks which boardings may still be queued or expanded.
#[derive(Debug)]
enum Visited<'a> {
    OnCreate(HashSet<Boarding<'a>>),
    OnSettle {
        settled: HashSet<Boarding<'a>>,
        best: HashMap<Boarding<'a>, PlanCost>,
    },
}

impl<'a> Visited<'a> {
    fn new(policy: VisitPolicy) -> Self {
        match policy {
            VisitPolicy::OnCreate => Visited::OnCreate(HashSet::new()),
            VisitPolicy::OnSettle => Visited::OnSettle {
                settled: HashSet::new(),
                best: HashMap::new(),
            },
        }
    }

    /// Called when a state is about to be queued. Returns false to drop it.
    fn admit(&mut self, boarding: Boarding<'a>, cost: PlanCost) -> bool {
        match self {
            Visited::OnCreate(seen) => seen.insert(boarding),
            Visited::OnSettle { settled, best } => {
                if settled.contains(&boarding) {
                    return false;
                }
                match best.get(&boarding) {
                    Some(known) if *known <= cost => false,
                    _ => {
                        best.insert(boarding, cost);
                        true
                    }
                }
            }
        }
    }

    /// Called when a state is dequeued. Returns false if it is stale.
    fn settle(&mut self, boarding: Boarding<'a>, cost: PlanCost) -> bool {
        match self {
            Visited::OnCreate(_) => true,
            Visited::OnSettle { settled, best } => {
                if best.get(&boarding).is_some_and(|known| *known < cost) {
                    return false;
                }
                settled.insert(boarding)
            }
        }
    }
}

/// One search over a route list.
struct Search<'a> {
    destination: &'a StopId,
    stop_routes: StopRoutes<'a>,
    route_index: RouteIndex<'a>,
    visited: Visited<'a>,
    frontier: Frontier<'a>,
    best: Option<RoutePlan>,
}

impl<'a> Search<'a> {
    /// Expand one state: ride its route both ways from its stop.
    fn expand(&mut self, state: &SearchState<'a>) {
        let Some(route) = self.route_index.get(state.route.as_str()) else {
            return;
        };
        let Some(current) = route.position(state.stop.as_str()) else {
            return;
        };

        trace!(
            stop = %state.stop,
            route = %state.route,
            transfers = state.cost.transfers,
            stops = state.cost.stops,
            "Expanding state"
        );

        let stops = &route.stop_ids;
        self.ride(state, stops[current + 1..].iter());
        self.ride(state, stops[..current].iter().rev());
    }

    /// Ride away from the state's stop through `ahead`, one stop at a time.
    fn ride(&mut self, state: &SearchState<'a>, ahead: impl Iterator<Item = &'a StopId>) {
        for (hops, next) in (1..).zip(ahead) {
            let stops = state.cost.stops + hops;

            if next == self.destination {
                self.record(state, next, hops);
                break;
            }

            for &transfer in self.stop_routes.routes_at(next.as_str()) {
                if transfer == state.route {
                    continue;
                }

                let cost = PlanCost::new(state.cost.transfers + 1, stops);
                if !self.visited.admit((next.as_str(), transfer.as_str()), cost) {
                    continue;
                }

                self.frontier.push(SearchState {
                    stop: next,
                    route: transfer,
                    cost,
                    steps: state.steps_with(state.ride_to(next, hops)),
                });
            }
        }
    }

    /// Keep the plan ending with a ride to the destination if it beats the best so far.
    fn record(&mut self, state: &SearchState<'a>, destination: &StopId, hops: usize) {
        let cost = PlanCost::new(state.cost.transfers, state.cost.stops + hops);
        if self.best.as_ref().is_some_and(|best| best.cost() <= cost) {
            return;
        }

        match RoutePlan::new(state.steps_with(state.ride_to(destination, hops))) {
            Ok(plan) => self.best = Some(plan),
            Err(e) => debug!(error = %e, "Discarding malformed candidate plan"),
        }
    }

    /// True if the state can no longer improve on the best plan.
    fn can_prune(&self, state: &SearchState<'a>) -> bool {
        self.best
            .as_ref()
            .is_some_and(|best| state.cost >= best.cost())
    }
}

fn run(
    origin: &str,
    destination: &str,
    routes: &[Route],
    stops: &HashMap<StopId, Stop>,
    config: &SearchConfig,
) -> Outcome {
    let mut outcome = Outcome::default();

    if origin == destination {
        return outcome;
    }

    let (Some((origin_id, _)), Some((destination_id, _))) =
        (stops.get_key_value(origin), stops.get_key_value(destination))
    else {
        return outcome;
    };

    let stop_routes = StopRoutes::build(routes);
    if !stop_routes.serves(origin) || !stop_routes.serves(destination) {
        return outcome;
    }

    let mut search = Search {
        destination: destination_id,
        route_index: RouteIndex::build(routes),
        visited: Visited::new(config.visit_policy),
        frontier: Frontier::default(),
        best: None,
        stop_routes,
    };

    for &route in search.stop_routes.routes_at(origin) {
        if search
            .visited
            .admit((origin_id.as_str(), route.as_str()), PlanCost::default())
        {
            search.frontier.push(SearchState::initial(origin_id, route));
        }
    }

    while let Some(state) = search.frontier.pop() {
        if search.can_prune(&state) {
            continue;
        }

        if !search.visited.settle(state.boarding(), state.cost) {
            continue;
        }

        if outcome.states_expanded >= config.max_expansions {
            warn!(
                origin,
                destination,
                max_expansions = config.max_expansions,
                "Search hit expansion limit, returning best plan so far"
            );
            outcome.truncated = true;
            break;
        }

        outcome.states_expanded += 1;
        search.expand(&state);
    }

    debug!(
        origin,
        destination,
        states_expanded = outcome.states_expanded,
        found = search.best.is_some(),
        transfers = search.best.as_ref().map(RoutePlan::total_transfers),
        stops = search.best.as_ref().map(RoutePlan::total_stops),
        "Route search complete"
    );

    outcome.plan = search.best;
    outcome
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
