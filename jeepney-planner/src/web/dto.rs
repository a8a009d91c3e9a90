//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Route, RoutePlan, Stop, TransferStep};
use crate::network::Network;

/// Query for stop search.
#[derive(Debug, Deserialize)]
pub struct StopSearchRequest {
    /// Case-insensitive substring of the stop name
    #[serde(default)]
    pub q: String,

    /// Maximum results (default 10, capped at 50)
    pub limit: Option<usize>,
}

/// Query for the nearest stop to a point.
#[derive(Debug, Deserialize)]
pub struct NearestStopRequest {
    pub lat: f64,
    pub lng: f64,
}

/// Query to plan a trip.
#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    /// Origin stop id
    pub from: String,

    /// Destination stop id
    pub to: String,
}

/// A stop in API responses.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StopResult {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl StopResult {
    /// Create from a domain Stop.
    pub fn from_stop(stop: &Stop) -> Self {
        Self {
            id: stop.id.to_string(),
            name: stop.name.clone(),
            lat: stop.lat,
            lng: stop.lng,
        }
    }
}

/// Response for stop search.
#[derive(Debug, Serialize)]
pub struct StopSearchResponse {
    pub stops: Vec<StopResult>,
}

/// A route in API responses.
#[derive(Debug, Clone, Serialize)]
pub struct RouteResult {
    pub id: String,
    pub number: u32,
    pub name: String,

    /// Display colour, `#RRGGBB`
    pub color: String,

    /// Stop ids in stored order
    pub stop_ids: Vec<String>,
}

impl RouteResult {
    /// Create from a domain Route.
    pub fn from_route(route: &Route) -> Self {
        Self {
            id: route.id.to_string(),
            number: route.number,
            name: route.name.clone(),
            color: route.color.to_string(),
            stop_ids: route.stop_ids.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Response listing all routes.
#[derive(Debug, Serialize)]
pub struct RouteListResponse {
    pub routes: Vec<RouteResult>,
}

/// A stop together with the routes that call there.
#[derive(Debug, Serialize)]
pub struct StopDetailResponse {
    pub stop: StopResult,
    pub routes: Vec<RouteResult>,
}

/// One step of a plan.
#[derive(Debug, Clone, Serialize)]
pub struct StepResult {
    /// `ride` or `walk`
    #[serde(rename = "type")]
    pub kind: &'static str,

    /// Route ridden (rides only)
    pub route_id: Option<String>,

    pub from_stop_id: String,
    pub to_stop_id: String,

    /// Hops ridden (rides only)
    pub stop_count: Option<usize>,

    /// Stops passed through in travel order, both ends included
    pub stop_ids: Vec<String>,
}

impl StepResult {
    /// Create from a domain step, resolving the ridden segment against the network.
    pub fn from_step(step: &TransferStep, network: &Network) -> Self {
        let stop_ids = match step {
            TransferStep::Ride(ride) => network
                .route(ride.route.as_str())
                .and_then(|route| {
                    route.segment(ride.from.as_str(), ride.to.as_str(), ride.stop_count)
                })
                .map(|segment| segment.iter().map(|s| s.to_string()).collect())
                .unwrap_or_default(),
            TransferStep::Walk(walk) => vec![walk.from.to_string(), walk.to.to_string()],
        };

        Self {
            kind: if step.is_ride() { "ride" } else { "walk" },
            route_id: step.route().map(|r| r.to_string()),
            from_stop_id: step.from().to_string(),
            to_stop_id: step.to().to_string(),
            stop_count: step.stop_count(),
            stop_ids,
        }
    }
}

/// Response for trip planning.
#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub steps: Vec<StepResult>,
    pub total_transfers: usize,
    pub total_stops: usize,
}

impl PlanResponse {
    /// Create from a domain RoutePlan.
    pub fn from_plan(plan: &RoutePlan, network: &Network) -> Self {
        Self {
            steps: plan
                .steps()
                .iter()
                .map(|step| StepResult::from_step(step, network))
                .collect(),
            total_transfers: plan.total_transfers(),
            total_stops: plan.total_stops(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::domain::{Ride, RouteColor, RouteId, StopId, Walk};

    fn id(s: &str) -> StopId {
        StopId::parse(s).unwrap()
    }

    fn network() -> Network {
        let route = Route {
            id: RouteId::parse("route-1").unwrap(),
            number: 1,
            name: "Jaro - City Proper".to_string(),
            color: RouteColor::parse("#ef4444").unwrap(),
            stop_ids: vec![id("a"), id("b"), id("c"), id("d")],
        };
        let stops: HashMap<StopId, Stop> = ["a", "b", "c", "d"]
            .into_iter()
            .map(|s| (id(s), Stop::new(id(s), s.to_uppercase(), 10.7, 122.5)))
            .collect();
        Network::new(vec![route], stops)
    }

    #[test]
    fn route_result_from_route() {
        let network = network();
        let result = RouteResult::from_route(&network.routes()[0]);

        assert_eq!(result.id, "route-1");
        assert_eq!(result.number, 1);
        assert_eq!(result.color, "#EF4444");
        assert_eq!(result.stop_ids, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn plan_response_includes_segment_stops() {
        let network = network();
        let plan = RoutePlan::new(vec![TransferStep::Ride(Ride::new(
            RouteId::parse("route-1").unwrap(),
            id("d"),
            id("b"),
            2,
        ))])
        .unwrap();

        let response = PlanResponse::from_plan(&plan, &network);

        assert_eq!(response.total_transfers, 0);
        assert_eq!(response.total_stops, 2);
        let step = &response.steps[0];
        assert_eq!(step.kind, "ride");
        assert_eq!(step.route_id.as_deref(), Some("route-1"));
        assert_eq!(step.stop_count, Some(2));
        assert_eq!(step.stop_ids, vec!["d", "c", "b"]);
    }

    #[test]
    fn loop_route_segment_matches_stop_count() {
        let loop_route = Route {
            id: RouteId::parse("loop").unwrap(),
            number: 2,
            name: "Loop".to_string(),
            color: RouteColor::parse("#3B82F6").unwrap(),
            stop_ids: vec![id("a"), id("b"), id("c"), id("d"), id("a")],
        };
        let stops: HashMap<StopId, Stop> = ["a", "b", "c", "d"]
            .into_iter()
            .map(|s| (id(s), Stop::new(id(s), s.to_uppercase(), 10.7, 122.5)))
            .collect();
        let network = Network::new(vec![loop_route], stops);

        let plan =
            crate::planner::find_route("d", "a", network.routes(), network.stops()).unwrap();
        let response = PlanResponse::from_plan(&plan, &network);

        let step = &response.steps[0];
        assert_eq!(step.stop_count, Some(1));
        assert_eq!(step.stop_ids, vec!["d", "a"]);
    }

    #[test]
    fn walk_step_serialization() {
        let network = network();
        let step = StepResult::from_step(&TransferStep::Walk(Walk::new(id("a"), id("z"))), &network);

        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["type"], "walk");
        assert!(json["route_id"].is_null());
        assert!(json["stop_count"].is_null());
        assert_eq!(json["stop_ids"], serde_json::json!(["a", "z"]));
    }

    #[test]
    fn stop_search_limit_is_optional() {
        let req: StopSearchRequest = serde_json::from_str(r#"{"q":"jaro"}"#).unwrap();
        assert_eq!(req.q, "jaro");
        assert!(req.limit.is_none());

        let req: StopSearchRequest = serde_json::from_str("{}").unwrap();
        assert!(req.q.is_empty());
    }
}
