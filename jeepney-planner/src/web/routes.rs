//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, Uri, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::domain::StopId;
use crate::planner::SearchError;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Default number of stop search results.
const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Upper bound on stop search results.
const MAX_SEARCH_LIMIT: usize = 50;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/stops", get(search_stops))
        .route("/api/stops/nearest", get(nearest_stop))
        .route("/api/stops/:id", get(stop_detail))
        .route("/api/routes", get(list_routes))
        .route("/plan", get(plan_trip))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found_page)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the trip form.
async fn index_page(State(state): State<AppState>) -> impl IntoResponse {
    let template = IndexTemplate {
        stops: StopOption::all(&state.network),
    };
    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// HTML page for unknown paths.
async fn not_found_page(uri: Uri) -> impl IntoResponse {
    let template = ErrorTemplate {
        title: "Page not found".to_string(),
        message: "There is nothing at this address.".to_string(),
        details: Some(uri.path().to_string()),
    };
    let html = template
        .render()
        .unwrap_or_else(|e| format!("Template error: {}", e));
    (StatusCode::NOT_FOUND, Html(html))
}

/// Search stops by name.
async fn search_stops(
    State(state): State<AppState>,
    Query(req): Query<StopSearchRequest>,
) -> Json<StopSearchResponse> {
    let limit = req.limit.unwrap_or(DEFAULT_SEARCH_LIMIT).min(MAX_SEARCH_LIMIT);
    let stops = state
        .network
        .search_stops(&req.q, limit)
        .into_iter()
        .map(StopResult::from_stop)
        .collect();

    Json(StopSearchResponse { stops })
}

/// The stop closest to a point.
async fn nearest_stop(
    State(state): State<AppState>,
    Query(req): Query<NearestStopRequest>,
) -> Result<Json<StopResult>, AppError> {
    if !req.lat.is_finite() || !req.lng.is_finite() {
        return Err(AppError::BadRequest {
            message: format!("Invalid coordinates: {}, {}", req.lat, req.lng),
        });
    }

    state
        .network
        .nearest_stop(req.lat, req.lng)
        .map(|stop| Json(StopResult::from_stop(stop)))
        .ok_or_else(|| AppError::NotFound {
            message: "No stops loaded".to_string(),
        })
}

/// A stop and the routes that serve it.
async fn stop_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StopDetailResponse>, AppError> {
    let stop = state.network.stop(&id).ok_or_else(|| AppError::NotFound {
        message: format!("Unknown stop: {}", id),
    })?;

    let routes = state
        .network
        .routes_serving(&id)
        .map(RouteResult::from_route)
        .collect();

    Ok(Json(StopDetailResponse {
        stop: StopResult::from_stop(stop),
        routes,
    }))
}

/// All routes, in load order.
async fn list_routes(State(state): State<AppState>) -> Json<RouteListResponse> {
    let routes = state
        .network
        .routes()
        .iter()
        .map(RouteResult::from_route)
        .collect();

    Json(RouteListResponse { routes })
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Plan a trip between two stops.
async fn plan_trip(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<PlanRequest>,
) -> Result<Response, AppError> {
    let origin = StopId::parse(req.from.trim()).map_err(|e| AppError::BadRequest {
        message: format!("Invalid origin: {e}"),
    })?;
    let destination = StopId::parse(req.to.trim()).map_err(|e| AppError::BadRequest {
        message: format!("Invalid destination: {e}"),
    })?;

    let plan = state
        .cache
        .get_or_search(&state.network, &state.config, &origin, &destination)
        .await
        .ok_or_else(|| SearchError::NoPathFound {
            origin: origin.to_string(),
            destination: destination.to_string(),
        })?;

    info!(
        %origin,
        %destination,
        transfers = plan.total_transfers(),
        stops = plan.total_stops(),
        "Planned trip"
    );

    // Return HTML or JSON based on Accept header
    if accepts_html(&headers) {
        let template = PlanResultsTemplate {
            plan: PlanView::from_plan(&plan, &state.network),
        };
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

        Ok(Html(html).into_response())
    } else {
        Ok(Json(PlanResponse::from_plan(&plan, &state.network)).into_response())
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::NoPathFound { .. } => AppError::NotFound {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message.clone()),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::body::to_bytes;
    use axum::http::HeaderValue;
    use serde_json::Value;

    use super::*;
    use crate::cache::{CacheConfig, PlanCache};
    use crate::domain::{Route, RouteColor, RouteId, Stop};
    use crate::network::Network;
    use crate::planner::SearchConfig;

    fn id(s: &str) -> StopId {
        StopId::parse(s).unwrap()
    }

    fn route(id_: &str, number: u32, color: &str, stops: &[&str]) -> Route {
        Route {
            id: RouteId::parse(id_).unwrap(),
            number,
            name: format!("Route {number}"),
            color: RouteColor::parse(color).unwrap(),
            stop_ids: stops.iter().map(|s| id(s)).collect(),
        }
    }

    fn state() -> AppState {
        let routes = vec![
            route("route-1", 1, "#EF4444", &["s1", "s2", "s3", "s4"]),
            route("route-2", 2, "#3B82F6", &["s3", "s5", "s6"]),
        ];
        let stops: HashMap<StopId, Stop> = [
            ("s1", "Jaro Plaza", 10.72, 122.56),
            ("s2", "Jaro Cathedral", 10.73, 122.56),
            ("s3", "City Proper", 10.69, 122.57),
            ("s4", "Fort San Pedro", 10.69, 122.58),
            ("s5", "Molo Plaza", 10.68, 122.55),
            ("s6", "Arevalo", 10.69, 122.52),
            ("lonely", "Nowhere", 11.0, 123.0),
        ]
        .into_iter()
        .map(|(s, name, lat, lng)| (id(s), Stop::new(id(s), name, lat, lng)))
        .collect();

        AppState::new(
            Network::new(routes, stops),
            SearchConfig::default(),
            PlanCache::new(&CacheConfig::default()),
        )
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn plan_query(from: &str, to: &str) -> Query<PlanRequest> {
        Query(PlanRequest {
            from: from.to_string(),
            to: to.to_string(),
        })
    }

    #[test]
    fn accepts_html_detection() {
        let mut headers = HeaderMap::new();
        assert!(!accepts_html(&headers));

        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        assert!(!accepts_html(&headers));

        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml"),
        );
        assert!(accepts_html(&headers));
    }

    #[tokio::test]
    async fn plan_as_json() {
        let response = plan_trip(State(state()), HeaderMap::new(), plan_query("s1", "s6"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["total_transfers"], 1);
        assert_eq!(body["total_stops"], 4);
        assert_eq!(body["steps"][0]["route_id"], "route-1");
        assert_eq!(body["steps"][0]["to_stop_id"], "s3");
        assert_eq!(body["steps"][1]["route_id"], "route-2");
        assert_eq!(
            body["steps"][1]["stop_ids"],
            serde_json::json!(["s3", "s5", "s6"])
        );
    }

    #[tokio::test]
    async fn plan_as_html() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("text/html"));

        let response = plan_trip(State(state()), headers, plan_query("s6", "s1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("1 transfer"));
        assert!(html.contains("Arevalo"));
        assert!(html.contains("Jaro Plaza"));
    }

    #[tokio::test]
    async fn plan_not_found() {
        let err = plan_trip(State(state()), HeaderMap::new(), plan_query("s1", "lonely"))
            .await
            .unwrap_err();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = json_body(response).await;
        assert_eq!(body["error"], "no route found from s1 to lonely");
    }

    #[tokio::test]
    async fn plan_same_stop_is_not_found() {
        let err = plan_trip(State(state()), HeaderMap::new(), plan_query("s2", "s2"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn plan_bad_id() {
        let err = plan_trip(State(state()), HeaderMap::new(), plan_query("", "s1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn search_by_name() {
        let Json(response) = search_stops(
            State(state()),
            Query(StopSearchRequest {
                q: "jaro".to_string(),
                limit: None,
            }),
        )
        .await;

        let names: Vec<&str> = response.stops.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Jaro Cathedral", "Jaro Plaza"]);
    }

    #[tokio::test]
    async fn search_limit_is_capped() {
        let Json(response) = search_stops(
            State(state()),
            Query(StopSearchRequest {
                q: String::new(),
                limit: Some(2),
            }),
        )
        .await;
        assert_eq!(response.stops.len(), 2);

        let Json(response) = search_stops(
            State(state()),
            Query(StopSearchRequest {
                q: String::new(),
                limit: Some(1000),
            }),
        )
        .await;
        assert_eq!(response.stops.len(), 7);
    }

    #[tokio::test]
    async fn nearest() {
        let Json(stop) = nearest_stop(
            State(state()),
            Query(NearestStopRequest {
                lat: 10.681,
                lng: 122.551,
            }),
        )
        .await
        .unwrap();
        assert_eq!(stop.id, "s5");

        let err = nearest_stop(
            State(state()),
            Query(NearestStopRequest {
                lat: f64::NAN,
                lng: 122.0,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn stop_with_serving_routes() {
        let Json(detail) = stop_detail(State(state()), Path("s3".to_string()))
            .await
            .unwrap();
        assert_eq!(detail.stop.name, "City Proper");
        let routes: Vec<&str> = detail.routes.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(routes, vec!["route-1", "route-2"]);

        let err = stop_detail(State(state()), Path("nope".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn routes_listed_in_order() {
        let Json(response) = list_routes(State(state())).await;
        let numbers: Vec<u32> = response.routes.iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(response.routes[1].color, "#3B82F6");
    }

    #[tokio::test]
    async fn unknown_path_page() {
        let response = not_found_page(Uri::from_static("/nowhere"))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Page not found"));
        assert!(html.contains("/nowhere"));
    }

    #[tokio::test]
    async fn index_lists_stops() {
        let response = index_page(State(state())).await.into_response();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Fort San Pedro"));
        assert!(html.contains(r#"value="s4""#));
    }

    #[tokio::test]
    async fn health_check() {
        assert_eq!(health().await, "ok");
    }
}
