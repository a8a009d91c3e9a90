use std::net::SocketAddr;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use jeepney_planner::cache::{CacheConfig, PlanCache};
use jeepney_planner::network::Network;
use jeepney_planner::planner::SearchConfig;
use jeepney_planner::web::{AppState, create_router};

const DEFAULT_DATA: &str = "data/iloilo.json";
const DEFAULT_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_STATIC: &str = "static";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let data_path = std::env::var("JEEPNEY_DATA").unwrap_or_else(|_| DEFAULT_DATA.to_string());
    let static_dir = std::env::var("JEEPNEY_STATIC").unwrap_or_else(|_| DEFAULT_STATIC.to_string());
    let addr: SocketAddr = std::env::var("JEEPNEY_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()
        .expect("JEEPNEY_ADDR must be a socket address, e.g. 127.0.0.1:3000");

    // Load and validate the network (fail fast if unusable)
    let network = Network::load(&data_path).expect("Failed to load route network");

    let mut search_config = SearchConfig::default();
    if let Ok(raw) = std::env::var("JEEPNEY_MAX_EXPANSIONS") {
        match raw.parse() {
            Ok(max) => search_config.max_expansions = max,
            Err(e) => warn!(value = %raw, error = %e, "Ignoring invalid JEEPNEY_MAX_EXPANSIONS"),
        }
    }

    let cache = PlanCache::new(&CacheConfig::default());
    let state = AppState::new(network, search_config, cache);
    let app = create_router(state, &static_dir);

    info!(%addr, "Jeepney Route Planner listening");
    println!();
    println!("Open http://{addr} in your browser for the web interface.");
    println!();
    println!("API Endpoints:");
    println!("  GET  /health              - Health check");
    println!("  GET  /api/stops?q=        - Search stops by name");
    println!("  GET  /api/stops/nearest   - Nearest stop to lat/lng");
    println!("  GET  /api/stops/:id       - Stop and the routes serving it");
    println!("  GET  /api/routes          - All routes");
    println!("  GET  /plan?from=&to=      - Plan a trip");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
