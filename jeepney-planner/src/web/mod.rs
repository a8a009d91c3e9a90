//! Web layer for the jeepney route planner.
//!
//! Provides HTTP endpoints for looking up stops and routes and planning trips.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
