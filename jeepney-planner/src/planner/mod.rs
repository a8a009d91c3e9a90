//! Route planner using best-first search.
//!
//! This module implements the core algorithm that answers: "how do I get
//! from this stop to that one by jeepney?" It minimises the number of
//! transfers first and the number of stops ridden second, treating every
//! route as rideable in both directions along its stored stop order.

mod config;
mod index;
mod search;

pub use config::{SearchConfig, VisitPolicy};
pub use index::{RouteIndex, StopRoutes};
pub use search::{Planner, SearchError, SearchResult, find_route};
