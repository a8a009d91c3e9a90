//! Domain types for the jeepney route planner.
//!
//! This module contains the reference data (stops and routes) and the
//! itinerary types the planner produces. Identifiers and colours enforce
//! their invariants at construction time, so code that receives these
//! types can trust their validity.

mod error;
mod plan;
mod route;
mod stop;

pub use error::DomainError;
pub use plan::{PlanCost, Ride, RoutePlan, TransferStep, Walk};
pub use route::{InvalidColor, InvalidRouteId, Route, RouteColor, RouteId};
pub use stop::{InvalidStopId, Stop, StopId};
