//! Network loading and validation errors.

use std::path::PathBuf;

use crate::domain::{InvalidColor, InvalidRouteId, InvalidStopId, RouteId, StopId};

/// Errors that can occur when loading or validating a route network.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// Reading the data file failed
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Data file is not valid network JSON
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    InvalidStopId(#[from] InvalidStopId),

    #[error(transparent)]
    InvalidRouteId(#[from] InvalidRouteId),

    /// Route colour is not `#RRGGBB`
    #[error("route {route}: {source}")]
    InvalidColor {
        route: RouteId,
        #[source]
        source: InvalidColor,
    },

    /// Two stops share an id
    #[error("duplicate stop id: {0}")]
    DuplicateStop(StopId),

    /// Two routes share an id
    #[error("duplicate route id: {0}")]
    DuplicateRoute(RouteId),

    /// Two routes share a display colour
    #[error("routes {first} and {second} share colour {color}")]
    DuplicateColor {
        first: RouteId,
        second: RouteId,
        color: String,
    },

    /// A stop or route has a blank name
    #[error("{0} has an empty name")]
    EmptyName(String),

    /// Route numbers start at 1
    #[error("route {0} has invalid number 0")]
    InvalidRouteNumber(RouteId),

    /// Route has no stops
    #[error("route {0} has no stops")]
    EmptyRoute(RouteId),

    /// Route references a stop that doesn't exist
    #[error("route {route} references unknown stop {stop}")]
    UnknownStop { route: RouteId, stop: StopId },
}
