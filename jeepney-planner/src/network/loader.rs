//! Loading a network from JSON.
//!
//! The on-disk format is a single document holding every route and stop.
//! Records are deserialised into plain DTOs first and then converted into
//! validated domain types.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{Route, RouteColor, RouteId, Stop, StopId};

use super::{Network, NetworkError};

/// Top-level network document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkFile {
    pub routes: Vec<RouteRecord>,
    pub stops: Vec<StopRecord>,
}

/// A route as stored on disk.
///
/// Extra fields such as map waypoints are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRecord {
    pub id: String,
    pub number: u32,
    pub name: String,
    /// Hex colour, e.g. "#3B82F6"
    pub color: String,
    /// Ordered stop ids along the route
    pub stop_ids: Vec<String>,
}

/// A stop as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopRecord {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl Network {
    /// Load and validate a network from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, NetworkError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| NetworkError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let network = Self::from_json(&contents)?;
        info!(
            path = %path.display(),
            routes = network.route_count(),
            stops = network.stop_count(),
            "Loaded route network"
        );
        Ok(network)
    }

    /// Parse and validate a network from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, NetworkError> {
        let file: NetworkFile = serde_json::from_str(json)?;
        Self::from_file(file)
    }

    /// Convert a deserialised document into a validated network.
    pub fn from_file(file: NetworkFile) -> Result<Self, NetworkError> {
        let mut stops = HashMap::with_capacity(file.stops.len());
        for record in file.stops {
            let stop = convert_stop(record)?;
            if stops.contains_key(&stop.id) {
                return Err(NetworkError::DuplicateStop(stop.id));
            }
            stops.insert(stop.id.clone(), stop);
        }

        let routes = file
            .routes
            .into_iter()
            .map(convert_route)
            .collect::<Result<Vec<_>, _>>()?;

        let network = Network::new(routes, stops);
        network.validate()?;
        Ok(network)
    }
}

fn convert_stop(record: StopRecord) -> Result<Stop, NetworkError> {
    let id = StopId::parse(&record.id)?;
    Ok(Stop::new(id, record.name, record.lat, record.lng))
}

fn convert_route(record: RouteRecord) -> Result<Route, NetworkError> {
    let id = RouteId::parse(&record.id)?;
    let color = RouteColor::parse(&record.color).map_err(|source| NetworkError::InvalidColor {
        route: id.clone(),
        source,
    })?;
    let stop_ids = record
        .stop_ids
        .iter()
        .map(|s| StopId::parse(s))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Route {
        id,
        number: record.number,
        name: record.name,
        color,
        stop_ids,
    })
}
