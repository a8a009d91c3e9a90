//! Stop identifiers and stop records.

use std::borrow::Borrow;
use std::fmt;

/// Error returned when parsing an invalid stop id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop id {input:?}: {reason}")]
pub struct InvalidStopId {
    input: String,
    reason: &'static str,
}

/// An opaque stop identifier, e.g. `city-proper`.
///
/// Stop ids are non-empty and contain no whitespace. Beyond that they are
/// opaque: the planner only ever compares them for equality.
///
/// # Examples
///
/// ```
/// use jeepney_planner::domain::StopId;
///
/// let id = StopId::parse("jaro-plaza").unwrap();
/// assert_eq!(id.as_str(), "jaro-plaza");
///
/// assert!(StopId::parse("").is_err());
/// assert!(StopId::parse("jaro plaza").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopId(String);

impl StopId {
    /// Parse a stop id from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidStopId> {
        if s.is_empty() {
            return Err(InvalidStopId {
                input: s.to_string(),
                reason: "must not be empty",
            });
        }

        if s.chars().any(char::is_whitespace) {
            return Err(InvalidStopId {
                input: s.to_string(),
                reason: "must not contain whitespace",
            });
        }

        Ok(StopId(s.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for StopId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named, geolocated point where jeepneys can be boarded or alighted.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub id: StopId,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl Stop {
    /// Creates a new stop.
    pub fn new(id: StopId, name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            id,
            name: name.into(),
            lat,
            lng,
        }
    }

    /// Squared planar distance in degrees to the given point.
    ///
    /// Only good for ranking stops that are close together; the planner
    /// itself never looks at coordinates.
    pub fn squared_distance_to(&self, lat: f64, lng: f64) -> f64 {
        let dlat = self.lat - lat;
        let dlng = self.lng - lng;
        dlat * dlat + dlng * dlng
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_ids() {
        assert!(StopId::parse("city-proper").is_ok());
        assert!(StopId::parse("cpu").is_ok());
        assert!(StopId::parse("s1").is_ok());
        assert!(StopId::parse("Bo.Obrero").is_ok());
    }

    #[test]
    fn reject_empty() {
        let err = StopId::parse("").unwrap_err();
        assert_eq!(err.to_string(), "invalid stop id \"\": must not be empty");
    }

    #[test]
    fn reject_whitespace() {
        assert!(StopId::parse("city proper").is_err());
        assert!(StopId::parse(" cpu").is_err());
        assert!(StopId::parse("cpu\n").is_err());
        assert!(StopId::parse("a\tb").is_err());
    }

    #[test]
    fn display_and_debug() {
        let id = StopId::parse("la-paz").unwrap();
        assert_eq!(format!("{}", id), "la-paz");
        assert_eq!(format!("{:?}", id), "StopId(la-paz)");
    }

    #[test]
    fn map_lookup_by_str() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(StopId::parse("molo-plaza").unwrap(), 1);
        assert_eq!(map.get("molo-plaza"), Some(&1));
        assert_eq!(map.get("jaro-plaza"), None);
    }

    #[test]
    fn squared_distance() {
        let stop = Stop::new(StopId::parse("a").unwrap(), "A", 10.0, 122.0);
        assert_eq!(stop.squared_distance_to(10.0, 122.0), 0.0);
        let d = stop.squared_distance_to(10.3, 122.4);
        assert!((d - 0.25).abs() < 1e-9);
    }
}
