//! Route types.

use std::borrow::Borrow;
use std::fmt;

use super::StopId;

/// Error returned when parsing an invalid route id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid route id {input:?}: {reason}")]
pub struct InvalidRouteId {
    input: String,
    reason: &'static str,
}

/// An opaque route identifier, e.g. `route-3`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId(String);

impl RouteId {
    /// Parse a route id from a string.
    ///
    /// Same rules as [`StopId::parse`]: non-empty, no whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidRouteId> {
        if s.is_empty() {
            return Err(InvalidRouteId {
                input: s.to_string(),
                reason: "must not be empty",
            });
        }

        if s.chars().any(char::is_whitespace) {
            return Err(InvalidRouteId {
                input: s.to_string(),
                reason: "must not contain whitespace",
            });
        }

        Ok(RouteId(s.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RouteId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteId({})", self.0)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error returned when parsing an invalid display colour.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid colour {0:?}: expected #RRGGBB")]
pub struct InvalidColor(String);

/// A route's display colour, always `#RRGGBB`.
///
/// # Examples
///
/// ```
/// use jeepney_planner::domain::RouteColor;
///
/// let blue = RouteColor::parse("#3b82f6").unwrap();
/// assert_eq!(blue.to_string(), "#3B82F6");
///
/// assert!(RouteColor::parse("3B82F6").is_err());
/// assert!(RouteColor::parse("#3B82F").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteColor([u8; 3]);

impl RouteColor {
    /// Parse a `#RRGGBB` colour. Hex digits may be either case.
    pub fn parse(s: &str) -> Result<Self, InvalidColor> {
        let invalid = || InvalidColor(s.to_string());

        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(RouteColor([channel(0)?, channel(2)?, channel(4)?]))
    }

    /// Returns the (red, green, blue) channels.
    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.0[0], self.0[1], self.0[2])
    }
}

impl fmt::Display for RouteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0[0], self.0[1], self.0[2])
    }
}

/// A jeepney line: an ordered sequence of stops travelled in one canonical
/// direction.
///
/// Riders may travel either way along the stored order. The stop list is
/// kept exactly as loaded, including any repeated ids.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub id: RouteId,
    pub number: u32,
    pub name: String,
    pub color: RouteColor,
    pub stop_ids: Vec<StopId>,
}

impl Route {
    /// Index of the first occurrence of `stop` in the stop list.
    pub fn position(&self, stop: &str) -> Option<usize> {
        self.stop_ids.iter().position(|s| s.as_str() == stop)
    }

    /// Returns true if this route calls at `stop`.
    pub fn serves(&self, stop: &str) -> bool {
        self.position(stop).is_some()
    }

    /// Number of entries in the stop list.
    pub fn len(&self) -> usize {
        self.stop_ids.len()
    }

    /// Returns true if the route has no stops.
    pub fn is_empty(&self) -> bool {
        self.stop_ids.is_empty()
    }

    /// The stops ridden from `from` to `to`, both inclusive, in travel order.
    ///
    /// The ride boards at the first occurrence of `from` and covers
    /// `stop_count` hops, so on a route that repeats `to` the right
    /// occurrence is picked. Travelling against the stored order yields the
    /// reversed slice. Returns `None` if `from` is not on the route or `to`
    /// is not `stop_count` hops away from it.
    pub fn segment(&self, from: &str, to: &str, stop_count: usize) -> Option<Vec<&StopId>> {
        let from_idx = self.position(from)?;
        let is_to = |idx: usize| self.stop_ids.get(idx).is_some_and(|s| s.as_str() == to);

        let forward = from_idx + stop_count;
        if is_to(forward) {
            return Some(self.stop_ids[from_idx..=forward].iter().collect());
        }

        let backward = from_idx.checked_sub(stop_count).filter(|&idx| is_to(idx))?;
        Some(self.stop_ids[backward..=from_idx].iter().rev().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(ids: &[&str]) -> Route {
        Route {
            id: RouteId::parse("route-1").unwrap(),
            number: 1,
            name: "Test".to_string(),
            color: RouteColor::parse("#3B82F6").unwrap(),
            stop_ids: ids.iter().map(|s| StopId::parse(s).unwrap()).collect(),
        }
    }

    #[test]
    fn route_id_validation() {
        assert!(RouteId::parse("route-25").is_ok());
        assert!(RouteId::parse("").is_err());
        assert!(RouteId::parse("route 1").is_err());
        assert_eq!(
            format!("{:?}", RouteId::parse("route-2").unwrap()),
            "RouteId(route-2)"
        );
    }

    #[test]
    fn color_parse_and_display() {
        let c = RouteColor::parse("#ef4444").unwrap();
        assert_eq!(c.rgb(), (0xEF, 0x44, 0x44));
        assert_eq!(c.to_string(), "#EF4444");
    }

    #[test]
    fn color_rejects_malformed() {
        assert!(RouteColor::parse("").is_err());
        assert!(RouteColor::parse("#").is_err());
        assert!(RouteColor::parse("#12345").is_err());
        assert!(RouteColor::parse("#1234567").is_err());
        assert!(RouteColor::parse("#GGGGGG").is_err());
        assert!(RouteColor::parse("EF4444").is_err());
        assert!(RouteColor::parse("#+12345").is_err());
    }

    #[test]
    fn position_finds_first_occurrence() {
        let r = route(&["a", "b", "c", "b"]);
        assert_eq!(r.position("a"), Some(0));
        assert_eq!(r.position("b"), Some(1));
        assert_eq!(r.position("z"), None);
        assert!(r.serves("c"));
        assert!(!r.serves("z"));
        assert_eq!(r.len(), 4);
    }

    fn ids(seg: Vec<&StopId>) -> Vec<&str> {
        seg.into_iter().map(StopId::as_str).collect()
    }

    #[test]
    fn segment_forward() {
        let r = route(&["a", "b", "c", "d"]);
        assert_eq!(ids(r.segment("b", "d", 2).unwrap()), vec!["b", "c", "d"]);
    }

    #[test]
    fn segment_reverse() {
        let r = route(&["a", "b", "c", "d"]);
        assert_eq!(ids(r.segment("d", "a", 3).unwrap()), vec!["d", "c", "b", "a"]);
    }

    #[test]
    fn segment_on_loop_follows_hop_count() {
        let r = route(&["a", "b", "c", "d", "a"]);
        assert_eq!(ids(r.segment("d", "a", 1).unwrap()), vec!["d", "a"]);
        assert_eq!(ids(r.segment("d", "a", 3).unwrap()), vec!["d", "c", "b", "a"]);
        assert_eq!(ids(r.segment("a", "d", 3).unwrap()), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn segment_unknown_stop() {
        let r = route(&["a", "b"]);
        assert!(r.segment("a", "z", 1).is_none());
        assert!(r.segment("z", "a", 1).is_none());
    }

    #[test]
    fn segment_wrong_hop_count() {
        let r = route(&["a", "b", "c"]);
        assert!(r.segment("a", "c", 1).is_none());
        assert!(r.segment("c", "a", 5).is_none());
    }
}
