//! Stop lookup by name and by position.

use crate::domain::Stop;

use super::Network;

impl Network {
    /// Search stops whose name contains `query`, ignoring case.
    ///
    /// A blank query matches every stop. Results are ordered by name (then
    /// id) and truncated to `limit`.
    pub fn search_stops(&self, query: &str, limit: usize) -> Vec<&Stop> {
        let needle = query.trim().to_lowercase();

        let mut matches: Vec<&Stop> = self
            .stops()
            .values()
            .filter(|s| needle.is_empty() || s.name.to_lowercase().contains(&needle))
            .collect();

        matches.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        matches.truncate(limit);
        matches
    }

    /// The stop closest to the given coordinates.
    ///
    /// Distance is squared planar degrees, which ranks correctly at city
    /// scale. Ties go to the lower stop id. Returns `None` if there are no
    /// stops.
    pub fn nearest_stop(&self, lat: f64, lng: f64) -> Option<&Stop> {
        self.stops().values().min_by(|a, b| {
            a.squared_distance_to(lat, lng)
                .total_cmp(&b.squared_distance_to(lat, lng))
                .then_with(|| a.id.cmp(&b.id))
        })
    }
}
