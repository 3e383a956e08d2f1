//! Map points and railroads.
//!
//! A point is either a named city or a plain junction. Each point records the
//! neighbours it reaches on every railroad that serves it. Points are built
//! once by `GraphBuilder` and never mutated afterwards.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Dense index of a point in the network.
pub type PointId = usize;

/// Dense index of a player at the table.
pub type PlayerId = usize;

/// Dense index of a railroad in the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RailroadId(pub u16);

impl RailroadId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RailroadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rr{}", self.0)
    }
}

/// Latitude/longitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoord {
    pub lat: f64,
    pub lon: f64,
}

/// Mean earth radius in statute miles.
const EARTH_RADIUS_MILES: f64 = 3958.8;

impl GeoCoord {
    pub const fn new(lat: f64, lon: f64) -> Self {
        GeoCoord { lat, lon }
    }

    /// Great-circle distance in miles (haversine).
    pub fn distance_miles(&self, other: &GeoCoord) -> f64 {
        let (lat1, lat2) = (self.lat.to_radians(), other.lat.to_radians());
        let dlat = lat2 - lat1;
        let dlon = (other.lon - self.lon).to_radians();
        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_MILES * a.sqrt().asin()
    }
}

/// A railroad that can be bought from the bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Railroad {
    pub id: RailroadId,
    pub name: String,
    pub short_name: String,
    /// Purchase price from the bank.
    pub cost: i64,
}

/// A point on the rail network.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub id: PointId,
    pub coords: GeoCoord,
    pub region: String,
    /// City names served by this point. Empty for plain junctions; pairs like
    /// "San Francisco"/"Oakland" share one point.
    pub city_names: Vec<String>,
    pub(crate) connections: BTreeMap<RailroadId, Vec<PointId>>,
}

impl Point {
    /// Returns true if this point is a named city.
    pub fn is_city(&self) -> bool {
        !self.city_names.is_empty()
    }

    /// Name for displays: the first city name, or the point index.
    pub fn display_name(&self) -> String {
        match self.city_names.first() {
            Some(name) => name.clone(),
            None => format!("#{}", self.id),
        }
    }

    /// Railroads serving this point, in id order.
    pub fn railroads(&self) -> impl Iterator<Item = RailroadId> + '_ {
        self.connections.keys().copied()
    }

    /// Returns true if the railroad serves this point.
    pub fn served_by(&self, rr: RailroadId) -> bool {
        self.connections.contains_key(&rr)
    }

    /// Neighbours reached on one railroad (sorted, empty if not served).
    pub fn neighbors_on(&self, rr: RailroadId) -> &[PointId] {
        self.connections.get(&rr).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All (railroad, neighbour) pairs leaving this point.
    pub fn links(&self) -> impl Iterator<Item = (RailroadId, PointId)> + '_ {
        self.connections
            .iter()
            .flat_map(|(rr, pts)| pts.iter().map(move |&p| (*rr, p)))
    }

    /// Distinct neighbours over all railroads.
    pub fn connected_points(&self) -> Vec<PointId> {
        let mut pts: Vec<PointId> = self.connections.values().flatten().copied().collect();
        pts.sort_unstable();
        pts.dedup();
        pts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_symmetric_and_zero_on_self() {
        let chicago = GeoCoord::new(41.88, -87.63);
        let st_louis = GeoCoord::new(38.63, -90.20);
        let d1 = chicago.distance_miles(&st_louis);
        let d2 = st_louis.distance_miles(&chicago);
        assert!((d1 - d2).abs() < 1e-9);
        assert!(chicago.distance_miles(&chicago).abs() < 1e-9);
        // Roughly 260 miles as the crow flies.
        assert!((240.0..280.0).contains(&d1), "got {}", d1);
    }

    #[test]
    fn junction_display_name_uses_index() {
        let p = Point {
            id: 7,
            coords: GeoCoord::new(0.0, 0.0),
            region: "PLAINS".into(),
            city_names: Vec::new(),
            connections: BTreeMap::new(),
        };
        assert!(!p.is_city());
        assert_eq!(p.display_name(), "#7");
    }

    #[test]
    fn links_and_connected_points() {
        let mut connections = BTreeMap::new();
        connections.insert(RailroadId(0), vec![1, 2]);
        connections.insert(RailroadId(3), vec![2]);
        let p = Point {
            id: 0,
            coords: GeoCoord::new(0.0, 0.0),
            region: "PLAINS".into(),
            city_names: vec!["Omaha".into()],
            connections,
        };
        let links: Vec<_> = p.links().collect();
        assert_eq!(links, vec![(RailroadId(0), 1), (RailroadId(0), 2), (RailroadId(3), 2)]);
        assert_eq!(p.connected_points(), vec![1, 2]);
        assert!(p.served_by(RailroadId(3)));
        assert!(p.neighbors_on(RailroadId(9)).is_empty());
    }
}
