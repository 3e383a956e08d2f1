//! The rail network graph.
//!
//! Points are indexed densely by `PointId` and railroads by `RailroadId`.
//! Adjacency is symmetric: if A reaches B on a railroad then B reaches A on
//! the same railroad. The graph is read-only after `GraphBuilder::build` and is
//! shared between callers through `Arc`.

use std::collections::{BTreeMap, HashMap};

use super::point::{GeoCoord, Point, PointId, Railroad, RailroadId};
use super::rolltable::{RollTable, REGION_TABLE, ROLL_TABLE_ROWS};

/// Errors raised while assembling a network.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("unknown point index {0}")]
    UnknownPoint(PointId),

    #[error("unknown railroad '{0}'")]
    UnknownRailroad(String),

    #[error("unknown city '{0}'")]
    UnknownCity(String),

    #[error("duplicate railroad name '{0}'")]
    DuplicateRailroad(String),

    #[error("duplicate city name '{0}'")]
    DuplicateCity(String),

    #[error("railroad '{rr}' links point {point} to itself")]
    SelfLoop { rr: String, point: PointId },

    #[error("roll table '{table}' has {rows} rows, expected {expected}", expected = ROLL_TABLE_ROWS)]
    RollTableRows { table: String, rows: usize },

    #[error("missing roll table '{0}'")]
    MissingRollTable(String),

    #[error("too many railroads (limit {0})")]
    TooManyRailroads(usize),

    #[error("malformed map file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Immutable rail network.
#[derive(Debug, Clone)]
pub struct NetworkGraph {
    points: Vec<Point>,
    railroads: Vec<Railroad>,
    cities: HashMap<String, PointId>,
    roll_tables: BTreeMap<String, RollTable>,
}

impl NetworkGraph {
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, id: PointId) -> &Point {
        &self.points[id]
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn railroad(&self, id: RailroadId) -> &Railroad {
        &self.railroads[id.index()]
    }

    pub fn railroads(&self) -> &[Railroad] {
        &self.railroads
    }

    /// Looks up a railroad by its full or short name.
    pub fn railroad_by_name(&self, name: &str) -> Option<RailroadId> {
        self.railroads
            .iter()
            .find(|r| r.name == name || r.short_name == name)
            .map(|r| r.id)
    }

    /// Looks up a city point by any of its names (case-insensitive).
    pub fn lookup_city(&self, name: &str) -> Option<PointId> {
        self.cities.get(&name.to_lowercase()).copied()
    }

    /// Returns true if `rr` directly links `from` and `to`.
    pub fn is_linked(&self, rr: RailroadId, from: PointId, to: PointId) -> bool {
        from < self.points.len() && self.points[from].neighbors_on(rr).binary_search(&to).is_ok()
    }

    /// Great-circle distance between two points in miles.
    pub fn gc_distance(&self, a: PointId, b: PointId) -> f64 {
        self.points[a].coords.distance_miles(&self.points[b].coords)
    }

    /// All named cities, in index order.
    pub fn cities(&self) -> impl Iterator<Item = &Point> {
        self.points.iter().filter(|p| p.is_city())
    }

    pub fn roll_table(&self, name: &str) -> Option<&RollTable> {
        self.roll_tables.get(name)
    }

    /// Returns true if destinations are drawn from roll tables.
    pub fn has_roll_tables(&self) -> bool {
        !self.roll_tables.is_empty()
    }
}

/// Incremental constructor for a `NetworkGraph`.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    points: Vec<Point>,
    railroads: Vec<Railroad>,
    roll_tables: BTreeMap<String, RollTable>,
}

impl GraphBuilder {
    /// Adds a point and returns its index.
    pub fn add_point(&mut self, coords: GeoCoord, region: &str, city_names: &[&str]) -> PointId {
        let id = self.points.len();
        self.points.push(Point {
            id,
            coords,
            region: region.to_string(),
            city_names: city_names.iter().map(|s| s.to_string()).collect(),
            connections: BTreeMap::new(),
        });
        id
    }

    /// Adds a railroad and returns its id.
    pub fn add_railroad(&mut self, name: &str, short_name: &str, cost: i64) -> Result<RailroadId, MapError> {
        if self.railroads.iter().any(|r| r.name == name) {
            return Err(MapError::DuplicateRailroad(name.to_string()));
        }
        if self.railroads.len() >= u16::MAX as usize {
            return Err(MapError::TooManyRailroads(u16::MAX as usize));
        }
        let id = RailroadId(self.railroads.len() as u16);
        self.railroads.push(Railroad {
            id,
            name: name.to_string(),
            short_name: short_name.to_string(),
            cost,
        });
        Ok(id)
    }

    /// Links two points on a railroad in both directions.
    pub fn connect(&mut self, rr: RailroadId, a: PointId, b: PointId) -> Result<(), MapError> {
        let rr_name = match self.railroads.get(rr.index()) {
            Some(r) => r.name.clone(),
            None => return Err(MapError::UnknownRailroad(rr.to_string())),
        };
        for p in [a, b] {
            if p >= self.points.len() {
                return Err(MapError::UnknownPoint(p));
            }
        }
        if a == b {
            return Err(MapError::SelfLoop { rr: rr_name, point: a });
        }
        self.points[a].connections.entry(rr).or_default().push(b);
        self.points[b].connections.entry(rr).or_default().push(a);
        Ok(())
    }

    /// Links a chain of points pairwise on one railroad.
    pub fn connect_chain(&mut self, rr: RailroadId, chain: &[PointId]) -> Result<(), MapError> {
        for pair in chain.windows(2) {
            self.connect(rr, pair[0], pair[1])?;
        }
        Ok(())
    }

    /// Adds a destination roll table (see [`RollTable`]).
    pub fn add_roll_table(&mut self, name: &str, rows: Vec<(String, String)>) -> Result<(), MapError> {
        let count = rows.len();
        let table = RollTable::new(rows).ok_or_else(|| MapError::RollTableRows {
            table: name.to_string(),
            rows: count,
        })?;
        self.roll_tables.insert(name.to_string(), table);
        Ok(())
    }

    /// Finalizes the graph: sorts and dedups adjacency, indexes city names,
    /// and checks that roll tables lead from regions to known cities.
    pub fn build(mut self) -> Result<NetworkGraph, MapError> {
        let mut cities = HashMap::new();
        for p in &mut self.points {
            for pts in p.connections.values_mut() {
                pts.sort_unstable();
                pts.dedup();
            }
            for name in &p.city_names {
                if cities.insert(name.to_lowercase(), p.id).is_some() {
                    return Err(MapError::DuplicateCity(name.clone()));
                }
            }
        }
        if !self.roll_tables.is_empty() {
            let regions = self
                .roll_tables
                .get(REGION_TABLE)
                .ok_or_else(|| MapError::MissingRollTable(REGION_TABLE.to_string()))?;
            for region in regions.entries() {
                let table = self
                    .roll_tables
                    .get(region)
                    .ok_or_else(|| MapError::MissingRollTable(region.to_string()))?;
                if let Some(city) = table.entries().find(|c| !cities.contains_key(&c.to_lowercase())) {
                    return Err(MapError::UnknownCity(city.to_string()));
                }
            }
        }
        log::debug!(
            "built network: {} points, {} railroads, {} cities, {} roll tables",
            self.points.len(),
            self.railroads.len(),
            cities.len(),
            self.roll_tables.len()
        );
        Ok(NetworkGraph {
            points: self.points,
            railroads: self.railroads,
            cities,
            roll_tables: self.roll_tables,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_city_builder() -> (GraphBuilder, RailroadId) {
        let mut b = NetworkGraph::builder();
        b.add_point(GeoCoord::new(40.0, -100.0), "PLAINS", &["Denver"]);
        b.add_point(GeoCoord::new(41.0, -96.0), "PLAINS", &["Omaha"]);
        let rr = b.add_railroad("Union Pacific", "UP", 40_000).unwrap();
        (b, rr)
    }

    #[test]
    fn adjacency_is_symmetric() {
        let (mut b, rr) = two_city_builder();
        b.connect(rr, 0, 1).unwrap();
        let g = b.build().unwrap();
        assert!(g.is_linked(rr, 0, 1));
        assert!(g.is_linked(rr, 1, 0));
        for p in g.points() {
            for (rr, q) in p.links() {
                assert!(g.is_linked(rr, q, p.id));
            }
        }
    }

    #[test]
    fn duplicate_links_are_deduplicated() {
        let (mut b, rr) = two_city_builder();
        b.connect(rr, 0, 1).unwrap();
        b.connect(rr, 1, 0).unwrap();
        let g = b.build().unwrap();
        assert_eq!(g.point(0).neighbors_on(rr), &[1]);
    }

    #[test]
    fn rejects_self_loop_and_unknown_point() {
        let (mut b, rr) = two_city_builder();
        assert!(matches!(b.connect(rr, 0, 0), Err(MapError::SelfLoop { .. })));
        assert!(matches!(b.connect(rr, 0, 5), Err(MapError::UnknownPoint(5))));
        assert!(matches!(
            b.connect(RailroadId(9), 0, 1),
            Err(MapError::UnknownRailroad(_))
        ));
    }

    #[test]
    fn rejects_duplicate_names() {
        let (mut b, _) = two_city_builder();
        assert!(matches!(
            b.add_railroad("Union Pacific", "UP2", 1),
            Err(MapError::DuplicateRailroad(_))
        ));
        b.add_point(GeoCoord::new(0.0, 0.0), "PLAINS", &["omaha"]);
        assert!(matches!(b.build(), Err(MapError::DuplicateCity(_))));
    }

    #[test]
    fn city_lookup_is_case_insensitive() {
        let (b, rr) = two_city_builder();
        let g = b.build().unwrap();
        assert_eq!(g.lookup_city("DENVER"), Some(0));
        assert_eq!(g.lookup_city("Boise"), None);
        assert_eq!(g.railroad_by_name("UP"), Some(rr));
        assert_eq!(g.cities().count(), 2);
    }

    fn rows(first: &str, second: &str) -> Vec<(String, String)> {
        vec![(first.to_string(), second.to_string()); ROLL_TABLE_ROWS]
    }

    #[test]
    fn roll_tables_must_reach_known_cities() {
        let (mut b, _) = two_city_builder();
        b.add_roll_table(REGION_TABLE, rows("PLAINS", "PLAINS")).unwrap();
        b.add_roll_table("PLAINS", rows("Denver", "Omaha")).unwrap();
        let g = b.build().unwrap();
        assert!(g.has_roll_tables());
        assert_eq!(g.roll_table("PLAINS").map(|t| t.lookup(3, 4, 2)), Some("Omaha"));

        let (mut b, _) = two_city_builder();
        assert!(matches!(
            b.add_roll_table("PLAINS", vec![("Denver".into(), "Omaha".into())]),
            Err(MapError::RollTableRows { rows: 1, .. })
        ));
        b.add_roll_table("PLAINS", rows("Denver", "Omaha")).unwrap();
        assert!(matches!(b.build(), Err(MapError::MissingRollTable(t)) if t == REGION_TABLE));

        let (mut b, _) = two_city_builder();
        b.add_roll_table(REGION_TABLE, rows("PLAINS", "SOUTH")).unwrap();
        b.add_roll_table("PLAINS", rows("Denver", "Omaha")).unwrap();
        assert!(matches!(b.build(), Err(MapError::MissingRollTable(t)) if t == "SOUTH"));

        let (mut b, _) = two_city_builder();
        b.add_roll_table(REGION_TABLE, rows("PLAINS", "PLAINS")).unwrap();
        b.add_roll_table("PLAINS", rows("Denver", "Boise")).unwrap();
        assert!(matches!(b.build(), Err(MapError::UnknownCity(c)) if c == "Boise"));
    }
}
