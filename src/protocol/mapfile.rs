//! JSON map description.
//!
//! A map file lists railroads, points and the lines each railroad runs:
//!
//! ```json
//! {
//!   "railroads": [{ "name": "Union Pacific", "short_name": "UP", "cost": 40000 }],
//!   "points": [
//!     { "lat": 39.74, "lon": -104.99, "region": "PLAINS", "cities": ["Denver"] },
//!     { "lat": 41.26, "lon": -95.94, "region": "PLAINS", "cities": ["Omaha"] }
//!   ],
//!   "lines": [{ "railroad": "UP", "stops": ["Denver", 1] }],
//!   "roll_tables": {
//!     "REGION": [["PLAINS", "PLAINS"], ...],
//!     "PLAINS": [["Denver", "Omaha"], ...]
//!   }
//! }
//! ```
//!
//! Stops are point indices or city names; railroads are referenced by full or
//! short name. Roll tables are optional. When present each has 11 rows of
//! `[odd, even]` entries, one row per two-dice sum from 2 to 12.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::board::{GeoCoord, MapError, NetworkGraph, PointId, RailroadId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RailroadSpec {
    pub name: String,
    #[serde(default)]
    pub short_name: Option<String>,
    pub cost: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointSpec {
    pub lat: f64,
    pub lon: f64,
    pub region: String,
    #[serde(default)]
    pub cities: Vec<String>,
}

/// A stop on a line, by index or by city name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StopRef {
    Index(PointId),
    City(String),
}

/// A railroad running through `stops` in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSpec {
    pub railroad: String,
    pub stops: Vec<StopRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapSpec {
    pub railroads: Vec<RailroadSpec>,
    pub points: Vec<PointSpec>,
    #[serde(default)]
    pub lines: Vec<LineSpec>,
    /// Destination roll tables by name: `REGION` plus one per region.
    #[serde(default)]
    pub roll_tables: BTreeMap<String, Vec<(String, String)>>,
}

impl MapSpec {
    pub fn from_json(json: &str) -> Result<MapSpec, MapError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validates the description and builds the network.
    pub fn build(&self) -> Result<NetworkGraph, MapError> {
        let mut b = NetworkGraph::builder();
        let mut by_city: HashMap<String, PointId> = HashMap::new();
        for p in &self.points {
            let names: Vec<&str> = p.cities.iter().map(String::as_str).collect();
            let id = b.add_point(GeoCoord::new(p.lat, p.lon), &p.region, &names);
            for name in &p.cities {
                by_city.insert(name.to_lowercase(), id);
            }
        }

        let mut by_name: HashMap<&str, RailroadId> = HashMap::new();
        for r in &self.railroads {
            let short = r.short_name.as_deref().unwrap_or(&r.name);
            let id = b.add_railroad(&r.name, short, r.cost)?;
            by_name.insert(&r.name, id);
            by_name.entry(short).or_insert(id);
        }

        for line in &self.lines {
            let rr = *by_name
                .get(line.railroad.as_str())
                .ok_or_else(|| MapError::UnknownRailroad(line.railroad.clone()))?;
            let stops = line
                .stops
                .iter()
                .map(|stop| match stop {
                    StopRef::Index(i) => Ok(*i),
                    StopRef::City(name) => by_city
                        .get(&name.to_lowercase())
                        .copied()
                        .ok_or_else(|| MapError::UnknownCity(name.clone())),
                })
                .collect::<Result<Vec<PointId>, MapError>>()?;
            b.connect_chain(rr, &stops)?;
        }

        for (name, rows) in &self.roll_tables {
            b.add_roll_table(name, rows.clone())?;
        }
        b.build()
    }
}

/// Parses and builds a network from a JSON map description.
pub fn load_network(json: &str) -> Result<NetworkGraph, MapError> {
    MapSpec::from_json(json)?.build()
}
