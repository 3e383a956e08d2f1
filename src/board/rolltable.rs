//! Destination roll tables.
//!
//! A table has one row per two-dice sum, 2 through 12. Each row names two
//! entries and a third die picks between them: the first on an odd roll, the
//! second on an even one. The `REGION` table names regions, and every region
//! has a table of its own naming cities.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Name of the table that picks a region.
pub const REGION_TABLE: &str = "REGION";

/// Rows in a table, one per two-dice sum.
pub const ROLL_TABLE_ROWS: usize = 11;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollTable {
    rows: Vec<(String, String)>,
}

impl RollTable {
    /// Returns `None` unless there is exactly one row per two-dice sum.
    pub fn new(rows: Vec<(String, String)>) -> Option<Self> {
        (rows.len() == ROLL_TABLE_ROWS).then_some(RollTable { rows })
    }

    /// Entry for dice `d1 + d2` and parity die `d3` (each 1 to 6).
    pub fn lookup(&self, d1: u8, d2: u8, d3: u8) -> &str {
        let (odd, even) = &self.rows[usize::from(d1 + d2 - 2)];
        if d3 % 2 == 0 {
            even
        } else {
            odd
        }
    }

    pub fn roll(&self, rng: &mut impl Rng) -> &str {
        self.lookup(rng.gen_range(1..=6), rng.gen_range(1..=6), rng.gen_range(1..=6))
    }

    /// Probability of each entry. An entry named on several rows adds up.
    pub fn odds(&self) -> BTreeMap<&str, f64> {
        let mut odds = BTreeMap::new();
        for (i, (odd, even)) in self.rows.iter().enumerate() {
            // Row 5 is a sum of 7, the likeliest.
            let p = (6.0 - (i as f64 - 5.0).abs()) / 36.0;
            *odds.entry(odd.as_str()).or_insert(0.0) += p / 2.0;
            *odds.entry(even.as_str()).or_insert(0.0) += p / 2.0;
        }
        odds
    }

    /// Every name the table can produce, each once.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        let mut names: Vec<&str> = self.rows.iter().flat_map(|(a, b)| [a.as_str(), b.as_str()]).collect();
        names.sort_unstable();
        names.dedup();
        names.into_iter()
    }
}
