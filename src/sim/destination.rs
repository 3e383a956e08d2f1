//! Where a player's next trip is likely to head.

use std::collections::BTreeMap;

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::board::{NetworkGraph, PointId, REGION_TABLE};

/// Probability of each city being the next destination drawn from `from`.
///
/// With roll tables a region is rolled, rerolling the region of `from`, and
/// then a city of that region. Without them every city outside the region of
/// `from` is equally likely, or every other city when all of them share it.
pub fn destination_odds(graph: &NetworkGraph, from: PointId) -> BTreeMap<PointId, f64> {
    let rolled = rolled_odds(graph, from);
    if !rolled.is_empty() {
        return rolled;
    }

    let region = &graph.point(from).region;
    let mut pool: Vec<PointId> = graph.cities().filter(|p| &p.region != region).map(|p| p.id).collect();
    if pool.is_empty() {
        pool = graph.cities().map(|p| p.id).filter(|&p| p != from).collect();
    }
    let p = 1.0 / pool.len() as f64;
    pool.into_iter().map(|pt| (pt, p)).collect()
}

fn rolled_odds(graph: &NetworkGraph, from: PointId) -> BTreeMap<PointId, f64> {
    let mut odds = BTreeMap::new();
    let Some(regions) = graph.roll_table(REGION_TABLE) else {
        return odds;
    };
    let home = graph.point(from).region.as_str();
    let abroad: Vec<(&str, f64)> = regions.odds().into_iter().filter(|&(r, _)| r != home).collect();
    let total: f64 = abroad.iter().map(|&(_, p)| p).sum();
    if total <= 0.0 {
        return odds;
    }
    for (region, p) in abroad {
        let Some(cities) = graph.roll_table(region) else {
            continue;
        };
        for (city, q) in cities.odds() {
            if let Some(pt) = graph.lookup_city(city) {
                *odds.entry(pt).or_insert(0.0) += p / total * q;
            }
        }
    }
    odds
}

/// Draws `count` next destinations from `from`, returned as draws per city.
pub fn draw_destinations(
    graph: &NetworkGraph,
    from: PointId,
    count: usize,
    rng: &mut impl Rng,
) -> BTreeMap<PointId, usize> {
    let odds = destination_odds(graph, from);
    let mut draws = BTreeMap::new();
    let points: Vec<PointId> = odds.keys().copied().collect();
    let Ok(weights) = WeightedIndex::new(odds.values()) else {
        log::warn!("no destination can be drawn from {}", from);
        return draws;
    };
    for _ in 0..count {
        *draws.entry(points[weights.sample(rng)]).or_insert(0) += 1;
    }
    draws
}
