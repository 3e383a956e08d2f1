//! Monte-Carlo toll cost estimates.
//!
//! A route's toll depends on where each turn's roll happens to end, since the
//! bank and every other owner are paid at most once per turn. The estimates
//! here replay a fixed route under random rolls and report per-trial costs.

use std::collections::BTreeMap;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::board::{EngineTier, NetworkGraph, PointId, RailroadId, SegmentLedger, Waypoint};
use crate::fees::{calculate_tolls, EstablishedRate, TollContext};
use crate::search::{reduce_paths, shortest_paths, Path};

use super::destination::draw_destinations;
use super::dice::roll_distance;

/// Continuations this short are settled exactly instead of simulated.
const EXACT_TAIL_HOPS: usize = 2;

/// Everything needed to price a route for one player.
#[derive(Debug, Clone, Copy)]
pub struct CostModel<'a> {
    pub toll: TollContext<'a>,
    pub engine: EngineTier,
}

impl<'a> CostModel<'a> {
    pub fn new(toll: TollContext<'a>, engine: EngineTier) -> Self {
        CostModel { toll, engine }
    }

    pub fn with_engine(self, engine: EngineTier) -> Self {
        CostModel { engine, ..self }
    }

    /// Rides `path` once per trial under random rolls and returns the sorted
    /// per-trial costs. Each turn's chunk is settled as its own toll window,
    /// starting on the railroad the previous chunk ended on.
    pub fn simulate_rolls(
        &self,
        path: &[Waypoint],
        start_rr: Option<RailroadId>,
        rate: Option<EstablishedRate>,
        trials: usize,
        rng: &mut impl Rng,
    ) -> Vec<i64> {
        let mut costs: Vec<i64> = (0..trials)
            .map(|_| {
                let mut rest = path;
                let mut rr = start_rr;
                let mut rate = rate;
                let mut cost = 0;
                while !rest.is_empty() {
                    let step = roll_distance(self.engine, rng).min(rest.len());
                    let (chunk, tail) = rest.split_at(step);
                    let outcome = calculate_tolls(&self.toll, chunk, rr, rate);
                    cost += outcome.cost_for(self.toll.player);
                    rate = outcome.rate;
                    rr = chunk.last().map(|wp| wp.railroad);
                    rest = tail;
                }
                cost
            })
            .collect();
        costs.sort_unstable();
        costs
    }

    /// Mean simulated cost of riding `path`, rounded down.
    pub fn mean_cost(
        &self,
        path: &[Waypoint],
        start_rr: Option<RailroadId>,
        rate: Option<EstablishedRate>,
        trials: usize,
        rng: &mut impl Rng,
    ) -> i64 {
        if trials == 0 {
            return 0;
        }
        let costs = self.simulate_rolls(path, start_rr, rate, trials, rng);
        costs.iter().sum::<i64>() / trials as i64
    }

    /// Cost of taking `path` with `distance` moves left this turn.
    ///
    /// The part ridden this turn is settled exactly together with the moves
    /// already made (`turn`). The rest is settled exactly when it is at most
    /// two hops, otherwise estimated with `trials` simulated rides.
    #[allow(clippy::too_many_arguments)]
    pub fn path_cost(
        &self,
        path: &[Waypoint],
        distance: usize,
        turn: &[Waypoint],
        start_rr: Option<RailroadId>,
        rate: Option<EstablishedRate>,
        trials: usize,
        rng: &mut impl Rng,
    ) -> i64 {
        let (now, later) = path.split_at(distance.min(path.len()));
        let mut window = turn.to_vec();
        window.extend_from_slice(now);
        let fixed = calculate_tolls(&self.toll, &window, start_rr, rate);
        let mut cost = fixed.cost_for(self.toll.player);

        if !later.is_empty() {
            let rr = window.last().map(|wp| wp.railroad).or(start_rr);
            cost += if later.len() <= EXACT_TAIL_HOPS {
                calculate_tolls(&self.toll, later, rr, fixed.rate).cost_for(self.toll.player)
            } else {
                self.mean_cost(later, rr, fixed.rate, trials, rng)
            };
        }
        cost
    }
}

/// The cost exceeded in only a `risk` fraction of trials.
///
/// `sorted` must be ascending. Returns 0 for an empty sample.
pub fn risk_cost(sorted: &[i64], risk: f64) -> i64 {
    if sorted.is_empty() {
        return 0;
    }
    let idx = ((1.0 - risk) * sorted.len() as f64).floor() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

/// How many future trips to sample and how hard to look at each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripSampling {
    pub destinations: usize,
    pub rolls_per_destination: usize,
    /// Candidate routes kept per destination before picking the cheapest.
    pub max_paths: usize,
    /// Trials used to price each candidate route.
    pub path_trials: usize,
}

/// Cheapest candidate route from `from` to `to` for a trip starting fresh.
fn cheapest_route(
    model: &CostModel<'_>,
    graph: &NetworkGraph,
    from: PointId,
    to: PointId,
    start_rr: Option<RailroadId>,
    rate: Option<EstablishedRate>,
    sampling: &TripSampling,
    rng: &mut impl Rng,
) -> Option<Path> {
    let paths = shortest_paths(graph, from, to, &SegmentLedger::new(), 0);
    let paths = reduce_paths(paths, sampling.max_paths, &[], rng);
    paths
        .into_iter()
        .map(|p| {
            let cost = model.path_cost(&p, 0, &[], start_rr, rate, sampling.path_trials, rng);
            (cost, p)
        })
        .min_by_key(|(cost, _)| *cost)
        .map(|(_, p)| p)
}

/// Simulates the toll cost of the player's next trips from `from`.
///
/// Destinations are drawn with [`draw_destinations`] (or fixed to
/// `destination`); each is ridden along its cheapest route
/// `rolls_per_destination` times. Distinct destinations are simulated in
/// parallel, each from a generator seeded off `rng`, so a seeded caller gets
/// reproducible results. Returns all trial costs, ascending.
#[allow(clippy::too_many_arguments)]
pub fn simulate_trip_costs(
    model: &CostModel<'_>,
    graph: &NetworkGraph,
    from: PointId,
    destination: Option<PointId>,
    start_rr: Option<RailroadId>,
    rate: Option<EstablishedRate>,
    sampling: &TripSampling,
    rng: &mut impl Rng,
) -> Vec<i64> {
    let draws: BTreeMap<PointId, usize> = match destination {
        Some(dest) => BTreeMap::from([(dest, sampling.destinations)]),
        None => draw_destinations(graph, from, sampling.destinations, rng),
    };
    let jobs: Vec<(PointId, usize, u64)> = draws.into_iter().map(|(dest, n)| (dest, n, rng.gen())).collect();

    let mut costs: Vec<i64> = jobs
        .into_par_iter()
        .flat_map_iter(|(dest, n, seed)| {
            let mut rng = SmallRng::seed_from_u64(seed);
            match cheapest_route(model, graph, from, dest, start_rr, rate, sampling, &mut rng) {
                Some(route) => {
                    model.simulate_rolls(&route, start_rr, rate, n * sampling.rolls_per_destination, &mut rng)
                }
                None => {
                    log::warn!("no route from {} to sampled destination {}", from, dest);
                    Vec::new()
                }
            }
        })
        .collect();
    costs.sort_unstable();

    log::debug!(
        "simulated {} trips from {} ({} destinations)",
        costs.len(),
        from,
        sampling.destinations
    );
    costs
}
