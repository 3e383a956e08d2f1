//! The declare decision.

use rand::Rng;

use crate::board::{GameState, PlayerId};
use crate::fees::TollContext;
use crate::sim::{risk_cost, simulate_trip_costs, CostModel, TripSampling};

use super::config::AdvisorConfig;

/// Whether `player` should declare for home now.
///
/// A player far above the winning cash declares outright. Otherwise the trip
/// home is simulated and the player declares only if a bad ride home still
/// leaves the winning cash.
pub fn recommend_declare(state: &GameState, player: PlayerId, config: &AdvisorConfig, rng: &mut impl Rng) -> bool {
    let cfg = &config.declare;
    let ps = state.player(player);
    let cash_to_win = state.rules.cash_to_win;
    if ps.bank * 100 >= cash_to_win * cfg.sure_win_percent {
        return true;
    }
    if ps.bank < cash_to_win {
        return false;
    }

    let toll = TollContext::new(&state.ownership, &state.rules, player, state.players.len());
    let model = CostModel::new(toll, ps.engine);
    let sampling = TripSampling {
        destinations: 1,
        rolls_per_destination: cfg.rolls,
        max_paths: config.max_paths,
        path_trials: config.purchase.path_trials,
    };
    let costs = simulate_trip_costs(
        &model,
        &state.graph,
        ps.location(),
        Some(ps.home),
        ps.last_railroad,
        ps.established_rate,
        &sampling,
        rng,
    );
    if costs.is_empty() {
        log::warn!("player {}: no route home from {}", player, ps.location());
        return false;
    }

    let ride_home = risk_cost(&costs, cfg.risk);
    log::info!(
        "player {}: bank {} against {} to win plus {} for the ride home",
        player,
        ps.bank,
        cash_to_win,
        ride_home
    );
    ps.bank - ride_home >= cash_to_win
}
