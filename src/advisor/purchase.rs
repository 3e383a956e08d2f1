//! Purchase selection after a payoff.
//!
//! An option survives when the player can still pay for a bad next trip
//! afterwards. Among survivors the biggest engine wins; otherwise railroads
//! are scored by the points they open up for the player and close off for
//! opponents.

use std::collections::BTreeSet;

use rand::Rng;

use crate::board::{EngineTier, GameState, PlayerId, Purchase, RailroadId};
use crate::fees::TollContext;
use crate::sim::{risk_cost, simulate_trip_costs, CostModel, TripSampling};

use super::config::AdvisorConfig;

/// Scores buying `rr`: the price is subtracted, every served point where the
/// player owns no line yet adds `score_per_free_point`, and every served point
/// left with only opponents' lines adds `score_per_locked_point` for each
/// opponent who owns none of them.
pub fn railroad_score(state: &GameState, player: PlayerId, rr: RailroadId, price: i64, config: &AdvisorConfig) -> i64 {
    let cfg = &config.purchase;
    let own = &state.ownership;
    let mut score = -price;

    for point in state.graph.points().iter().filter(|p| p.served_by(rr)) {
        let mut lines: BTreeSet<RailroadId> = point.railroads().collect();
        if !lines.iter().any(|&r| own.is_owned_by(r, player)) {
            score += cfg.score_per_free_point;
        }
        lines.remove(&rr);

        let mut locked_out = vec![true; state.players.len()];
        locked_out[player] = false;
        lines.retain(|&r| match own.owner(r) {
            Some(other) if other != player => {
                locked_out[other] = false;
                false
            }
            _ => true,
        });
        if lines.is_empty() {
            let locked = locked_out.iter().filter(|&&l| l).count() as i64;
            score += cfg.score_per_locked_point * locked;
        }
    }
    score
}

/// Picks what `player` should buy, if anything.
///
/// `pending_fee` is the toll the player still owes this turn.
pub fn select_purchase(
    state: &GameState,
    player: PlayerId,
    pending_fee: i64,
    config: &AdvisorConfig,
    rng: &mut impl Rng,
) -> Option<Purchase> {
    let cfg = &config.purchase;
    let options = state.purchase_options(player);
    if options.is_empty() {
        return None;
    }

    let ps = state.player(player);
    let toll = TollContext::new(&state.ownership, &state.rules, player, state.players.len());
    let model = CostModel::new(toll, ps.engine);
    let sampling = TripSampling {
        destinations: cfg.destinations,
        rolls_per_destination: cfg.rolls_per_destination,
        max_paths: config.max_paths,
        path_trials: cfg.path_trials,
    };

    let mut affordable: Vec<(Purchase, i64)> = Vec::new();
    let mut has_engine = false;
    for (option, price) in options {
        let left = ps.bank - price - pending_fee;
        if left <= cfg.min_balance {
            continue;
        }
        if left > cfg.sim_threshold + cfg.min_balance {
            affordable.push((option, price));
            continue;
        }

        let costs = match option {
            Purchase::Engine(tier) => simulate_trip_costs(
                &model.with_engine(tier),
                &state.graph,
                ps.location(),
                None,
                ps.last_railroad,
                ps.established_rate,
                &sampling,
                rng,
            ),
            Purchase::Railroad(_) if has_engine => continue,
            Purchase::Railroad(rr) => {
                let bought = state.ownership.with_purchase(rr, player);
                let what_if = CostModel::new(toll.with_ownership(&bought), ps.engine);
                simulate_trip_costs(
                    &what_if,
                    &state.graph,
                    ps.location(),
                    None,
                    ps.last_railroad,
                    ps.established_rate,
                    &sampling,
                    rng,
                )
            }
        };
        let estimate = left - risk_cost(&costs, cfg.risk);
        if estimate > cfg.min_balance {
            has_engine |= option.is_engine();
            affordable.push((option, price));
        } else {
            log::info!("player {}: dropping {:?}, estimated balance {}", player, option, estimate);
        }
    }

    match affordable.as_slice() {
        [] => return None,
        [(only, _)] => return Some(*only),
        _ => {}
    }
    for tier in [EngineTier::Superchief, EngineTier::Express] {
        if affordable.iter().any(|(o, _)| *o == Purchase::Engine(tier)) {
            return Some(Purchase::Engine(tier));
        }
    }

    let mut best: Option<(i64, Purchase)> = None;
    for (option, price) in affordable {
        if let Purchase::Railroad(rr) = option {
            let score = railroad_score(state, player, rr, price, config);
            log::debug!("player {}: {} scores {}", player, state.graph.railroad(rr).name, score);
            if best.map_or(true, |(s, _)| score > s) {
                best = Some((score, option));
            }
        }
    }
    best.map(|(_, option)| option)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{testmaps, Rules};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn grid_game(bank: i64) -> GameState {
        let (g, _, _) = testmaps::grid();
        let mut state = GameState::new(Arc::new(g), Rules::default(), &[0, 8]);
        state.player_mut(0).bank = bank;
        state
    }

    #[test]
    fn nothing_affordable() {
        let state = grid_game(1_000);
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(select_purchase(&state, 0, 0, &AdvisorConfig::default(), &mut rng), None);
    }

    #[test]
    fn rich_player_buys_the_biggest_engine() {
        let state = grid_game(500_000);
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(
            select_purchase(&state, 0, 0, &AdvisorConfig::default(), &mut rng),
            Some(Purchase::Engine(EngineTier::Superchief))
        );
    }

    #[test]
    fn pending_fee_can_rule_out_an_option() {
        // Only Express is affordable; paying 8 000 in tolls first leaves too little.
        let state = grid_game(12_000);
        let mut rng = StdRng::seed_from_u64(42);
        let cfg = AdvisorConfig::default();
        assert_eq!(select_purchase(&state, 0, 8_000, &cfg, &mut rng), None);
    }

    #[test]
    fn simulation_keeps_a_safe_engine() {
        // 12 000 - 4 000 leaves 8 000; every trip on the bank's lines costs at
        // most 1 000 a turn, and grid trips take at most two turns.
        let state = grid_game(12_000);
        let mut cfg = AdvisorConfig::default();
        cfg.purchase.destinations = 20;
        cfg.purchase.rolls_per_destination = 5;
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(
            select_purchase(&state, 0, 0, &cfg, &mut rng),
            Some(Purchase::Engine(EngineTier::Express))
        );
    }

    #[test]
    fn railroad_scores_count_free_and_locked_points() {
        let (g, h, v) = testmaps::grid();
        let mut state = GameState::new(Arc::new(g), Rules::default(), &[0, 8]);
        let cfg = AdvisorConfig::default();
        // Nobody owns anything: every grid point is served by H and by V, so
        // buying H frees nine points and locks nobody out.
        assert_eq!(railroad_score(&state, 0, h, 20_000, &cfg), -20_000 + 9 * 200);

        // Player 1 owns V: each point keeps V for player 1, nobody locked out.
        state.ownership.set_owner(v, Some(1));
        assert_eq!(railroad_score(&state, 0, h, 20_000, &cfg), -20_000 + 9 * 200);

        // Player 0 owns V: no free points, and with H gone every point is left
        // with player 0's line only.
        state.ownership.set_owner(v, Some(0));
        assert_eq!(railroad_score(&state, 0, h, 20_000, &cfg), -20_000);
    }

    #[test]
    fn locking_out_an_opponent_scores() {
        // 0 - 1 on H, 1 - 2 on the option S.
        let mut b = crate::board::NetworkGraph::builder();
        for _ in 0..3 {
            b.add_point(crate::board::GeoCoord::new(0.0, 0.0), "EAST", &[]);
        }
        let h = b.add_railroad("H", "H", 1).unwrap();
        let s = b.add_railroad("S", "S", 1).unwrap();
        b.connect(h, 0, 1).unwrap();
        b.connect(s, 1, 2).unwrap();
        let g = b.build().unwrap();
        let mut state = GameState::new(Arc::new(g), Rules::default(), &[0, 0, 0]);
        let cfg = AdvisorConfig::default();

        // Buying S: point 2 (only S) is free and locks both opponents out;
        // point 1 keeps the bank's H, so nothing is locked there.
        assert_eq!(railroad_score(&state, 0, s, 100, &cfg), -100 + 2 * 200 + 2 * 150);

        // Once player 1 owns H, point 1 locks out player 2 only.
        state.ownership.set_owner(h, Some(1));
        assert_eq!(railroad_score(&state, 0, s, 100, &cfg), -100 + 2 * 200 + 2 * 150 + 150);
    }
}
