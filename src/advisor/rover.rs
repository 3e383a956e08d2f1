//! Rover interception.
//!
//! A declared player caught on their way home pays a rover fee and loses
//! their declared status, so a nearby declared opponent is worth a detour
//! when it costs only a few extra hops.

use rand::Rng;

use crate::board::{GameState, PointId, SegmentLedger, Waypoint};
use crate::error::RuleViolation;
use crate::search::network_distance;

use super::config::AdvisorConfig;
use super::plan::{plan_moves, MoveRequest};

/// The declared opponent nearest to `from` as the crow flies.
fn nearest_declared(state: &GameState, req: &MoveRequest, from: PointId) -> Option<PointId> {
    state
        .declared_opponents(req.player)
        .map(|(_, at)| at)
        .min_by(|&a, &b| {
            let da = state.graph.gc_distance(from, a);
            let db = state.graph.gc_distance(from, b);
            da.total_cmp(&db)
        })
}

/// Tries to route this move through a declared opponent.
///
/// Returns `Ok(None)` when no interception is worth making this turn.
fn try_intercept(
    state: &GameState,
    req: &MoveRequest,
    config: &AdvisorConfig,
    rng: &mut impl Rng,
) -> Result<Option<Vec<Waypoint>>, RuleViolation> {
    let ps = state.player(req.player);
    let dest = req
        .destination
        .or_else(|| ps.target())
        .ok_or(RuleViolation::NoDestination(req.player))?;
    let from = req.forced.last().map(|wp| wp.to).unwrap_or_else(|| ps.location());
    let Some(intercept) = nearest_declared(state, req, from) else {
        return Ok(None);
    };
    if intercept == from {
        return Ok(None);
    }

    let toward = MoveRequest {
        destination: Some(intercept),
        ..req.clone()
    };
    let rover_path = plan_moves(state, &toward, config.rover_flex, config, rng)?;
    if rover_path.last().map(|wp| wp.to) != Some(intercept) {
        log::debug!("player {}: rover target {} out of reach this turn", req.player, intercept);
        return Ok(None);
    }

    let before = SegmentLedger::replay(ps.start, &ps.history);
    let after = before.with_path(ps.location(), &rover_path);
    let (Some(direct), Some(remaining)) = (
        network_distance(&state.graph, ps.location(), dest, &before),
        network_distance(&state.graph, intercept, dest, &after),
    ) else {
        return Ok(None);
    };
    if rover_path.len() + remaining > direct + config.rover_max_extra_hops {
        log::debug!(
            "player {}: rover via {} costs {} hops against {}",
            req.player,
            intercept,
            rover_path.len() + remaining,
            direct
        );
        return Ok(None);
    }

    log::info!("player {}: heading for a rover play at {}", req.player, intercept);
    if intercept == dest {
        return Ok(Some(rover_path));
    }
    let onward = MoveRequest {
        forced: rover_path,
        ..req.clone()
    };
    plan_moves(state, &onward, config.move_flex, config, rng).map(Some)
}

/// Plans a move, detouring through the nearest declared opponent when that
/// costs at most `rover_max_extra_hops` extra hops and fits in this turn.
///
/// Any failed route search in the detour falls back to the direct plan.
pub fn plan_with_rover(
    state: &GameState,
    req: &MoveRequest,
    config: &AdvisorConfig,
    rng: &mut impl Rng,
) -> Result<Vec<Waypoint>, RuleViolation> {
    match try_intercept(state, req, config, rng) {
        Ok(Some(moves)) => return Ok(moves),
        Ok(None) => {}
        Err(e) if e.is_recoverable() => {
            log::warn!("player {}: rover planning failed ({}), moving directly", req.player, e);
        }
        Err(e) => return Err(e),
    }
    plan_moves(state, req, config.move_flex, config, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{testmaps, Rules};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    /// Player 0 starts at grid corner 0 heading for 8; player 1 is declared
    /// and sitting at `opponent_at`.
    fn setup(opponent_at: PointId) -> GameState {
        let (g, _, _) = testmaps::grid();
        let mut state = GameState::new(Arc::new(g), Rules::default(), &[0, opponent_at]);
        state.player_mut(0).set_destination(8).unwrap();
        state.player_mut(1).declared = true;
        state
    }

    #[test]
    fn detours_through_a_declared_opponent_on_the_way() {
        let state = setup(4);
        let mut rng = StdRng::seed_from_u64(42);
        let moves = plan_with_rover(&state, &MoveRequest::new(0, 4), &AdvisorConfig::default(), &mut rng).unwrap();
        assert_eq!(moves.len(), 4);
        assert_eq!(moves[1].to, 4);
        assert_eq!(moves.last().map(|wp| wp.to), Some(8));
    }

    #[test]
    fn ignores_an_opponent_out_of_reach() {
        let state = setup(4);
        let mut rng = StdRng::seed_from_u64(42);
        // One waypoint cannot reach point 4 this turn.
        let moves = plan_with_rover(&state, &MoveRequest::new(0, 1), &AdvisorConfig::default(), &mut rng).unwrap();
        assert_eq!(moves.len(), 1);
        assert_ne!(moves[0].to, 4);
    }

    #[test]
    fn skips_a_detour_that_is_too_long() {
        let state = setup(6);
        let mut cfg = AdvisorConfig::default();
        cfg.rover_max_extra_hops = 1;
        let mut rng = StdRng::seed_from_u64(42);
        // Via 6 the trip is 2 + 2 hops against 4 direct, so this one is taken.
        let via = plan_with_rover(&state, &MoveRequest::new(0, 2), &cfg, &mut rng).unwrap();
        assert_eq!(via.last().map(|wp| wp.to), Some(6));

        // Player 0 already rode 0 -> 1, so going back to 6 is a long detour.
        let mut state = setup(6);
        let (_, h, _) = testmaps::grid();
        let graph = Arc::clone(&state.graph);
        state.player_mut(0).advance(&graph, &[Waypoint::new(h, 1)]).unwrap();
        let moves = plan_with_rover(&state, &MoveRequest::new(0, 3), &cfg, &mut rng).unwrap();
        assert!(moves.iter().all(|wp| wp.to != 6));
        assert_eq!(moves.len(), 3);
    }

    #[test]
    fn without_declared_opponents_plans_directly() {
        let (g, _, _) = testmaps::grid();
        let mut state = GameState::new(Arc::new(g), Rules::default(), &[0, 4]);
        state.player_mut(0).set_destination(8).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let moves = plan_with_rover(&state, &MoveRequest::new(0, 4), &AdvisorConfig::default(), &mut rng).unwrap();
        assert_eq!(moves.len(), 4);
        assert_eq!(moves.last().map(|wp| wp.to), Some(8));
    }

    #[test]
    fn unreachable_opponent_falls_back_to_the_direct_route() {
        let (g, rr) = testmaps::line(4);
        let graph = Arc::new(g);
        let mut state = GameState::new(Arc::clone(&graph), Rules::default(), &[0, 0]);
        state.player_mut(0).set_destination(3).unwrap();
        state.player_mut(0).advance(&graph, &[Waypoint::new(rr, 1)]).unwrap();
        // The only way back to the opponent at 0 is the segment already ridden.
        state.player_mut(1).declared = true;
        let mut rng = StdRng::seed_from_u64(42);
        let moves = plan_with_rover(&state, &MoveRequest::new(0, 4), &AdvisorConfig::default(), &mut rng).unwrap();
        assert_eq!(moves, vec![Waypoint::new(rr, 2), Waypoint::new(rr, 3)]);
    }
}
