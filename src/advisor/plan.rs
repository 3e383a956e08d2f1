//! Move planning for a known roll.

use rand::Rng;

use crate::board::{GameState, PlayerId, PointId, RailroadId, SegmentLedger, Waypoint};
use crate::error::RuleViolation;
use crate::fees::TollContext;
use crate::search::{reduce_paths, shortest_paths, Path};
use crate::sim::CostModel;

use super::config::AdvisorConfig;

/// A request for one move.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveRequest {
    pub player: PlayerId,
    /// Waypoints the player may ride in this move.
    pub distance: usize,
    /// Railroad the player was riding when the turn began.
    pub start_rr: Option<RailroadId>,
    /// Moves already made this turn (the tail of the player's history), for
    /// a bonus roll.
    pub moves_so_far: usize,
    /// Waypoints the move must begin with.
    pub forced: Vec<Waypoint>,
    /// Plan toward this point instead of the player's destination.
    pub destination: Option<PointId>,
}

impl MoveRequest {
    pub fn new(player: PlayerId, distance: usize) -> Self {
        MoveRequest {
            player,
            distance,
            ..MoveRequest::default()
        }
    }

}

/// Plans the cheapest move for `req`, searching routes within `flex` hops of
/// the shortest.
///
/// Returns the forced waypoints followed by the chosen route, cut at the
/// distance or on arrival at the player's real destination. When nothing is
/// reachable and the trip has a rover play, the search is repeated with the
/// segments before the rover point freed, as legal-move generation does. An
/// unreachable target is reported as the recoverable [`RuleViolation::NoRoute`].
pub fn plan_moves(
    state: &GameState,
    req: &MoveRequest,
    flex: usize,
    config: &AdvisorConfig,
    rng: &mut impl Rng,
) -> Result<Vec<Waypoint>, RuleViolation> {
    let ps = state.player(req.player);
    let real_dest = ps.target().ok_or(RuleViolation::NoDestination(req.player))?;
    let dest = req.destination.unwrap_or(real_dest);

    let start = req.forced.last().map(|wp| wp.to).unwrap_or_else(|| ps.location());
    let distance = req.distance.saturating_sub(req.forced.len());
    let mut used = SegmentLedger::replay(ps.start, &ps.history);
    used.extend_path(ps.location(), &req.forced);

    let mut paths = shortest_paths(&state.graph, start, dest, &used, flex);
    if paths.is_empty() {
        if let Some(mut relaxed) = ps.post_rover_ledger() {
            log::debug!("player {}: no route to {}, retrying past the rover point", req.player, dest);
            relaxed.extend_path(ps.location(), &req.forced);
            paths = shortest_paths(&state.graph, start, dest, &relaxed, flex);
        }
    }
    if paths.is_empty() {
        return Err(RuleViolation::NoRoute { from: start, to: dest });
    }
    let found = paths.len();
    let paths = reduce_paths(paths, config.max_paths, &ps.history, rng);

    let mut prior = ps.recent_moves(req.moves_so_far).to_vec();
    prior.extend_from_slice(&req.forced);
    let toll = TollContext::new(&state.ownership, &state.rules, req.player, state.players.len());
    let model = CostModel::new(toll, ps.engine);

    let mut best: Option<(i64, Path)> = None;
    for path in paths {
        let cost = model.path_cost(
            &path,
            distance,
            &prior,
            req.start_rr,
            ps.established_rate,
            config.sim_trials,
            rng,
        );
        if best.as_ref().map_or(true, |(c, _)| cost < *c) {
            best = Some((cost, path));
        }
    }
    let (cost, path) = best.ok_or(RuleViolation::NoRoute { from: start, to: dest })?;
    log::info!(
        "player {}: {} routes to {}, best has {} stops at cost {}",
        req.player,
        found,
        dest,
        path.len(),
        cost
    );

    let mut moves = Vec::with_capacity(req.distance);
    for wp in req.forced.iter().chain(path.iter().take(distance)) {
        moves.push(*wp);
        if wp.to == real_dest {
            break;
        }
    }
    Ok(moves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{testmaps, GeoCoord, NetworkGraph, Rules};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    /// A -> B -> C on railroad R, plus a detour A -> D -> C on railroad S.
    fn triangle() -> (NetworkGraph, RailroadId, RailroadId) {
        let mut b = NetworkGraph::builder();
        b.add_point(GeoCoord::new(40.0, -100.0), "EAST", &["A"]);
        b.add_point(GeoCoord::new(40.0, -99.0), "EAST", &["B"]);
        b.add_point(GeoCoord::new(40.0, -98.0), "WEST", &["C"]);
        b.add_point(GeoCoord::new(41.0, -99.0), "EAST", &["D"]);
        let r = b.add_railroad("R", "R", 10_000).unwrap();
        let s = b.add_railroad("S", "S", 10_000).unwrap();
        b.connect_chain(r, &[0, 1, 2]).unwrap();
        b.connect_chain(s, &[0, 3, 2]).unwrap();
        (b.build().unwrap(), r, s)
    }

    fn game(graph: NetworkGraph, dest: PointId) -> GameState {
        let mut state = GameState::new(Arc::new(graph), Rules::default(), &[0, 2]);
        state.player_mut(0).set_destination(dest).unwrap();
        state
    }

    #[test]
    fn prefers_own_railroad() {
        let (g, r, s) = triangle();
        let mut state = game(g, 2);
        state.ownership.set_owner(r, Some(0));
        state.ownership.set_owner(s, Some(1));
        let mut rng = StdRng::seed_from_u64(42);
        let moves = plan_moves(&state, &MoveRequest::new(0, 5), 0, &AdvisorConfig::default(), &mut rng).unwrap();
        assert_eq!(moves, vec![Waypoint::new(r, 1), Waypoint::new(r, 2)]);
    }

    #[test]
    fn avoids_the_opponents_railroad() {
        let (g, r, s) = triangle();
        let mut state = game(g, 2);
        state.ownership.set_owner(r, Some(1));
        let mut rng = StdRng::seed_from_u64(42);
        let moves = plan_moves(&state, &MoveRequest::new(0, 5), 0, &AdvisorConfig::default(), &mut rng).unwrap();
        assert_eq!(moves, vec![Waypoint::new(s, 3), Waypoint::new(s, 2)]);
    }

    #[test]
    fn truncates_to_distance_and_arrival() {
        let (g, rr) = testmaps::line(8);
        let mut state = GameState::new(Arc::new(g), Rules::default(), &[0, 7]);
        state.player_mut(0).set_destination(5).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let cfg = AdvisorConfig::default();

        let short = plan_moves(&state, &MoveRequest::new(0, 3), 0, &cfg, &mut rng).unwrap();
        assert_eq!(short.len(), 3);
        assert_eq!(short.last(), Some(&Waypoint::new(rr, 3)));

        let long = plan_moves(&state, &MoveRequest::new(0, 12), 0, &cfg, &mut rng).unwrap();
        assert_eq!(long.len(), 5);
        assert_eq!(long.last(), Some(&Waypoint::new(rr, 5)));

        // Planning past the destination still stops on arrival.
        let mut req = MoveRequest::new(0, 12);
        req.destination = Some(7);
        let through = plan_moves(&state, &req, 0, &cfg, &mut rng).unwrap();
        assert_eq!(through.last(), Some(&Waypoint::new(rr, 5)));
    }

    #[test]
    fn forced_moves_lead_the_plan() {
        let (g, rr) = testmaps::ring(6);
        let mut state = GameState::new(Arc::new(g), Rules::default(), &[0, 3]);
        state.player_mut(0).set_destination(2).unwrap();
        let mut req = MoveRequest::new(0, 7);
        req.forced = vec![Waypoint::new(rr, 5)];
        let mut rng = StdRng::seed_from_u64(42);
        let moves = plan_moves(&state, &req, 0, &AdvisorConfig::default(), &mut rng).unwrap();
        assert_eq!(
            moves,
            vec![
                Waypoint::new(rr, 5),
                Waypoint::new(rr, 4),
                Waypoint::new(rr, 3),
                Waypoint::new(rr, 2)
            ]
        );
    }

    #[test]
    fn unreachable_target_is_recoverable() {
        let (g, rr) = testmaps::line(4);
        let mut state = GameState::new(Arc::new(g), Rules::default(), &[0, 3]);
        state.player_mut(0).set_destination(3).unwrap();
        let graph = Arc::clone(&state.graph);
        state.player_mut(0).advance(&graph, &[Waypoint::new(rr, 1)]).unwrap();
        let mut req = MoveRequest::new(0, 4);
        req.destination = Some(0);
        let mut rng = StdRng::seed_from_u64(42);
        let err = plan_moves(&state, &req, 0, &AdvisorConfig::default(), &mut rng).unwrap_err();
        assert_eq!(err, RuleViolation::NoRoute { from: 1, to: 0 });
        assert!(err.is_recoverable());
    }

    #[test]
    fn missing_destination_is_reported() {
        let (g, _) = testmaps::line(4);
        let state = GameState::new(Arc::new(g), Rules::default(), &[0, 3]);
        let mut rng = StdRng::seed_from_u64(42);
        let err = plan_moves(&state, &MoveRequest::new(0, 4), 0, &AdvisorConfig::default(), &mut rng).unwrap_err();
        assert_eq!(err, RuleViolation::NoDestination(0));
    }

    #[test]
    fn rover_play_frees_earlier_segments_for_planning() {
        // 0 -V-> 3 -H-> 4 -V-> 1 -H-> 0 spends both lines out of 0.
        let (g, h, v) = testmaps::grid();
        let mut state = GameState::new(Arc::new(g), Rules::default(), &[0, 4]);
        state.player_mut(0).set_destination(8).unwrap();
        state.player_mut(0).history = vec![
            Waypoint::new(v, 3),
            Waypoint::new(h, 4),
            Waypoint::new(v, 1),
            Waypoint::new(h, 0),
        ];
        let cfg = AdvisorConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(
            plan_moves(&state, &MoveRequest::new(0, 4), 0, &cfg, &mut rng),
            Err(RuleViolation::NoRoute { from: 0, to: 8 })
        );

        // A rover play at 4 frees 0-3 and 3-4 again.
        state.player_mut(0).record_rover_play(1);
        let moves = plan_moves(&state, &MoveRequest::new(0, 4), 0, &cfg, &mut rng).unwrap();
        assert_eq!(moves.len(), 4);
        assert_eq!(moves[0], Waypoint::new(v, 3));
        assert_eq!(moves.last().map(|wp| wp.to), Some(8));
        let graph = Arc::clone(&state.graph);
        assert_eq!(state.player_mut(0).advance(&graph, &moves), Ok(()));
    }
}
