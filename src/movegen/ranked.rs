//! Legal moves annotated for a human-facing chooser.

use std::cmp::Reverse;

use crate::board::{GameState, PlayerId, PointId, RailroadId, SegmentLedger, Waypoint};
use crate::error::RuleViolation;
use crate::fees::{calculate_tolls, TollContext};
use crate::search::network_distance;

use super::legal::{legal_moves, TripView};

/// One legal next step with what it costs and how far it leaves the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedMove {
    pub waypoint: Waypoint,
    /// Extra toll this step adds to the turn for the moving player.
    pub cost: i64,
    /// Hops still needed to reach the destination after this step.
    pub remaining: usize,
}

impl RankedMove {
    pub fn reaches(&self, destination: PointId) -> bool {
        self.waypoint.to == destination
    }
}

/// Ranks the player's legal next steps toward `destination`.
///
/// `turn` holds the moves already made this turn (they are also the tail of
/// the player's history) and `start_rr` the railroad ridden when the turn
/// began. Steps that cannot reach the destination any more are dropped.
/// Arrivals come first, then cheaper steps, then shorter remaining distance.
pub fn ranked_moves(
    state: &GameState,
    player: PlayerId,
    turn: &[Waypoint],
    start_rr: Option<RailroadId>,
    destination: PointId,
) -> Result<Vec<RankedMove>, RuleViolation> {
    let ps = state.player(player);
    let view = TripView {
        start: ps.start,
        history: &ps.history,
        destination,
        rover_play_index: ps.rover_play_index,
    };
    let moves = legal_moves(&state.graph, &view)?;

    let ctx = TollContext::new(&state.ownership, &state.rules, player, state.players.len());
    let base = calculate_tolls(&ctx, turn, start_rr, ps.established_rate).cost_for(player);
    let used = SegmentLedger::replay(ps.start, &ps.history);
    let here = ps.location();

    let mut window = turn.to_vec();
    let mut ranked: Vec<RankedMove> = moves
        .into_iter()
        .filter_map(|wp| {
            let after = used.with_path(here, &[wp]);
            let remaining = network_distance(&state.graph, wp.to, destination, &after)?;
            window.push(wp);
            let cost = calculate_tolls(&ctx, &window, start_rr, ps.established_rate).cost_for(player) - base;
            window.pop();
            Some(RankedMove {
                waypoint: wp,
                cost,
                remaining,
            })
        })
        .collect();

    ranked.sort_by_key(|m| (Reverse(m.reaches(destination)), m.cost, m.remaining));
    Ok(ranked)
}
