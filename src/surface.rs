//! Move surfaces.
//!
//! A surface is whatever supplies a player's decisions: the autonomous
//! advisor, or a chooser driven by a person through some front end. The game
//! loop talks to every player through [`MoveSurface`] and never needs to know
//! which kind it has.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::advisor::{MoveRequest, RouteAdvisor};
use crate::board::{GameState, PlayerId, Purchase, Waypoint};
use crate::error::RuleViolation;
use crate::movegen::{check_move_distance, ranked_moves, validate_move, RankedMove};

/// The decisions a player makes during a turn.
pub trait MoveSurface {
    /// Returns at most `req.distance` waypoints, ending when the distance is
    /// used up or on arrival at the destination.
    fn choose_move(&mut self, state: &GameState, req: &MoveRequest) -> Result<Vec<Waypoint>, RuleViolation>;

    /// What to buy after a payoff, if anything. `pending_fee` is the toll
    /// still owed this turn.
    fn choose_purchase(&mut self, state: &GameState, player: PlayerId, pending_fee: i64) -> Option<Purchase>;

    /// Whether to declare for home.
    fn declare(&mut self, state: &GameState, player: PlayerId) -> bool;

    /// Asks for a move and checks it before the game applies it. Every hop
    /// must be legal for the trip, and the move must use the whole distance
    /// unless it ends on the player's destination (or on `req.destination`).
    fn next_move(&mut self, state: &GameState, req: &MoveRequest) -> Result<Vec<Waypoint>, RuleViolation> {
        let ps = state.player(req.player);
        let target = ps.target().ok_or(RuleViolation::NoDestination(req.player))?;
        let moves = self.choose_move(state, req)?;
        let dest = match req.destination {
            Some(stand_in) if moves.last().map(|wp| wp.to) != Some(target) => stand_in,
            _ => target,
        };
        check_move_distance(&moves, req.distance, dest)?;
        validate_move(&state.graph, ps, &moves)?;
        Ok(moves)
    }
}

/// Computer player backed by a [`RouteAdvisor`].
pub struct AdvisorSurface {
    advisor: RouteAdvisor,
    rng: SmallRng,
}

impl AdvisorSurface {
    pub fn new(advisor: RouteAdvisor) -> Self {
        AdvisorSurface {
            advisor,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Same as `new` but reproducible.
    pub fn seeded(advisor: RouteAdvisor, seed: u64) -> Self {
        AdvisorSurface {
            advisor,
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MoveSurface for AdvisorSurface {
    fn choose_move(&mut self, state: &GameState, req: &MoveRequest) -> Result<Vec<Waypoint>, RuleViolation> {
        self.advisor.plan_move(state, req, &mut self.rng)
    }

    fn choose_purchase(&mut self, state: &GameState, player: PlayerId, pending_fee: i64) -> Option<Purchase> {
        self.advisor.choose_purchase(state, player, pending_fee, &mut self.rng)
    }

    fn declare(&mut self, state: &GameState, player: PlayerId) -> bool {
        self.advisor.should_declare(state, player, &mut self.rng)
    }
}

/// What a step-by-step chooser is asked to pick from.
#[derive(Debug)]
pub struct StepPrompt<'a> {
    pub player: PlayerId,
    /// Waypoints still to ride this move, including this one.
    pub steps_left: usize,
    pub moves: &'a [RankedMove],
}

/// Purchase and declare answers for a [`StepSurface`].
pub trait StepAnswers {
    fn purchase(&mut self, state: &GameState, player: PlayerId, options: &[(Purchase, i64)]) -> Option<Purchase>;
    fn declare(&mut self, state: &GameState, player: PlayerId) -> bool;
}

/// Answers that never buy and never declare.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decline;

impl StepAnswers for Decline {
    fn purchase(&mut self, _: &GameState, _: PlayerId, _: &[(Purchase, i64)]) -> Option<Purchase> {
        None
    }

    fn declare(&mut self, _: &GameState, _: PlayerId) -> bool {
        false
    }
}

/// Human-facing surface: builds the move one step at a time, asking `chooser`
/// for an index into the ranked legal steps. Out-of-range answers pick the
/// last step offered. Purchases and declarations go to `answers`.
pub struct StepSurface<F, A> {
    chooser: F,
    answers: A,
}

impl<F, A> StepSurface<F, A>
where
    F: FnMut(&StepPrompt<'_>) -> usize,
    A: StepAnswers,
{
    pub fn new(chooser: F, answers: A) -> Self {
        StepSurface { chooser, answers }
    }
}

impl<F, A> MoveSurface for StepSurface<F, A>
where
    F: FnMut(&StepPrompt<'_>) -> usize,
    A: StepAnswers,
{
    fn choose_move(&mut self, state: &GameState, req: &MoveRequest) -> Result<Vec<Waypoint>, RuleViolation> {
        let player = req.player;
        let dest = match req.destination {
            Some(dest) => dest,
            None => state.player(player).target().ok_or(RuleViolation::NoDestination(player))?,
        };
        let real_dest = state.player(player).target();

        // Steps are applied to a scratch copy so each query sees the move so far.
        let mut scratch = state.clone();
        let graph = state.graph.clone();
        let mut turn = state.player(player).recent_moves(req.moves_so_far).to_vec();
        let mut chosen = Vec::with_capacity(req.distance);

        for wp in &req.forced {
            scratch.player_mut(player).advance(&graph, &[*wp])?;
            turn.push(*wp);
            chosen.push(*wp);
            if Some(wp.to) == real_dest {
                return Ok(chosen);
            }
        }

        while chosen.len() < req.distance {
            let ranked = ranked_moves(&scratch, player, &turn, req.start_rr, dest)?;
            let at = scratch.player(player).location();
            let last = ranked.len().checked_sub(1).ok_or(RuleViolation::NoRoute { from: at, to: dest })?;
            let prompt = StepPrompt {
                player,
                steps_left: req.distance - chosen.len(),
                moves: &ranked,
            };
            let wp = ranked[(self.chooser)(&prompt).min(last)].waypoint;

            scratch.player_mut(player).advance(&graph, &[wp])?;
            turn.push(wp);
            chosen.push(wp);
            if Some(wp.to) == real_dest || wp.to == dest {
                break;
            }
        }
        Ok(chosen)
    }

    fn choose_purchase(&mut self, state: &GameState, player: PlayerId, pending_fee: i64) -> Option<Purchase> {
        let bank = state.player(player).bank - pending_fee;
        let options: Vec<(Purchase, i64)> = state
            .purchase_options(player)
            .into_iter()
            .filter(|&(_, price)| price <= bank)
            .collect();
        if options.is_empty() {
            return None;
        }
        self.answers.purchase(state, player, &options)
    }

    fn declare(&mut self, state: &GameState, player: PlayerId) -> bool {
        state.player(player).can_declare(&state.rules) && self.answers.declare(state, player)
    }
}
