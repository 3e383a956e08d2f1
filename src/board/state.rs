//! Player and game state snapshots.
//!
//! The core reads these between turns. The trip bookkeeping methods here
//! (`set_destination`, `advance`) enforce the trip invariants; balances and
//! ownership are applied by the caller.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::network::NetworkGraph;
use super::ownership::Ownership;
use super::point::{PlayerId, PointId, RailroadId};
use super::rules::{EngineTier, Rules};
use super::segment::{SegmentLedger, Waypoint};
use crate::error::RuleViolation;
use crate::fees::EstablishedRate;
use crate::movegen::validate_move;

/// Something a player can buy after collecting a payoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Purchase {
    Engine(EngineTier),
    Railroad(RailroadId),
}

impl Purchase {
    pub fn is_engine(&self) -> bool {
        matches!(self, Purchase::Engine(_))
    }
}

/// Everything the core needs to know about one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub index: PlayerId,
    pub bank: i64,
    pub engine: EngineTier,
    pub home: PointId,
    /// Start of the current trip.
    pub start: PointId,
    /// Current trip destination (the alternate destination while declared).
    pub destination: Option<PointId>,
    pub declared: bool,
    /// Waypoints ridden since `start`.
    pub history: Vec<Waypoint>,
    pub established_rate: Option<EstablishedRate>,
    /// Railroad ridden on the last waypoint of the previous move.
    pub last_railroad: Option<RailroadId>,
    pub rover_play_index: Option<usize>,
}

impl PlayerState {
    pub fn new(index: PlayerId, home: PointId, bank: i64) -> Self {
        PlayerState {
            index,
            bank,
            engine: EngineTier::Basic,
            home,
            start: home,
            destination: None,
            declared: false,
            history: Vec::new(),
            established_rate: None,
            last_railroad: None,
            rover_play_index: None,
        }
    }

    pub fn location(&self) -> PointId {
        self.history.last().map(|wp| wp.to).unwrap_or(self.start)
    }

    /// Where the player is heading: home once declared, otherwise the trip destination.
    pub fn target(&self) -> Option<PointId> {
        if self.declared {
            Some(self.home)
        } else {
            self.destination
        }
    }

    pub fn at_destination(&self) -> bool {
        self.destination == Some(self.location())
    }

    pub fn at_home(&self) -> bool {
        self.home == self.location()
    }

    pub fn can_declare(&self, rules: &Rules) -> bool {
        !self.declared && self.at_destination() && self.bank >= rules.cash_to_win
    }

    pub fn is_winner(&self, rules: &Rules) -> bool {
        self.declared && self.at_home() && self.bank >= rules.cash_to_win
    }

    /// Starts a new trip. The previous destination must have been reached and
    /// becomes the new trip start.
    pub fn set_destination(&mut self, dest: PointId) -> Result<(), RuleViolation> {
        if let Some(prev) = self.destination {
            if !self.at_destination() {
                return Err(RuleViolation::DestinationNotReached {
                    player: self.index,
                    dest: prev,
                });
            }
            self.start = prev;
        }
        self.destination = Some(dest);
        self.history.clear();
        self.established_rate = None;
        self.rover_play_index = None;
        Ok(())
    }

    /// Validates and applies a move to the trip history.
    pub fn advance(&mut self, graph: &NetworkGraph, waypoints: &[Waypoint]) -> Result<(), RuleViolation> {
        validate_move(graph, self, waypoints)?;
        self.history.extend_from_slice(waypoints);
        self.last_railroad = waypoints.last().map(|wp| wp.railroad);
        Ok(())
    }

    /// Records where this trip crossed a declared opponent.
    pub fn record_rover_play(&mut self, history_index: usize) {
        self.rover_play_index = Some(history_index);
    }

    /// Segments ridden after this trip's rover point. Those stay spent when a
    /// rover play frees the ones before it. `None` without a rover play.
    pub fn post_rover_ledger(&self) -> Option<SegmentLedger> {
        self.rover_play_index
            .filter(|&i| i < self.history.len())
            .map(|i| SegmentLedger::replay(self.history[i].to, &self.history[i + 1..]))
    }

    /// The last `count` waypoints of the trip (moves already made this turn).
    pub fn recent_moves(&self, count: usize) -> &[Waypoint] {
        let n = count.min(self.history.len());
        &self.history[self.history.len() - n..]
    }
}

/// Snapshot of a whole game as seen by the core.
#[derive(Debug, Clone)]
pub struct GameState {
    pub graph: Arc<NetworkGraph>,
    pub players: Vec<PlayerState>,
    pub ownership: Ownership,
    pub rules: Rules,
}

impl GameState {
    /// Creates a game with one player per home city, all railroads with the bank.
    pub fn new(graph: Arc<NetworkGraph>, rules: Rules, homes: &[PointId]) -> Self {
        let players = homes
            .iter()
            .enumerate()
            .map(|(i, &home)| PlayerState::new(i, home, rules.initial_bank))
            .collect();
        let ownership = Ownership::new(graph.railroads().len());
        GameState {
            graph,
            players,
            ownership,
            rules,
        }
    }

    pub fn player(&self, index: PlayerId) -> &PlayerState {
        &self.players[index]
    }

    pub fn player_mut(&mut self, index: PlayerId) -> &mut PlayerState {
        &mut self.players[index]
    }

    pub fn double_fees(&self) -> bool {
        self.ownership.all_owned()
    }

    /// Declared opponents of `player`, with their current locations.
    pub fn declared_opponents(&self, player: PlayerId) -> impl Iterator<Item = (PlayerId, PointId)> + '_ {
        self.players
            .iter()
            .filter(move |p| p.index != player && p.declared)
            .map(|p| (p.index, p.location()))
    }

    /// Purchases `player` can afford right now, engines first.
    pub fn purchase_options(&self, player: PlayerId) -> Vec<(Purchase, i64)> {
        let ps = &self.players[player];
        let mut options = Vec::new();
        for tier in [EngineTier::Express, EngineTier::Superchief] {
            if let Some(price) = self.rules.upgrade_price(ps.engine, tier) {
                if ps.bank >= price {
                    options.push((Purchase::Engine(tier), price));
                }
            }
        }
        for rr in self.ownership.unowned() {
            let price = self.graph.railroad(rr).cost;
            if ps.bank >= price {
                options.push((Purchase::Railroad(rr), price));
            }
        }
        options
    }
}
