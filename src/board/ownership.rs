//! Railroad ownership table.
//!
//! Maps each railroad to its owning player, or `None` while the bank holds it.
//! Only the external transaction layer mutates this; the core reads it.

use serde::{Deserialize, Serialize};

use super::point::{PlayerId, RailroadId};

/// Who owns the railroad ridden on a segment, from one player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Bank,
    Myself,
    Player(PlayerId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ownership {
    owners: Vec<Option<PlayerId>>,
}

impl Ownership {
    /// All `railroad_count` railroads start with the bank.
    pub fn new(railroad_count: usize) -> Self {
        Ownership {
            owners: vec![None; railroad_count],
        }
    }

    pub fn owner(&self, rr: RailroadId) -> Option<PlayerId> {
        self.owners.get(rr.index()).copied().flatten()
    }

    /// Owner relative to `player`.
    pub fn owner_for(&self, rr: RailroadId, player: PlayerId) -> Owner {
        match self.owner(rr) {
            None => Owner::Bank,
            Some(p) if p == player => Owner::Myself,
            Some(p) => Owner::Player(p),
        }
    }

    pub fn set_owner(&mut self, rr: RailroadId, owner: Option<PlayerId>) {
        self.owners[rr.index()] = owner;
    }

    /// Returns a copy in which `player` also owns `rr`.
    pub fn with_purchase(&self, rr: RailroadId, player: PlayerId) -> Self {
        let mut next = self.clone();
        next.set_owner(rr, Some(player));
        next
    }

    pub fn is_owned_by(&self, rr: RailroadId, player: PlayerId) -> bool {
        self.owner(rr) == Some(player)
    }

    /// Railroads owned by `player`.
    pub fn owned_by(&self, player: PlayerId) -> impl Iterator<Item = RailroadId> + '_ {
        self.owners
            .iter()
            .enumerate()
            .filter(move |(_, o)| **o == Some(player))
            .map(|(i, _)| RailroadId(i as u16))
    }

    /// Railroads still held by the bank.
    pub fn unowned(&self) -> impl Iterator<Item = RailroadId> + '_ {
        self.owners
            .iter()
            .enumerate()
            .filter(|(_, o)| o.is_none())
            .map(|(i, _)| RailroadId(i as u16))
    }

    /// Double fees apply once every railroad has an owner.
    pub fn all_owned(&self) -> bool {
        self.owners.iter().all(|o| o.is_some())
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}
