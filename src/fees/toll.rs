//! Toll calculation for one window of waypoints.
//!
//! Tolls are settled once per turn. Within a window the bank is paid at most
//! once and each other owner at most once, however many hops the player rides
//! on their lines. A player who keeps riding the railroad they started the
//! window on keeps the rate established when they boarded it: a free ride stays
//! free while they own it, and a bank-rate ride stays at the bank rate even if
//! someone buys the line.

use serde::{Deserialize, Serialize};

use crate::board::{Owner, Ownership, PlayerId, RailroadId, Rules, Waypoint};

/// Toll tier memoized for the railroad a player is riding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EstablishedRate {
    Free,
    Bank,
    OtherPlayer,
}

impl EstablishedRate {
    fn for_owner(owner: Owner) -> Self {
        match owner {
            Owner::Myself => EstablishedRate::Free,
            Owner::Bank => EstablishedRate::Bank,
            Owner::Player(_) => EstablishedRate::OtherPlayer,
        }
    }
}

/// Read-only inputs shared by every toll window of a player's evaluation.
#[derive(Debug, Clone, Copy)]
pub struct TollContext<'a> {
    pub ownership: &'a Ownership,
    pub rules: &'a Rules,
    pub player: PlayerId,
    pub player_count: usize,
    pub double_fees: bool,
}

impl<'a> TollContext<'a> {
    pub fn new(ownership: &'a Ownership, rules: &'a Rules, player: PlayerId, player_count: usize) -> Self {
        TollContext {
            ownership,
            rules,
            player,
            player_count,
            double_fees: ownership.all_owned(),
        }
    }

    /// Same context with a different ownership table (for purchase what-ifs).
    /// Double fees follow the new table.
    pub fn with_ownership(self, ownership: &'a Ownership) -> Self {
        TollContext {
            ownership,
            double_fees: ownership.all_owned(),
            ..self
        }
    }
}

/// Result of settling one toll window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TollOutcome {
    /// Balance change per player. Only the acting player's entry is negative.
    pub deltas: Vec<i64>,
    /// Rate to carry into the next window.
    pub rate: Option<EstablishedRate>,
}

impl TollOutcome {
    /// Amount the acting player pays (non-negative).
    pub fn cost_for(&self, player: PlayerId) -> i64 {
        -self.deltas[player]
    }
}

/// Settles the tolls for `window`.
///
/// `start_rr` is the railroad the player was riding when the window opened
/// and `rate` the rate established on it.
pub fn calculate_tolls(
    ctx: &TollContext<'_>,
    window: &[Waypoint],
    start_rr: Option<RailroadId>,
    mut rate: Option<EstablishedRate>,
) -> TollOutcome {
    let player = ctx.player;
    let mut bank_charge = false;
    let mut player_charges = vec![false; ctx.player_count];
    let mut on_first_rr = start_rr.is_some();

    for wp in window {
        if Some(wp.railroad) != start_rr {
            on_first_rr = false;
        } else if on_first_rr {
            if rate == Some(EstablishedRate::Free) || ctx.ownership.is_owned_by(wp.railroad, player) {
                continue;
            }
            if rate == Some(EstablishedRate::Bank) {
                bank_charge = true;
                continue;
            }
        }

        let owner = ctx.ownership.owner_for(wp.railroad, player);
        if !on_first_rr {
            rate = Some(EstablishedRate::for_owner(owner));
        }
        match owner {
            Owner::Myself => {}
            Owner::Bank => bank_charge = true,
            Owner::Player(other) => player_charges[other] = true,
        }
    }

    let fee = ctx.rules.player_fee(ctx.double_fees);
    let mut deltas = vec![0i64; ctx.player_count];
    for (other, charged) in player_charges.into_iter().enumerate() {
        if charged {
            deltas[player] -= fee;
            deltas[other] += fee;
        }
    }
    if bank_charge {
        deltas[player] -= ctx.rules.bank_fee;
    }

    TollOutcome { deltas, rate }
}
