//! Fixed game rules: fee schedule, engine tiers, and winning cash.

use serde::{Deserialize, Serialize};

/// Locomotive tier; decides how many dice a player rolls for distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EngineTier {
    Basic,
    Express,
    Superchief,
}

impl EngineTier {
    /// Returns true if the roll (d1, d2) earns a bonus die.
    pub const fn earns_bonus(self, d1: u8, d2: u8) -> bool {
        match self {
            EngineTier::Basic => false,
            EngineTier::Express => d1 == d2,
            EngineTier::Superchief => true,
        }
    }

    /// Parses a tier name (case-insensitive).
    pub fn from_name(name: &str) -> Option<EngineTier> {
        match name.to_ascii_lowercase().as_str() {
            "basic" => Some(EngineTier::Basic),
            "express" => Some(EngineTier::Express),
            "superchief" => Some(EngineTier::Superchief),
            _ => None,
        }
    }
}

/// Money amounts that govern tolls, purchases and winning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Toll paid to the bank for riding unowned railroads.
    pub bank_fee: i64,
    /// Toll paid to another player for riding their railroads.
    pub player_fee: i64,
    pub express_price: i64,
    pub superchief_price: i64,
    /// Paid by a declared player caught by a rover play.
    pub rover_fee: i64,
    /// Cash a declared player needs on arriving home to win.
    pub cash_to_win: i64,
    pub initial_bank: i64,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            bank_fee: 1_000,
            player_fee: 5_000,
            express_price: 4_000,
            superchief_price: 40_000,
            rover_fee: 50_000,
            cash_to_win: 200_000,
            initial_bank: 20_000,
        }
    }
}

impl Rules {
    /// Inter-player toll, doubled once every railroad is owned.
    pub const fn player_fee(&self, double_fees: bool) -> i64 {
        if double_fees {
            self.player_fee * 2
        } else {
            self.player_fee
        }
    }

    /// Price of upgrading from `current` to `target`, if that upgrade is allowed.
    pub fn upgrade_price(&self, current: EngineTier, target: EngineTier) -> Option<i64> {
        match (current, target) {
            (EngineTier::Basic, EngineTier::Express) => Some(self.express_price),
            (EngineTier::Basic | EngineTier::Express, EngineTier::Superchief) => {
                Some(self.superchief_price)
            }
            _ => None,
        }
    }
}
