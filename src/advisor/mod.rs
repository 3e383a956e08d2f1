//! Autonomous decisions: moves, rover interceptions, purchases and declaring.
//!
//! Each decision composes route search, path reduction, toll settlement and
//! cost simulation. `RouteAdvisor` bundles them behind one configuration.

pub mod config;
pub mod declare;
pub mod plan;
pub mod purchase;
pub mod rover;

pub use config::{AdvisorConfig, DeclareConfig, PurchaseConfig};
pub use declare::recommend_declare;
pub use plan::{plan_moves, MoveRequest};
pub use purchase::{railroad_score, select_purchase};
pub use rover::plan_with_rover;

use rand::Rng;

use crate::board::{GameState, PlayerId, Purchase, Waypoint};
use crate::error::RuleViolation;

/// Decision maker for one computer-controlled player.
#[derive(Debug, Clone, Default)]
pub struct RouteAdvisor {
    pub config: AdvisorConfig,
}

impl RouteAdvisor {
    pub fn new(config: AdvisorConfig) -> Self {
        RouteAdvisor { config }
    }

    /// Plans a move, taking a rover play when one is worth it.
    pub fn plan_move(&self, state: &GameState, req: &MoveRequest, rng: &mut impl Rng) -> Result<Vec<Waypoint>, RuleViolation> {
        plan_with_rover(state, req, &self.config, rng)
    }

    /// Plans a move straight toward the destination.
    pub fn plan_direct(&self, state: &GameState, req: &MoveRequest, rng: &mut impl Rng) -> Result<Vec<Waypoint>, RuleViolation> {
        plan_moves(state, req, self.config.move_flex, &self.config, rng)
    }

    pub fn choose_purchase(&self, state: &GameState, player: PlayerId, pending_fee: i64, rng: &mut impl Rng) -> Option<Purchase> {
        select_purchase(state, player, pending_fee, &self.config, rng)
    }

    pub fn should_declare(&self, state: &GameState, player: PlayerId, rng: &mut impl Rng) -> bool {
        recommend_declare(state, player, &self.config, rng)
    }
}
