//! Advisor tuning knobs.
//!
//! Every field has a default, so a config file only needs the fields it
//! changes.

use serde::{Deserialize, Serialize};

/// Tuning for move planning, plus the nested purchase and declare settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Candidate routes kept after reduction.
    pub max_paths: usize,
    /// Simulated rides used to price a route's continuation.
    pub sim_trials: usize,
    /// Extra hops beyond the shortest route when planning a normal move.
    pub move_flex: usize,
    /// Extra hops beyond the shortest route when heading for a rover play.
    pub rover_flex: usize,
    /// How much longer a trip may get to make a rover play.
    pub rover_max_extra_hops: usize,
    pub purchase: PurchaseConfig,
    pub declare: DeclareConfig,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        AdvisorConfig {
            max_paths: 100,
            sim_trials: 100,
            move_flex: 0,
            rover_flex: 1,
            rover_max_extra_hops: 2,
            purchase: PurchaseConfig::default(),
            declare: DeclareConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PurchaseConfig {
    /// Random next-trip destinations sampled per option.
    pub destinations: usize,
    pub rolls_per_destination: usize,
    /// Trials used to pick the cheapest route to each sampled destination.
    pub path_trials: usize,
    /// Fraction of simulated trips allowed to cost more than the estimate.
    pub risk: f64,
    /// Balance margin above `min_balance` that skips simulation entirely.
    pub sim_threshold: i64,
    /// The estimated balance after the next trip must stay above this.
    pub min_balance: i64,
    pub score_per_free_point: i64,
    pub score_per_locked_point: i64,
}

impl Default for PurchaseConfig {
    fn default() -> Self {
        PurchaseConfig {
            destinations: 200,
            rolls_per_destination: 10,
            path_trials: 10,
            risk: 0.05,
            sim_threshold: 50_000,
            min_balance: 5_000,
            score_per_free_point: 200,
            score_per_locked_point: 150,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeclareConfig {
    /// Rides home simulated before deciding.
    pub rolls: usize,
    /// Fraction of simulated rides home allowed to cost more than the estimate.
    pub risk: f64,
    /// Balance, as a percentage of the cash needed to win, at which the
    /// player declares without simulating.
    pub sure_win_percent: i64,
}

impl Default for DeclareConfig {
    fn default() -> Self {
        DeclareConfig {
            rolls: 1_000,
            risk: 0.10,
            sure_win_percent: 125,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg: AdvisorConfig = serde_json::from_str(r#"{"max_paths": 7, "declare": {"rolls": 10}}"#).unwrap();
        assert_eq!(cfg.max_paths, 7);
        assert_eq!(cfg.sim_trials, 100);
        assert_eq!(cfg.declare.rolls, 10);
        assert_eq!(cfg.declare.risk, 0.10);
        assert_eq!(cfg.purchase, PurchaseConfig::default());
    }
}
