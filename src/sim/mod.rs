//! Dice and Monte-Carlo cost simulation.

pub mod cost;
pub mod destination;
pub mod dice;

pub use cost::{risk_cost, simulate_trip_costs, CostModel, TripSampling};
pub use destination::{destination_odds, draw_destinations};
pub use dice::{distance_odds, roll_distance};
