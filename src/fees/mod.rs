//! User-fee (toll) settlement.

pub mod toll;

pub use toll::{calculate_tolls, EstablishedRate, TollContext, TollOutcome};
