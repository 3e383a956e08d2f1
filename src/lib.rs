//! Rail Baron rules engine.
//!
//! Enforces movement legality on a fixed rail network, settles tolls, and
//! estimates the cost of routes whose length depends on dice, for both
//! checking human moves and making computer players' decisions.

pub mod advisor;
pub mod board;
pub mod error;
pub mod fees;
pub mod movegen;
pub mod protocol;
pub mod search;
pub mod sim;
pub mod surface;

pub use error::RuleViolation;
