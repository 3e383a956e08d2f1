//! Outer data formats.
//!
//! The core takes a ready-built network; this module turns a JSON map
//! description into one.

pub mod mapfile;

pub use mapfile::{load_network, LineSpec, MapSpec, PointSpec, RailroadSpec, StopRef};
