//! Network and game-state types.
//!
//! Contains the immutable rail network with its destination roll tables,
//! waypoint and segment types, the ownership table, the fee schedule, and
//! per-player trip state.

pub mod network;
pub mod ownership;
pub mod point;
pub mod rolltable;
pub mod rules;
pub mod segment;
pub mod state;

#[cfg(test)]
pub(crate) mod testmaps;

pub use network::{GraphBuilder, MapError, NetworkGraph};
pub use ownership::{Owner, Ownership};
pub use point::{GeoCoord, PlayerId, Point, PointId, Railroad, RailroadId};
pub use rolltable::{RollTable, REGION_TABLE, ROLL_TABLE_ROWS};
pub use rules::{EngineTier, Rules};
pub use segment::{path_end, segments_along, RailSegment, SegmentLedger, Waypoint};
pub use state::{GameState, PlayerState, Purchase};
