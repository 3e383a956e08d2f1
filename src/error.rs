//! Rule violations raised by the core.
//!
//! Everything except `NoRoute` means the caller handed the core a corrupted
//! game state and should stop. `NoRoute` is returned by planners when a search
//! comes back empty, and some advisor flows recover from it.

use crate::board::{PlayerId, PointId, RailSegment, RailroadId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleViolation {
    #[error("no legal move available from point {at}")]
    NoLegalMove { at: PointId },

    #[error("no route from point {from} to point {to}")]
    NoRoute { from: PointId, to: PointId },

    #[error("a move must contain at least one waypoint")]
    EmptyMove,

    #[error("move of {len} waypoints exceeds the {allowed} allowed")]
    MoveTooLong { len: usize, allowed: usize },

    #[error("move of {len} waypoints stops short of {allowed} without reaching the destination")]
    StoppedShort { len: usize, allowed: usize },

    #[error("destination {dest} reached before the last waypoint of the move")]
    DestinationBeforeEnd { dest: PointId },

    #[error("railroad {rr} does not link point {from} to point {to}")]
    NotConnected { rr: RailroadId, from: PointId, to: PointId },

    #[error("rail segment {0} was already used this trip")]
    SegmentReuse(RailSegment),

    #[error("player {player} must reach destination {dest} before a new one is set")]
    DestinationNotReached { player: PlayerId, dest: PointId },

    #[error("player {0} has no destination to move toward")]
    NoDestination(PlayerId),
}

impl RuleViolation {
    /// Returns true for the one violation planners are expected to recover from.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RuleViolation::NoRoute { .. })
    }
}
