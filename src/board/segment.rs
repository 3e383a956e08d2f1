//! Waypoints, rail segments, and the per-trip segment ledger.
//!
//! A trip may never ride the same rail segment twice. The ledger replays a
//! waypoint history from the trip start to recover which segments are spent.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::point::{PointId, RailroadId};

/// One travel step: the railroad ridden and the point arrived at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Waypoint {
    pub railroad: RailroadId,
    pub to: PointId,
}

impl Waypoint {
    pub const fn new(railroad: RailroadId, to: PointId) -> Self {
        Waypoint { railroad, to }
    }
}

/// Unordered (railroad, point, point) edge, canonicalized so `low <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RailSegment {
    pub railroad: RailroadId,
    pub low: PointId,
    pub high: PointId,
}

impl RailSegment {
    pub fn new(railroad: RailroadId, a: PointId, b: PointId) -> Self {
        RailSegment {
            railroad,
            low: a.min(b),
            high: a.max(b),
        }
    }
}

impl fmt::Display for RailSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.railroad, self.low, self.high)
    }
}

/// Iterates the segments ridden by `path` starting at `start`.
pub fn segments_along(start: PointId, path: &[Waypoint]) -> impl Iterator<Item = RailSegment> + '_ {
    let mut curr = start;
    path.iter().map(move |wp| {
        let seg = RailSegment::new(wp.railroad, curr, wp.to);
        curr = wp.to;
        seg
    })
}

/// Final point reached by `path` from `start`.
pub fn path_end(start: PointId, path: &[Waypoint]) -> PointId {
    path.last().map(|wp| wp.to).unwrap_or(start)
}

/// Set of rail segments already used this trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentLedger {
    used: HashSet<RailSegment>,
}

impl SegmentLedger {
    pub fn new() -> Self {
        SegmentLedger::default()
    }

    /// Builds the ledger by replaying `history` from `start`.
    pub fn replay(start: PointId, history: &[Waypoint]) -> Self {
        SegmentLedger {
            used: segments_along(start, history).collect(),
        }
    }

    /// Adds the segments of `path` ridden from `start`.
    pub fn extend_path(&mut self, start: PointId, path: &[Waypoint]) {
        self.used.extend(segments_along(start, path));
    }

    /// Returns a copy with the segments of `path` added.
    pub fn with_path(&self, start: PointId, path: &[Waypoint]) -> Self {
        let mut next = self.clone();
        next.extend_path(start, path);
        next
    }

    pub fn insert(&mut self, seg: RailSegment) -> bool {
        self.used.insert(seg)
    }

    pub fn contains(&self, seg: &RailSegment) -> bool {
        self.used.contains(seg)
    }

    /// Returns true if riding `rr` between `a` and `b` is already spent.
    pub fn is_used(&self, rr: RailroadId, a: PointId, b: PointId) -> bool {
        self.used.contains(&RailSegment::new(rr, a, b))
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}
