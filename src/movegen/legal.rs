//! Legal next-step generation.
//!
//! A trip may not ride a rail segment twice, so every visited point slowly
//! runs out of usable lines. A point with fewer than two usable lines left is
//! "trapped": entering it would leave no way out. Trapping spreads, since a
//! point whose remaining lines all lead into trapped points is itself trapped.
//! The destination and the current position are never trapped.

use std::collections::BTreeSet;

use crate::board::{segment::path_end, NetworkGraph, PointId, SegmentLedger, Waypoint};
use crate::error::RuleViolation;

/// Inputs for one legal-move query.
#[derive(Debug, Clone, Copy)]
pub struct TripView<'a> {
    pub start: PointId,
    pub history: &'a [Waypoint],
    pub destination: PointId,
    pub rover_play_index: Option<usize>,
}

/// Working state for one resolution attempt.
struct Resolver<'a> {
    graph: &'a NetworkGraph,
    used: SegmentLedger,
    trapped: BTreeSet<PointId>,
    current: PointId,
    destination: PointId,
}

impl<'a> Resolver<'a> {
    fn new(graph: &'a NetworkGraph, start: PointId, history: &[Waypoint], destination: PointId) -> Self {
        Resolver {
            graph,
            used: SegmentLedger::replay(start, history),
            trapped: BTreeSet::new(),
            current: path_end(start, history),
            destination,
        }
    }

    /// Waypoints from `pt` on unused segments that avoid trapped points.
    fn open_waypoints(&self, pt: PointId) -> Vec<Waypoint> {
        self.graph
            .point(pt)
            .links()
            .filter(|&(rr, next)| !self.used.is_used(rr, pt, next) && !self.trapped.contains(&next))
            .map(|(rr, next)| Waypoint::new(rr, next))
            .collect()
    }

    fn open_count(&self, pt: PointId) -> usize {
        self.open_waypoints(pt).len()
    }

    fn is_trapped(&self, pt: PointId) -> bool {
        pt != self.current && pt != self.destination && self.open_count(pt) < 2
    }

    /// Seeds trapped points from the visited points, then spreads to
    /// neighbours until a pass adds nothing.
    fn find_trapped(&mut self, start: PointId, history: &[Waypoint]) {
        let visited = std::iter::once(start).chain(history.iter().map(|wp| wp.to));
        let seeds: Vec<PointId> = visited.filter(|&p| self.is_trapped(p)).collect();
        self.trapped.extend(seeds);

        let mut found_new = !self.trapped.is_empty();
        while found_new {
            found_new = false;
            let frontier: BTreeSet<PointId> = self
                .trapped
                .iter()
                .flat_map(|&p| self.graph.point(p).connected_points())
                .collect();
            for pt in frontier {
                if self.trapped.contains(&pt) {
                    continue;
                }
                if self.is_trapped(pt) {
                    log::trace!("point {} is trapped", pt);
                    self.trapped.insert(pt);
                    found_new = true;
                }
            }
        }
    }

    fn legal_moves(&self) -> Vec<Waypoint> {
        self.open_waypoints(self.current)
            .into_iter()
            .filter(|wp| wp.to == self.destination || self.open_count(wp.to) > 1)
            .collect()
    }
}

/// Returns the legal next waypoints for a trip.
///
/// If the trip is stuck and a rover play happened this trip, the segments
/// ridden before the rover point become usable again and the query is retried
/// once from the rover point. No legal move after that is a rule violation.
pub fn legal_moves(graph: &NetworkGraph, trip: &TripView<'_>) -> Result<Vec<Waypoint>, RuleViolation> {
    let mut start = trip.start;
    let mut history = trip.history;
    let mut rover = trip.rover_play_index.filter(|&i| i < trip.history.len());

    loop {
        let mut resolver = Resolver::new(graph, start, history, trip.destination);
        resolver.find_trapped(start, history);
        let moves = resolver.legal_moves();
        if !moves.is_empty() {
            return Ok(moves);
        }
        match rover.take() {
            Some(idx) => {
                log::debug!("no legal move at {}; relaxing from rover point", resolver.current);
                start = history[idx].to;
                history = &history[idx + 1..];
            }
            None => return Err(RuleViolation::NoLegalMove { at: resolver.current }),
        }
    }
}

/// Points that are trapped for the given trip (used by displays and tests).
pub fn trapped_points(graph: &NetworkGraph, trip: &TripView<'_>) -> BTreeSet<PointId> {
    let mut resolver = Resolver::new(graph, trip.start, trip.history, trip.destination);
    resolver.find_trapped(trip.start, trip.history);
    resolver.trapped
}
