//! Shortest-path search under the no-reuse rule.
//!
//! Which segments a route may ride depends on the route taken so far, so the
//! search queues whole paths instead of points. A point is finalized at the
//! depth where a path ending there is first dequeued; afterwards a path may
//! only step onto it within `flex` hops of that depth. The queue is ordered by
//! length, so every path of a given length is queued before any of that length
//! is dequeued and equal-length alternatives survive finalization.

use std::collections::{HashMap, VecDeque};

use crate::board::{NetworkGraph, PointId, RailSegment, SegmentLedger, Waypoint};

/// A route as a sequence of waypoints from an implied start point.
pub type Path = Vec<Waypoint>;

struct Candidate {
    path: Path,
    used: SegmentLedger,
}

/// Returns every simple path from `from` to `to` whose length is within `flex`
/// hops of the shortest, never riding a segment in `excluded`.
///
/// Returns an empty vec when `to` is unreachable, and a single empty path when
/// `from == to`.
pub fn shortest_paths(
    graph: &NetworkGraph,
    from: PointId,
    to: PointId,
    excluded: &SegmentLedger,
    flex: usize,
) -> Vec<Path> {
    if from == to {
        return vec![Vec::new()];
    }

    let mut queue: VecDeque<Candidate> = VecDeque::new();
    let mut found: Vec<Path> = Vec::new();
    let mut min_len = graph.len();
    let mut finalized_at: HashMap<PointId, usize> = HashMap::from([(from, 0)]);

    for (rr, next) in graph.point(from).links() {
        if !excluded.is_used(rr, from, next) {
            let path = vec![Waypoint::new(rr, next)];
            let used = excluded.with_path(from, &path);
            queue.push_back(Candidate { path, used });
        }
    }

    while let Some(Candidate { path, used }) = queue.pop_front() {
        let end = path.last().map(|wp| wp.to).unwrap_or(from);

        if end == to {
            if path.len() <= min_len + flex {
                if path.len() < min_len {
                    min_len = path.len();
                    found.retain(|p| p.len() <= min_len + flex);
                }
                found.push(path);
            }
            finalized_at.entry(end).or_insert(min_len);
            continue;
        }

        let depth = path.len() + 1;
        if path.len() < min_len + flex {
            for (rr, next) in graph.point(end).links() {
                if used.is_used(rr, end, next)
                    || next == from
                    || path.iter().any(|wp| wp.to == next)
                    || finalized_at.get(&next).is_some_and(|&d| depth > d + flex)
                {
                    continue;
                }
                let mut longer = path.clone();
                longer.push(Waypoint::new(rr, next));
                let mut next_used = used.clone();
                next_used.insert(RailSegment::new(rr, end, next));
                queue.push_back(Candidate {
                    path: longer,
                    used: next_used,
                });
            }
        }

        finalized_at.entry(end).or_insert(path.len());
    }

    log::debug!(
        "search {} -> {} (flex {}): {} paths, shortest {}",
        from,
        to,
        flex,
        found.len(),
        if found.is_empty() { 0 } else { min_len }
    );
    found
}
