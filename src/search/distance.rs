//! Unweighted hop distance on the network.

use std::collections::VecDeque;

use crate::board::{NetworkGraph, PointId, SegmentLedger};

/// Hop count of the shortest route from `from` to `to` that never crosses a
/// segment in `used`. `None` when `to` cannot be reached.
///
/// Unlike [`shortest_paths`](super::shortest_paths) this treats the ledger as
/// fixed, so it is a cheap lower bound rather than an exact trip length.
pub fn network_distance(graph: &NetworkGraph, from: PointId, to: PointId, used: &SegmentLedger) -> Option<usize> {
    if from == to {
        return Some(0);
    }
    let mut dist: Vec<Option<usize>> = vec![None; graph.len()];
    dist[from] = Some(0);
    let mut queue = VecDeque::from([from]);

    while let Some(pt) = queue.pop_front() {
        let d = dist[pt].unwrap_or(0);
        for (rr, next) in graph.point(pt).links() {
            if dist[next].is_some() || used.is_used(rr, pt, next) {
                continue;
            }
            if next == to {
                return Some(d + 1);
            }
            dist[next] = Some(d + 1);
            queue.push_back(next);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{testmaps, Waypoint};

    #[test]
    fn counts_hops() {
        let (g, _) = testmaps::ring(6);
        assert_eq!(network_distance(&g, 0, 0, &SegmentLedger::new()), Some(0));
        assert_eq!(network_distance(&g, 0, 3, &SegmentLedger::new()), Some(3));
        assert_eq!(network_distance(&g, 0, 5, &SegmentLedger::new()), Some(1));
    }

    #[test]
    fn used_segments_are_avoided() {
        let (g, rr) = testmaps::ring(6);
        let used = SegmentLedger::replay(0, &[Waypoint::new(rr, 5)]);
        assert_eq!(network_distance(&g, 0, 5, &used), Some(5));

        let (line, rr) = testmaps::line(4);
        let cut = SegmentLedger::replay(1, &[Waypoint::new(rr, 2)]);
        assert_eq!(network_distance(&line, 0, 3, &cut), None);
    }
}
