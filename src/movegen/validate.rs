//! Validation of a submitted move against the trip rules.

use crate::board::{NetworkGraph, PlayerState, PointId, RailSegment, SegmentLedger, Waypoint};
use crate::error::RuleViolation;

/// Checks that `waypoints` is a legal continuation of the player's trip.
///
/// Every hop must follow a real link and may not ride a segment already used
/// this trip. After a rover play the segments ridden before the rover point
/// may be ridden again, but never the ones after it. The destination may only
/// appear as the last waypoint.
pub fn validate_move(graph: &NetworkGraph, player: &PlayerState, waypoints: &[Waypoint]) -> Result<(), RuleViolation> {
    let (_, leading) = waypoints.split_last().ok_or(RuleViolation::EmptyMove)?;
    if let Some(dest) = player.target() {
        if leading.iter().any(|wp| wp.to == dest) {
            return Err(RuleViolation::DestinationBeforeEnd { dest });
        }
    }

    let mut used = SegmentLedger::replay(player.start, &player.history);
    let mut since_rover = player.post_rover_ledger();

    let mut curr = player.location();
    for wp in waypoints {
        if !graph.is_linked(wp.railroad, curr, wp.to) {
            return Err(RuleViolation::NotConnected {
                rr: wp.railroad,
                from: curr,
                to: wp.to,
            });
        }
        let seg = RailSegment::new(wp.railroad, curr, wp.to);
        if used.contains(&seg) {
            match &since_rover {
                Some(relaxed) if !relaxed.contains(&seg) => {
                    log::debug!("reusing {} from before the rover point", seg);
                }
                _ => return Err(RuleViolation::SegmentReuse(seg)),
            }
        }
        used.insert(seg);
        if let Some(relaxed) = since_rover.as_mut() {
            relaxed.insert(seg);
        }
        curr = wp.to;
    }
    Ok(())
}

/// Checks a move's length against the rolled distance: never longer, and only
/// shorter when it ends on the destination.
pub fn check_move_distance(waypoints: &[Waypoint], distance: usize, destination: PointId) -> Result<(), RuleViolation> {
    let len = waypoints.len();
    if len > distance {
        return Err(RuleViolation::MoveTooLong { len, allowed: distance });
    }
    if len < distance && waypoints.last().map(|wp| wp.to) != Some(destination) {
        return Err(RuleViolation::StoppedShort { len, allowed: distance });
    }
    Ok(())
}
