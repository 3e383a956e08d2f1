//! Downsizing of oversized candidate path sets.
//!
//! Simulating every candidate is expensive, so before scoring the advisor
//! prefers routes that stay on few railroads and change trains rarely, and
//! only falls back to a random sample when that still leaves too many.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{RailroadId, Waypoint};
use crate::search::Path;

fn railroads_along<'a>(history: &'a [Waypoint], path: &'a [Waypoint]) -> impl Iterator<Item = RailroadId> + 'a {
    history.iter().chain(path.iter()).map(|wp| wp.railroad)
}

/// Number of distinct railroads ridden over history plus `path`.
fn distinct_railroads(history: &[Waypoint], path: &[Waypoint]) -> usize {
    railroads_along(history, path).collect::<HashSet<_>>().len()
}

/// Number of railroad changes over history plus `path`.
fn transitions(history: &[Waypoint], path: &[Waypoint]) -> usize {
    let rrs: Vec<RailroadId> = railroads_along(history, path).collect();
    rrs.windows(2).filter(|w| w[0] != w[1]).count()
}

/// Keeps only the candidates with the minimum `key`.
fn keep_minimal(paths: Vec<Path>, key: impl Fn(&Path) -> usize) -> Vec<Path> {
    let Some(best) = paths.iter().map(&key).min() else {
        return paths;
    };
    paths.into_iter().filter(|p| key(p) == best).collect()
}

/// Reduces `paths` to at most `max` candidates.
///
/// Returns the input unchanged when it already fits. Otherwise keeps the paths
/// touching the fewest railroads, then those with the fewest transitions, and
/// samples down to `max` if still too many.
pub fn reduce_paths(paths: Vec<Path>, max: usize, history: &[Waypoint], rng: &mut impl Rng) -> Vec<Path> {
    if paths.len() <= max {
        return paths;
    }
    let before = paths.len();

    let paths = keep_minimal(paths, |p| distinct_railroads(history, p));
    if paths.len() <= max {
        log::debug!("reduced {} paths to {} by railroad count", before, paths.len());
        return paths;
    }

    let paths = keep_minimal(paths, |p| transitions(history, p));
    if paths.len() <= max {
        log::debug!("reduced {} paths to {} by transitions", before, paths.len());
        return paths;
    }

    log::debug!("sampling {} of {} paths", max, paths.len());
    paths.choose_multiple(rng, max).cloned().collect()
}
