//! Route search.
//!
//! Path-dependent shortest-path search, unweighted hop distance, and the
//! reducer that trims oversized candidate sets before scoring.

pub mod bfs;
pub mod distance;
pub mod reduce;

pub use bfs::{shortest_paths, Path};
pub use distance::network_distance;
pub use reduce::reduce_paths;
