//! Legal move generation.
//!
//! Single-step legality under the no-reuse rule, validation of submitted
//! moves, and legal steps ranked for a chooser.

pub mod legal;
pub mod ranked;
pub mod validate;

pub use legal::{legal_moves, trapped_points, TripView};
pub use ranked::{ranked_moves, RankedMove};
pub use validate::{check_move_distance, validate_move};
