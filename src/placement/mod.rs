//! Label placement along an edge path.
//!
//! - [`resolve`] turns a placement parameter into a concrete label box.
//! - [`find_best_parameter`] goes the other way, from a box to the closest
//!   parameter the model can express.
//! - [`enumerate_candidates`] lists the discrete placements worth offering.
//!
//! All three share the per-segment geometry in `geometry`, so a candidate
//! resolved to a box and fed back into the finder yields the same parameter.

mod avoidance;
mod candidates;
mod finder;
mod geometry;

pub use candidates::enumerate_candidates;
pub use finder::find_best_parameter;
pub use geometry::resolve;
