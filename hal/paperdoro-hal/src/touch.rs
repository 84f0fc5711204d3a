//! Touch input abstraction

use crate::types::Point;

/// Touch panel sampled once per scheduler iteration
///
/// Implementations report press *edges* only: a finger that stays down
/// produces a single `Some` on the poll where contact began, then `None`
/// until it is lifted and pressed again. No drag or multi-touch semantics
/// are required.
pub trait TouchSource {
    /// Return the location of a new press, if one began since the last poll
    fn poll_press_edge(&mut self) -> Option<Point>;
}
