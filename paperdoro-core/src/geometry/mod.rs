//! Ring geometry
//!
//! Maps progress indices to dot positions on the two concentric rings.

pub mod ring;

pub use ring::{ring_position, Dot, Ring, RingGeometry, SECONDS_PER_MINUTE};
