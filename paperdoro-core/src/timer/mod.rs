//! Countdown timer
//!
//! The phase machine is explicit, finite and deterministic. The engine wraps
//! it with the elapsed counters and the wall-clock tick cadence.

pub mod engine;
pub mod events;
pub mod machine;

pub use engine::{StartOutcome, TickReport, TimerEngine, TimerError, TimerState, TICK_MS};
pub use events::TimerEvent;
pub use machine::TimerPhase;
