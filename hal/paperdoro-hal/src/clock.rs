//! Time abstractions
//!
//! Timekeeping is split in two: a monotonic millisecond counter used to
//! compute ticks and idle time, and the `embedded-hal` blocking delay used
//! for deliberate pulses (press feedback, flash stages, tone gaps).
//!
//! A host test clock implements both and advances its counter inside
//! `delay_ns`, so blocking pulses move simulated time forward exactly like a
//! busy-wait would on hardware.

use embedded_hal::delay::DelayNs;

/// Monotonic millisecond time source
///
/// Must never go backwards. Wrap-around is not a concern with `u64`.
pub trait Monotonic {
    /// Milliseconds since an arbitrary epoch (usually boot)
    fn now_ms(&self) -> u64;
}

/// A monotonic clock that can also block for a declared duration
pub trait Clock: Monotonic + DelayNs {
    /// Block for `duration_ms`; nothing else runs meanwhile
    fn hold(&mut self, duration_ms: u32) {
        self.delay_ms(duration_ms);
    }
}

// Blanket implementation for types that implement both traits
impl<T: Monotonic + DelayNs> Clock for T {}
