//! Audible signal abstraction

/// Piezo or speaker output
pub trait Speaker {
    /// Play a tone, blocking until it has finished
    fn tone(&mut self, frequency_hz: u16, duration_ms: u32);
}
