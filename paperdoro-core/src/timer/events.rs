//! Events that trigger phase transitions

/// Events that can trigger phase transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerEvent {
    // User events
    /// Play pressed on an idle or finished timer
    Start,
    /// Pause pressed
    Pause,
    /// Play pressed on a paused timer
    Resume,
    /// Stop or preset pressed
    Stop,

    // Tick events
    /// Elapsed minutes reached the configured duration
    DurationReached,
    /// Completion chime finished
    Acknowledge,
}
