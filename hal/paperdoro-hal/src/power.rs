//! Power management abstraction

/// Battery sensing and the low-power suspend primitive
pub trait PowerSource {
    /// Battery charge level in percent (0-100)
    fn battery_percent(&mut self) -> u8;

    /// Check if external power is charging the battery
    fn is_charging(&mut self) -> bool;

    /// Enter deep sleep
    ///
    /// On hardware this never returns: wake-up is a cold boot and the whole
    /// system re-initializes. Host implementations may return so tests can
    /// observe the call.
    fn suspend(&mut self);
}
