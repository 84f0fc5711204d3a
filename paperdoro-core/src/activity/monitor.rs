//! Idle tracking

use crate::timer::TimerPhase;

/// Default idle threshold before suspend
pub const IDLE_TIMEOUT_MS: u64 = 300_000;

/// Result of an idle check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerStatus {
    /// Keep running
    Awake,
    /// Show the lock screen and suspend
    SuspendDue,
}

/// Activity clock and idle threshold
///
/// The clock is refreshed by every recognized button press and by a
/// countdown completing. A running or paused timer never suspends,
/// however long ago the last press was.
#[derive(Debug, Clone)]
pub struct ActivityMonitor {
    /// Last recorded activity
    last_activity_ms: u64,
    /// Idle time after which suspend is due (exclusive)
    idle_timeout_ms: u64,
}

impl Default for ActivityMonitor {
    fn default() -> Self {
        Self::new(IDLE_TIMEOUT_MS, 0)
    }
}

impl ActivityMonitor {
    /// Create a monitor whose activity clock starts at `now_ms`
    pub fn new(idle_timeout_ms: u64, now_ms: u64) -> Self {
        Self {
            last_activity_ms: now_ms,
            idle_timeout_ms,
        }
    }

    /// Record user or timer activity
    pub fn record(&mut self, now_ms: u64) {
        self.last_activity_ms = now_ms;
    }

    /// Last recorded activity
    pub fn last_activity_ms(&self) -> u64 {
        self.last_activity_ms
    }

    /// Time since the last activity
    pub fn idle_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.last_activity_ms)
    }

    /// Check whether suspend is due
    pub fn check(&self, now_ms: u64, phase: TimerPhase) -> PowerStatus {
        if phase.allows_suspend() && self.idle_ms(now_ms) > self.idle_timeout_ms {
            PowerStatus::SuspendDue
        } else {
            PowerStatus::Awake
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_exclusive() {
        let monitor = ActivityMonitor::new(300_000, 0);
        assert_eq!(monitor.check(300_000, TimerPhase::Idle), PowerStatus::Awake);
        assert_eq!(monitor.check(300_001, TimerPhase::Idle), PowerStatus::SuspendDue);
    }

    #[test]
    fn test_completed_equivalent_to_idle() {
        let monitor = ActivityMonitor::new(300_000, 0);
        assert_eq!(monitor.check(301_000, TimerPhase::Completed), PowerStatus::SuspendDue);
    }

    #[test]
    fn test_active_timer_never_suspends() {
        let monitor = ActivityMonitor::new(300_000, 0);
        assert_eq!(monitor.check(10_000_000, TimerPhase::Running), PowerStatus::Awake);
        assert_eq!(monitor.check(10_000_000, TimerPhase::Paused), PowerStatus::Awake);
    }

    #[test]
    fn test_activity_resets_idle_time() {
        let mut monitor = ActivityMonitor::new(300_000, 0);
        monitor.record(299_000);
        assert_eq!(monitor.check(301_000, TimerPhase::Idle), PowerStatus::Awake);
        assert_eq!(monitor.idle_ms(301_000), 2000);
    }
}
