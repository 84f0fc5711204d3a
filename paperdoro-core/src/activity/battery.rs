//! Battery polling

use crate::timer::TimerPhase;

/// Default battery sampling interval
pub const BATTERY_INTERVAL_MS: u64 = 60_000;

/// Last battery sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryStatus {
    /// Charge level (0-100)
    pub level_percent: u8,
    pub is_charging: bool,
    /// When the sample was taken
    pub last_sample_ms: u64,
}

/// Battery sampling schedule
#[derive(Debug, Clone)]
pub struct BatteryMonitor {
    interval_ms: u64,
    status: Option<BatteryStatus>,
}

impl Default for BatteryMonitor {
    fn default() -> Self {
        Self::new(BATTERY_INTERVAL_MS)
    }
}

impl BatteryMonitor {
    /// Create a monitor; the first sample is due immediately
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            status: None,
        }
    }

    /// Check whether a new sample should be taken
    pub fn is_due(&self, now_ms: u64) -> bool {
        match self.status {
            None => true,
            Some(status) => now_ms.saturating_sub(status.last_sample_ms) >= self.interval_ms,
        }
    }

    /// Store a new sample; the level is clamped to 100
    pub fn record(&mut self, level_percent: u8, is_charging: bool, now_ms: u64) -> BatteryStatus {
        let status = BatteryStatus {
            level_percent: level_percent.min(100),
            is_charging,
            last_sample_ms: now_ms,
        };
        self.status = Some(status);
        status
    }

    /// Latest sample, or an empty reading before the first one
    pub fn status(&self) -> BatteryStatus {
        self.status.unwrap_or_default()
    }

    /// Whether the indicator may be redrawn in this phase
    ///
    /// Suppressed while running so the ring updates stay undisturbed.
    pub fn may_redraw(phase: TimerPhase) -> bool {
        phase != TimerPhase::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_due_immediately() {
        let monitor = BatteryMonitor::new(60_000);
        assert!(monitor.is_due(0));
    }

    #[test]
    fn test_interval() {
        let mut monitor = BatteryMonitor::new(60_000);
        monitor.record(80, false, 1000);
        assert!(!monitor.is_due(60_999));
        assert!(monitor.is_due(61_000));
    }

    #[test]
    fn test_level_clamped() {
        let mut monitor = BatteryMonitor::default();
        let status = monitor.record(140, true, 0);
        assert_eq!(status.level_percent, 100);
        assert!(monitor.status().is_charging);
    }

    #[test]
    fn test_redraw_suppressed_only_while_running() {
        assert!(!BatteryMonitor::may_redraw(TimerPhase::Running));
        assert!(BatteryMonitor::may_redraw(TimerPhase::Paused));
        assert!(BatteryMonitor::may_redraw(TimerPhase::Idle));
    }
}
