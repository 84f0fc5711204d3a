//! Timer phase machine

use super::events::TimerEvent;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Countdown phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TimerPhase {
    /// No countdown; counters are zero
    #[default]
    Idle,
    /// Counting; ticks are evaluated every loop iteration
    Running,
    /// Counting frozen; the partial second is kept
    Paused,
    /// Duration reached; chime pending
    Completed,
}

impl TimerPhase {
    /// Check if a countdown is in progress (running or paused)
    pub fn is_active(&self) -> bool {
        matches!(self, TimerPhase::Running | TimerPhase::Paused)
    }

    /// Check if the appliance may suspend in this phase
    ///
    /// Idle and Completed are equivalent here.
    pub fn allows_suspend(&self) -> bool {
        matches!(self, TimerPhase::Idle | TimerPhase::Completed)
    }

    /// Process an event and return the next phase
    pub fn transition(self, event: TimerEvent) -> Self {
        use TimerEvent::*;
        use TimerPhase::*;

        match (self, event) {
            (Idle, Start) => Running,

            (Running, Pause) => Paused,
            (Running, DurationReached) => Completed,

            (Paused, Resume) => Running,

            (Completed, Acknowledge) => Idle,
            (Completed, Start) => Running,

            (_, Stop) => Idle,

            // Default: stay in current phase
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_to_running() {
        assert_eq!(TimerPhase::Idle.transition(TimerEvent::Start), TimerPhase::Running);
    }

    #[test]
    fn test_pause_resume() {
        let paused = TimerPhase::Running.transition(TimerEvent::Pause);
        assert_eq!(paused, TimerPhase::Paused);
        assert_eq!(paused.transition(TimerEvent::Resume), TimerPhase::Running);
    }

    #[test]
    fn test_stop_from_any_phase() {
        for phase in [
            TimerPhase::Idle,
            TimerPhase::Running,
            TimerPhase::Paused,
            TimerPhase::Completed,
        ] {
            assert_eq!(phase.transition(TimerEvent::Stop), TimerPhase::Idle);
        }
    }

    #[test]
    fn test_completion_and_acknowledge() {
        let done = TimerPhase::Running.transition(TimerEvent::DurationReached);
        assert_eq!(done, TimerPhase::Completed);
        assert_eq!(done.transition(TimerEvent::Acknowledge), TimerPhase::Idle);
        assert_eq!(done.transition(TimerEvent::Start), TimerPhase::Running);
    }

    #[test]
    fn test_invalid_transitions_ignored() {
        assert_eq!(TimerPhase::Idle.transition(TimerEvent::Pause), TimerPhase::Idle);
        assert_eq!(TimerPhase::Idle.transition(TimerEvent::Resume), TimerPhase::Idle);
        assert_eq!(TimerPhase::Paused.transition(TimerEvent::Start), TimerPhase::Paused);
        assert_eq!(TimerPhase::Paused.transition(TimerEvent::DurationReached), TimerPhase::Paused);
        assert_eq!(TimerPhase::Running.transition(TimerEvent::Start), TimerPhase::Running);
        assert_eq!(TimerPhase::Idle.transition(TimerEvent::Acknowledge), TimerPhase::Idle);
    }

    #[test]
    fn test_suspend_eligibility() {
        assert!(TimerPhase::Idle.allows_suspend());
        assert!(TimerPhase::Completed.allows_suspend());
        assert!(!TimerPhase::Running.allows_suspend());
        assert!(!TimerPhase::Paused.allows_suspend());
    }
}
