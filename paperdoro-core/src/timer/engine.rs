//! Countdown engine
//!
//! Owns the [`TimerState`] and drives the phase machine. Ticks are derived
//! from the monotonic clock, never from loop iterations: every call to
//! [`TimerEngine::advance`] processes all whole seconds that elapsed since
//! the last processed tick and moves the tick timestamp forward by exactly
//! that many seconds. Time spent in blocking pulses is therefore absorbed by
//! the next evaluation and the cadence never drifts.

use crate::config::{ConfigError, PresetPolicy, TimerConfig};
use crate::geometry::{Dot, SECONDS_PER_MINUTE};
use crate::render::{RenderRequest, Repaint};

use super::events::TimerEvent;
use super::machine::TimerPhase;

/// Length of one tick
pub const TICK_MS: u64 = 1000;

/// A full repaint is scheduled every this many completed minutes
pub const ANTI_GHOST_INTERVAL_MINUTES: u8 = 5;

/// Timer engine errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerError {
    /// Duration outside the supported range
    InvalidDuration(u8),
    /// A countdown is active and the preset policy forbids interrupting it
    Busy,
}

impl From<ConfigError> for TimerError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::InvalidDuration(minutes) => TimerError::InvalidDuration(minutes),
            _ => TimerError::InvalidDuration(0),
        }
    }
}

/// Countdown progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerState {
    /// Current phase
    pub phase: TimerPhase,
    /// Seconds elapsed in the current minute (0..60)
    pub elapsed_seconds: u8,
    /// Whole minutes elapsed (below the duration while running)
    pub elapsed_minutes: u8,
    /// Timestamp of the last processed tick
    pub last_tick_ms: u64,
    /// Partial second frozen by a pause
    pub carry_ms: u64,
}

impl TimerState {
    fn reset_counters(&mut self) {
        self.elapsed_seconds = 0;
        self.elapsed_minutes = 0;
        self.carry_ms = 0;
    }
}

/// How a start request was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartOutcome {
    /// A new countdown began from zero
    Fresh,
    /// A paused countdown continued
    Resumed,
    /// Already running; nothing changed
    Ignored,
}

/// Result of one tick evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Number of ticks processed
    pub ticks: u32,
    /// Merged render request of all processed ticks
    pub request: RenderRequest,
    /// The countdown reached its duration during this evaluation
    pub completed: bool,
}

/// Countdown engine
#[derive(Debug, Clone)]
pub struct TimerEngine {
    config: TimerConfig,
    state: TimerState,
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(TimerConfig::default())
    }
}

impl TimerEngine {
    /// Create an idle engine
    pub fn new(config: TimerConfig) -> Self {
        Self {
            config,
            state: TimerState::default(),
        }
    }

    /// Current timer config
    pub fn config(&self) -> TimerConfig {
        self.config
    }

    /// Configured duration in minutes
    pub fn duration_minutes(&self) -> u8 {
        self.config.duration_minutes()
    }

    /// Read-only snapshot of the state
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Current phase
    pub fn phase(&self) -> TimerPhase {
        self.state.phase
    }

    fn apply(&mut self, event: TimerEvent) -> bool {
        let next = self.state.phase.transition(event);
        let changed = next != self.state.phase;
        self.state.phase = next;
        changed
    }

    /// Start a fresh countdown, or resume a paused one
    pub fn start(&mut self, now_ms: u64) -> StartOutcome {
        match self.state.phase {
            TimerPhase::Running => StartOutcome::Ignored,
            TimerPhase::Paused => {
                self.resume(now_ms);
                StartOutcome::Resumed
            }
            TimerPhase::Idle | TimerPhase::Completed => {
                self.apply(TimerEvent::Start);
                self.state.reset_counters();
                self.state.last_tick_ms = now_ms;
                StartOutcome::Fresh
            }
        }
    }

    /// Freeze the countdown; only acts while running
    pub fn pause(&mut self, now_ms: u64) -> bool {
        if !self.apply(TimerEvent::Pause) {
            return false;
        }
        self.state.carry_ms = now_ms.saturating_sub(self.state.last_tick_ms);
        true
    }

    /// Continue a paused countdown
    ///
    /// The tick timestamp is re-armed so that the partial second frozen by
    /// `pause` is neither lost nor counted twice.
    pub fn resume(&mut self, now_ms: u64) -> bool {
        if !self.apply(TimerEvent::Resume) {
            return false;
        }
        self.state.last_tick_ms = now_ms.saturating_sub(self.state.carry_ms);
        self.state.carry_ms = 0;
        true
    }

    /// Abort any countdown and zero the counters
    pub fn stop(&mut self) {
        self.apply(TimerEvent::Stop);
        self.state.reset_counters();
    }

    /// Select a new duration
    ///
    /// Under [`PresetPolicy::ForceApply`] an active countdown is stopped
    /// first. Under [`PresetPolicy::RejectWhileActive`] the call fails with
    /// [`TimerError::Busy`] and nothing changes.
    pub fn set_duration(&mut self, minutes: u8, policy: PresetPolicy) -> Result<(), TimerError> {
        let config = TimerConfig::new(minutes)?;
        if policy == PresetPolicy::RejectWhileActive && self.state.phase.is_active() {
            return Err(TimerError::Busy);
        }
        self.stop();
        self.config = config;
        Ok(())
    }

    /// Return a completed timer to idle once the chime has played
    pub fn acknowledge_completion(&mut self) -> bool {
        self.apply(TimerEvent::Acknowledge)
    }

    /// Process every tick that is due at `now_ms`
    pub fn advance(&mut self, now_ms: u64) -> TickReport {
        let mut report = TickReport::default();
        if self.state.phase != TimerPhase::Running {
            return report;
        }

        let due = now_ms.saturating_sub(self.state.last_tick_ms) / TICK_MS;
        for _ in 0..due {
            self.state.last_tick_ms += TICK_MS;
            report.ticks += 1;

            let (request, completed) = self.tick();
            report.request = report.request.merge(request);
            if completed {
                report.completed = true;
                break;
            }
        }

        report
    }

    fn tick(&mut self) -> (RenderRequest, bool) {
        let duration = self.config.duration_minutes();

        self.state.elapsed_seconds += 1;
        if self.state.elapsed_seconds < SECONDS_PER_MINUTE {
            let dot = Dot::for_second(self.state.elapsed_seconds - 1);
            return (RenderRequest::Incremental(dot), false);
        }

        self.state.elapsed_seconds = 0;
        self.state.elapsed_minutes += 1;

        if self.state.elapsed_minutes >= duration {
            self.apply(TimerEvent::DurationReached);
            self.state.reset_counters();
            return (RenderRequest::Full(Repaint::Standard), true);
        }

        let minutes = self.state.elapsed_minutes;
        let mut request = RenderRequest::Incremental(Dot::for_minute(minutes - 1, duration));
        if minutes % ANTI_GHOST_INTERVAL_MINUTES == 0 {
            request = request.merge(RenderRequest::Full(Repaint::Standard));
        }
        (request, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn engine(minutes: u8) -> TimerEngine {
        TimerEngine::new(TimerConfig::new(minutes).unwrap())
    }

    /// Run one-second steps from `from_ms`, returning the reports
    fn run_seconds(engine: &mut TimerEngine, from_ms: u64, seconds: u64) -> heapless::Vec<TickReport, 4096> {
        let mut reports = heapless::Vec::new();
        for s in 1..=seconds {
            let _ = reports.push(engine.advance(from_ms + s * TICK_MS));
        }
        reports
    }

    #[test]
    fn test_start_from_idle() {
        let mut engine = engine(25);
        assert_eq!(engine.start(1000), StartOutcome::Fresh);
        assert_eq!(engine.phase(), TimerPhase::Running);
        assert_eq!(engine.state().last_tick_ms, 1000);
        assert_eq!(engine.start(2000), StartOutcome::Ignored);
    }

    #[test]
    fn test_no_ticks_while_idle() {
        let mut engine = engine(25);
        let report = engine.advance(10_000);
        assert_eq!(report.ticks, 0);
        assert!(report.request.is_none());
    }

    #[test]
    fn test_single_tick_fills_last_outer_dot() {
        let mut engine = engine(25);
        engine.start(0);
        assert_eq!(engine.advance(999).ticks, 0);

        let report = engine.advance(1000);
        assert_eq!(report.ticks, 1);
        assert_eq!(report.request, RenderRequest::Incremental(Dot::for_second(0)));
        assert_eq!(engine.state().elapsed_seconds, 1);
    }

    #[test]
    fn test_blocked_interval_is_caught_up() {
        let mut engine = engine(25);
        engine.start(0);
        engine.advance(500);

        // A blocking pulse spanned several seconds; every due tick is processed
        let report = engine.advance(3200);
        assert_eq!(report.ticks, 3);
        assert_eq!(engine.state().elapsed_seconds, 3);
        assert_eq!(engine.state().last_tick_ms, 3000);

        assert_eq!(engine.advance(3999).ticks, 0);
        assert_eq!(engine.advance(4000).ticks, 1);
    }

    #[test]
    fn test_minute_rollover() {
        let mut engine = engine(25);
        engine.start(0);
        let reports = run_seconds(&mut engine, 0, 60);
        let last = reports[59];
        assert_eq!(last.request, RenderRequest::Incremental(Dot::for_minute(0, 25)));
        assert_eq!(engine.state().elapsed_seconds, 0);
        assert_eq!(engine.state().elapsed_minutes, 1);
    }

    #[test]
    fn test_every_fifth_minute_full_repaint() {
        let mut engine = engine(25);
        engine.start(0);
        let reports = run_seconds(&mut engine, 0, 24 * 60);
        let full: heapless::Vec<usize, 8> = reports
            .iter()
            .enumerate()
            .filter(|(_, r)| r.request.is_full())
            .map(|(i, _)| i + 1)
            .collect();
        assert_eq!(&full[..], &[300, 600, 900, 1200]);
    }

    #[test]
    fn test_completion() {
        let mut engine = engine(5);
        engine.start(0);
        let reports = run_seconds(&mut engine, 0, 5 * 60);

        let completions = reports.iter().filter(|r| r.completed).count();
        assert_eq!(completions, 1);
        assert!(reports[299].completed);
        assert_eq!(engine.phase(), TimerPhase::Completed);
        assert_eq!(engine.state().elapsed_seconds, 0);
        assert_eq!(engine.state().elapsed_minutes, 0);

        // No further ticks once completed
        assert_eq!(engine.advance(400_000).ticks, 0);
        assert!(engine.acknowledge_completion());
        assert_eq!(engine.phase(), TimerPhase::Idle);
    }

    #[test]
    fn test_completion_stops_catch_up() {
        let mut engine = engine(1);
        engine.start(0);
        let report = engine.advance(90_000);
        assert!(report.completed);
        assert_eq!(report.ticks, 60);
        assert_eq!(engine.state().elapsed_seconds, 0);
    }

    #[test]
    fn test_restart_after_completion() {
        let mut engine = engine(1);
        engine.start(0);
        engine.advance(60_000);
        assert_eq!(engine.start(70_000), StartOutcome::Fresh);
        assert_eq!(engine.phase(), TimerPhase::Running);
        assert_eq!(engine.state().last_tick_ms, 70_000);
    }

    #[test]
    fn test_pause_keeps_partial_second() {
        let mut engine = engine(25);
        engine.start(0);
        engine.advance(2400);
        assert!(engine.pause(2400));
        assert_eq!(engine.state().carry_ms, 400);

        assert_eq!(engine.advance(50_000).ticks, 0);

        assert!(engine.resume(100_000));
        assert_eq!(engine.state().last_tick_ms, 99_600);
        assert_eq!(engine.advance(100_599).ticks, 0);
        assert_eq!(engine.advance(100_600).ticks, 1);
        assert_eq!(engine.state().elapsed_seconds, 3);
    }

    #[test]
    fn test_start_resumes_paused() {
        let mut engine = engine(25);
        engine.start(0);
        engine.advance(5000);
        engine.pause(5000);
        assert_eq!(engine.start(9000), StartOutcome::Resumed);
        assert_eq!(engine.state().elapsed_seconds, 5);
    }

    #[test]
    fn test_pause_only_when_running() {
        let mut engine = engine(25);
        assert!(!engine.pause(0));
        assert!(!engine.resume(0));
        assert_eq!(engine.phase(), TimerPhase::Idle);
    }

    #[test]
    fn test_stop_resets() {
        let mut engine = engine(25);
        engine.start(0);
        engine.advance(125_000);
        engine.stop();
        assert_eq!(engine.phase(), TimerPhase::Idle);
        assert_eq!(engine.state().elapsed_seconds, 0);
        assert_eq!(engine.state().elapsed_minutes, 0);
    }

    #[test]
    fn test_set_duration_force_apply() {
        let mut engine = engine(25);
        engine.start(0);
        engine.advance(10_000);
        assert_eq!(engine.set_duration(5, PresetPolicy::ForceApply), Ok(()));
        assert_eq!(engine.phase(), TimerPhase::Idle);
        assert_eq!(engine.duration_minutes(), 5);
        assert_eq!(engine.state().elapsed_seconds, 0);
    }

    #[test]
    fn test_set_duration_rejected_while_active() {
        let mut engine = engine(25);
        engine.start(0);
        engine.advance(10_000);
        assert_eq!(
            engine.set_duration(5, PresetPolicy::RejectWhileActive),
            Err(TimerError::Busy)
        );
        assert_eq!(engine.phase(), TimerPhase::Running);
        assert_eq!(engine.duration_minutes(), 25);
        assert_eq!(engine.state().elapsed_seconds, 10);

        engine.pause(10_000);
        assert_eq!(
            engine.set_duration(5, PresetPolicy::RejectWhileActive),
            Err(TimerError::Busy)
        );

        engine.stop();
        assert_eq!(engine.set_duration(5, PresetPolicy::RejectWhileActive), Ok(()));
        assert_eq!(engine.duration_minutes(), 5);
    }

    #[test]
    fn test_set_duration_validates() {
        let mut engine = engine(25);
        assert_eq!(
            engine.set_duration(0, PresetPolicy::ForceApply),
            Err(TimerError::InvalidDuration(0))
        );
        assert_eq!(engine.duration_minutes(), 25);
    }

    proptest! {
        #[test]
        fn prop_every_duration_completes(minutes in 1u8..=60) {
            let mut engine = engine(minutes);
            engine.start(0);
            let total = minutes as u64 * 60;
            let mut completions = 0;
            for s in 1..=total {
                let report = engine.advance(s * TICK_MS);
                if s < total {
                    prop_assert!(engine.state().elapsed_minutes < minutes);
                }
                if report.completed {
                    completions += 1;
                }
            }
            prop_assert_eq!(completions, 1);
            prop_assert_eq!(engine.phase(), TimerPhase::Completed);
            prop_assert_eq!(engine.state().elapsed_seconds, 0);
            prop_assert_eq!(engine.state().elapsed_minutes, 0);
        }

        #[test]
        fn prop_pause_preserves_counters(
            run_ms in 0u64..600_000,
            pause_ms in 0u64..10_000_000,
        ) {
            let mut engine = engine(60);
            engine.start(0);
            engine.advance(run_ms);
            let before = *engine.state();

            engine.pause(run_ms);
            engine.advance(run_ms + pause_ms);
            engine.resume(run_ms + pause_ms);

            prop_assert_eq!(engine.state().elapsed_seconds, before.elapsed_seconds);
            prop_assert_eq!(engine.state().elapsed_minutes, before.elapsed_minutes);

            // The partial second before the pause is honored after it
            let next_tick = run_ms + pause_ms + (TICK_MS - (run_ms % TICK_MS));
            prop_assert_eq!(engine.advance(next_tick - 1).ticks, 0);
            prop_assert_eq!(engine.advance(next_tick).ticks, 1);
        }

        #[test]
        fn prop_one_full_repaint_per_five_minutes(minutes in 1u8..=60) {
            let mut engine = engine(minutes);
            engine.start(0);
            let mut full = 0u32;
            for s in 1..=(minutes as u64 * 60) {
                if engine.advance(s * TICK_MS).request.is_full() {
                    full += 1;
                }
            }
            // Scheduled anti-ghost repaints before the end, plus completion
            let scheduled = (minutes as u32 - 1) / ANTI_GHOST_INTERVAL_MINUTES as u32;
            prop_assert_eq!(full, scheduled + 1);
        }
    }
}
