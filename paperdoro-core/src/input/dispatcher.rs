//! Press dispatch
//!
//! Handling a touch happens in two steps so the renderer can show press
//! feedback in between:
//!
//! 1. [`Dispatcher::accept`] debounces the edge, hit-tests it and records
//!    the activity. A miss changes nothing.
//! 2. [`Dispatcher::dispatch`] applies the button's action to the timer
//!    engine and returns the confirmation tone and the render request.

use paperdoro_hal::Point;

use crate::activity::ActivityMonitor;
use crate::config::PresetPolicy;
use crate::render::{RenderRequest, Repaint};
use crate::timer::{StartOutcome, TimerEngine};

use super::buttons::{ButtonKind, ButtonTable, Icon};

/// Length of every confirmation tone
pub const CONFIRM_TONE_MS: u32 = 100;

/// A tone to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Beep {
    pub frequency_hz: u16,
    pub duration_ms: u32,
}

impl Beep {
    const fn confirm(frequency_hz: u16) -> Self {
        Self {
            frequency_hz,
            duration_ms: CONFIRM_TONE_MS,
        }
    }
}

/// A recognized press on a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Press {
    /// Table index of the button
    pub index: usize,
    pub kind: ButtonKind,
}

/// Outcome of a dispatched press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dispatch {
    /// Confirmation tone
    pub beep: Beep,
    /// What the panel needs now
    pub request: RenderRequest,
}

/// Touch debouncer and action mapper
#[derive(Debug, Clone)]
pub struct Dispatcher {
    debounce_ms: u32,
    policy: PresetPolicy,
    last_accepted_ms: Option<u64>,
}

impl Dispatcher {
    /// Create a dispatcher
    pub fn new(debounce_ms: u32, policy: PresetPolicy) -> Self {
        Self {
            debounce_ms,
            policy,
            last_accepted_ms: None,
        }
    }

    /// Debounce and hit-test a press edge
    ///
    /// Returns `None` for edges inside the debounce window and for touches
    /// that miss every button. On a hit the activity clock is refreshed.
    pub fn accept(
        &mut self,
        point: Point,
        now_ms: u64,
        buttons: &ButtonTable,
        activity: &mut ActivityMonitor,
    ) -> Option<Press> {
        if let Some(last) = self.last_accepted_ms {
            if now_ms.saturating_sub(last) < self.debounce_ms as u64 {
                return None;
            }
        }

        let (index, button) = buttons.hit_test(point)?;
        self.last_accepted_ms = Some(now_ms);
        activity.record(now_ms);

        Some(Press {
            index,
            kind: button.kind,
        })
    }

    /// Apply a press to the timer engine
    pub fn dispatch(&self, press: &Press, engine: &mut TimerEngine, now_ms: u64) -> Dispatch {
        match press.kind {
            ButtonKind::Icon(Icon::Play) => {
                let request = match engine.start(now_ms) {
                    StartOutcome::Fresh => RenderRequest::Full(Repaint::Standard),
                    StartOutcome::Resumed | StartOutcome::Ignored => RenderRequest::None,
                };
                Dispatch {
                    beep: Beep::confirm(800),
                    request,
                }
            }
            ButtonKind::Icon(Icon::Pause) => {
                engine.pause(now_ms);
                Dispatch {
                    beep: Beep::confirm(600),
                    request: RenderRequest::None,
                }
            }
            ButtonKind::Icon(Icon::Stop) => {
                engine.stop();
                Dispatch {
                    beep: Beep::confirm(400),
                    request: RenderRequest::Full(Repaint::Standard),
                }
            }
            ButtonKind::Preset(minutes) => {
                let request = match engine.set_duration(minutes, self.policy) {
                    Ok(()) => RenderRequest::Full(Repaint::Standard),
                    Err(_) => RenderRequest::None,
                };
                Dispatch {
                    beep: Beep::confirm(700),
                    request,
                }
            }
            ButtonKind::Refresh => Dispatch {
                beep: Beep::confirm(500),
                request: RenderRequest::Full(Repaint::AntiGhost),
            },
        }
    }
}
