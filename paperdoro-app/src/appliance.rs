//! Appliance context and scheduler loop
//!
//! [`Appliance`] owns every piece of mutable state: the board collaborators,
//! the timer engine, the renderer record and the monitors. One call to
//! [`Appliance::step`] is one loop iteration:
//!
//! 1. Touch: debounce, hit-test, press feedback, action, confirmation tone
//! 2. Tick evaluation against the monotonic clock
//! 3. One render of the merged request
//! 4. Completion chime
//! 5. Battery sampling
//! 6. Idle check, lock screen and suspend
//! 7. Loop delay
//!
//! Blocking work (holds, tones, flashes) is fine anywhere in the iteration:
//! the tick evaluation always catches up from the clock.

use paperdoro_core::activity::{ActivityMonitor, BatteryMonitor, PowerStatus};
use paperdoro_core::config::{
    ApplianceConfig, TimerConfig, CHIME_FREQUENCY_HZ, CHIME_PULSES, CHIME_SPACING_MS, CHIME_TONE_MS,
    LOOP_DELAY_MS,
};
use paperdoro_core::input::{ButtonTable, Dispatcher};
use paperdoro_core::render::{RenderRequest, Repaint};
use paperdoro_core::timer::TimerEngine;
use paperdoro_display::{RenderEngine, RenderView};
use paperdoro_hal::{Clock, DrawSurface, ImageStore, Point, PowerSource, Speaker, TouchSource};

/// Board collaborators
pub struct Board<S, T, P, A, I, C> {
    pub surface: S,
    pub touch: T,
    pub power: P,
    pub speaker: A,
    pub store: I,
    pub clock: C,
}

/// Result of one loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Keep looping
    Continue,
    /// The lock screen is up and the suspend primitive returned
    Suspended,
}

/// The running appliance
pub struct Appliance<S, T, P, A, I, C> {
    board: Board<S, T, P, A, I, C>,
    config: ApplianceConfig,
    engine: TimerEngine,
    renderer: RenderEngine,
    buttons: ButtonTable,
    dispatcher: Dispatcher,
    activity: ActivityMonitor,
    battery: BatteryMonitor,
}

impl<S, T, P, A, I, C> Appliance<S, T, P, A, I, C>
where
    S: DrawSurface,
    T: TouchSource,
    P: PowerSource,
    A: Speaker,
    I: ImageStore,
    C: Clock,
{
    /// Lay out the screen, take the first battery sample and paint
    pub fn boot(mut board: Board<S, T, P, A, I, C>, config: ApplianceConfig) -> Self {
        let width = board.surface.width();
        let height = board.surface.height();
        info!("booting on {}x{} panel", width, height);

        let buttons = ButtonTable::layout(width, height, &config.timer.presets);
        for (index, button) in buttons.iter().enumerate() {
            debug!(
                "button {} '{}' at ({}, {}) {}x{}",
                index,
                button.label.as_str(),
                button.bounds.x,
                button.bounds.y,
                button.bounds.width,
                button.bounds.height
            );
        }

        let timer_config = config.timer_config().unwrap_or_else(|e| {
            warn!("boot duration rejected: {:?}", e);
            TimerConfig::default()
        });
        let engine = TimerEngine::new(timer_config);
        let renderer = RenderEngine::new(&config.layout, width, height, engine.duration_minutes());
        let dispatcher = Dispatcher::new(config.input.debounce_ms, config.timer.preset_policy);

        let now = board.clock.now_ms();
        let activity = ActivityMonitor::new(config.power.idle_timeout_ms(), now);
        let mut battery = BatteryMonitor::new(config.power.battery_interval_ms());
        let level = board.power.battery_percent();
        let charging = board.power.is_charging();
        battery.record(level, charging, now);

        let mut appliance = Self {
            board,
            config,
            engine,
            renderer,
            buttons,
            dispatcher,
            activity,
            battery,
        };
        appliance.render(RenderRequest::Full(Repaint::Standard));
        info!("ready, {} min", appliance.engine.duration_minutes());
        appliance
    }

    /// Loop until the device suspends
    pub fn run(&mut self) {
        while self.step() == Step::Continue {}
    }

    /// Run one loop iteration
    pub fn step(&mut self) -> Step {
        let mut request = RenderRequest::None;

        if let Some(point) = self.board.touch.poll_press_edge() {
            request = request.merge(self.handle_touch(point));
        }

        let now = self.board.clock.now_ms();
        let report = self.engine.advance(now);
        if report.completed {
            // Completion is activity, timed from the tick not the chime
            self.activity.record(now);
        }
        request = request.merge(report.request);
        self.render(request);

        if report.completed {
            self.chime();
        }

        self.poll_battery();

        let now = self.board.clock.now_ms();
        if self.activity.check(now, self.engine.phase()) == PowerStatus::SuspendDue {
            self.suspend();
            return Step::Suspended;
        }

        self.board.clock.hold(LOOP_DELAY_MS);
        Step::Continue
    }

    fn handle_touch(&mut self, point: Point) -> RenderRequest {
        let now = self.board.clock.now_ms();
        let Some(press) = self
            .dispatcher
            .accept(point, now, &self.buttons, &mut self.activity)
        else {
            return RenderRequest::None;
        };
        let Some(button) = self.buttons.get(press.index) else {
            return RenderRequest::None;
        };
        debug!("press: button {}", press.index);

        if let Err(e) = self
            .renderer
            .press_feedback(button, &mut self.board.surface, &mut self.board.clock)
        {
            error!("press feedback failed: {:?}", e);
        }

        let now = self.board.clock.now_ms();
        let before = self.engine.phase();
        let dispatch = self.dispatcher.dispatch(&press, &mut self.engine, now);
        if self.engine.phase() != before {
            info!("timer {:?} -> {:?}", before, self.engine.phase());
        }
        self.board
            .speaker
            .tone(dispatch.beep.frequency_hz, dispatch.beep.duration_ms);

        // A full repaint redraws the button anyway
        if !dispatch.request.is_full() {
            if let Err(e) = self.renderer.restore_button(button, &mut self.board.surface) {
                error!("button restore failed: {:?}", e);
            }
        }

        dispatch.request
    }

    fn render(&mut self, request: RenderRequest) {
        match request {
            RenderRequest::None => return,
            RenderRequest::Incremental(dot) => {
                debug!("incremental repaint, last dot {:?} #{}", dot.ring, dot.index)
            }
            RenderRequest::Full(repaint) => debug!("full repaint {:?}", repaint),
        }
        let battery = self.battery.status();
        let view = RenderView {
            state: self.engine.state(),
            duration_minutes: self.engine.duration_minutes(),
            buttons: &self.buttons,
            battery: &battery,
        };
        if let Err(e) = self
            .renderer
            .render(request, &view, &mut self.board.surface, &mut self.board.clock)
        {
            error!("render failed: {:?}", e);
        }
    }

    fn chime(&mut self) {
        info!("countdown complete");
        for pulse in 0..CHIME_PULSES {
            if pulse > 0 {
                self.board.clock.hold(CHIME_SPACING_MS - CHIME_TONE_MS);
            }
            self.board.speaker.tone(CHIME_FREQUENCY_HZ, CHIME_TONE_MS);
        }
        self.engine.acknowledge_completion();
    }

    fn poll_battery(&mut self) {
        let now = self.board.clock.now_ms();
        if !self.battery.is_due(now) {
            return;
        }

        let level = self.board.power.battery_percent();
        let charging = self.board.power.is_charging();
        let status = self.battery.record(level, charging, now);
        debug!("battery {}% charging={}", status.level_percent, status.is_charging);

        if BatteryMonitor::may_redraw(self.engine.phase()) {
            if let Err(e) = self.renderer.draw_battery(&status, &mut self.board.surface) {
                error!("battery redraw failed: {:?}", e);
            }
        }
    }

    fn suspend(&mut self) {
        info!("idle, showing lock screen");
        match self.renderer.lock_screen(
            self.config.power.lock_image.as_str(),
            &mut self.board.store,
            &mut self.board.surface,
        ) {
            Ok(shown) => debug!("lock screen: {:?}", shown),
            Err(e) => error!("lock screen failed: {:?}", e),
        }
        self.board.clock.hold(self.config.power.lock_settle_ms);
        self.board.power.suspend();
    }

    /// Board collaborators
    pub fn board(&self) -> &Board<S, T, P, A, I, C> {
        &self.board
    }

    /// Board collaborators, mutably
    pub fn board_mut(&mut self) -> &mut Board<S, T, P, A, I, C> {
        &mut self.board
    }

    /// Configuration in effect
    pub fn config(&self) -> &ApplianceConfig {
        &self.config
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn renderer(&self) -> &RenderEngine {
        &self.renderer
    }

    pub fn buttons(&self) -> &ButtonTable {
        &self.buttons
    }

    pub fn activity(&self) -> &ActivityMonitor {
        &self.activity
    }

    pub fn battery(&self) -> &BatteryMonitor {
        &self.battery
    }
}
