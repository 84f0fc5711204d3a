//! Render engine
//!
//! Keeps a record of how many dots are painted filled on each ring and
//! brings the panel in line with the timer state:
//!
//! - Incremental requests repaint only dots whose fill differs between the
//!   record and the state, then commit a partial refresh. In an ordinary
//!   tick that is exactly one dot; a minute rollover clears the outer ring
//!   and fills one inner dot.
//! - Full requests clear the screen, redraw every element from the state and
//!   commit a full refresh. The anti-ghost variant first drives the whole
//!   panel black and then white.
//!
//! Filled dots are painted white, empty dots black, so the rings empty out
//! as the countdown progresses.

use embedded_hal::delay::DelayNs;
use heapless::String;
use paperdoro_core::activity::BatteryStatus;
use paperdoro_core::config::{LayoutSettings, FLASH_STAGE_MS, MAX_LABEL_LEN, PRESS_HOLD_MS};
use paperdoro_core::geometry::{Dot, Ring, RingGeometry};
use paperdoro_core::input::{ButtonSpec, ButtonTable};
use paperdoro_core::render::{RenderRequest, Repaint};
use paperdoro_core::timer::TimerState;
use paperdoro_hal::{
    DrawSurface, ImageStore, Point, RefreshMode, Shape, SurfaceError, TextAlign, TextSize, Tone,
};

use crate::error::DisplayError;
use crate::widgets::{self, BATTERY_AREA, BUTTON_CORNER};

/// Edge length of the square lock image
pub const LOCK_IMAGE_SIZE: u32 = 540;

/// Everything a repaint reads
#[derive(Debug, Clone, Copy)]
pub struct RenderView<'a> {
    pub state: &'a TimerState,
    pub duration_minutes: u8,
    pub buttons: &'a ButtonTable,
    pub battery: &'a BatteryStatus,
}

/// What the lock screen ended up showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LockScreen {
    /// The lock image from the image store
    Image,
    /// Text placeholder (image missing or store unavailable)
    Placeholder,
}

/// Incremental and full repaint recipes
pub struct RenderEngine {
    geometry: RingGeometry,
    title: String<MAX_LABEL_LEN>,
    subtitle: String<MAX_LABEL_LEN>,
    /// Outer dots currently painted filled
    painted_seconds: u8,
    /// Inner dots currently painted filled
    painted_minutes: u8,
}

impl RenderEngine {
    /// Create a renderer for a `width` x `height` surface
    pub fn new(layout: &LayoutSettings, width: u32, height: u32, duration_minutes: u8) -> Self {
        Self {
            geometry: RingGeometry::new(layout, width, height, duration_minutes),
            title: layout.title.clone(),
            subtitle: layout.subtitle.clone(),
            painted_seconds: 0,
            painted_minutes: 0,
        }
    }

    /// Current ring placement
    pub fn geometry(&self) -> &RingGeometry {
        &self.geometry
    }

    /// Filled dot counts as last painted (outer, inner)
    pub fn painted(&self) -> (u8, u8) {
        (self.painted_seconds, self.painted_minutes)
    }

    /// Consume a merged render request
    pub fn render<S, D>(
        &mut self,
        request: RenderRequest,
        view: &RenderView<'_>,
        surface: &mut S,
        delay: &mut D,
    ) -> Result<(), DisplayError>
    where
        S: DrawSurface,
        D: DelayNs,
    {
        match request {
            RenderRequest::None => Ok(()),
            RenderRequest::Incremental(_) => {
                // The inner ring was laid out for another duration
                if view.duration_minutes != self.geometry.total(Ring::Inner) {
                    return self.full(view, surface);
                }
                self.incremental(view.state, surface)
            }
            RenderRequest::Full(Repaint::Standard) => self.full(view, surface),
            RenderRequest::Full(Repaint::AntiGhost) => self.anti_ghost(view, surface, delay),
        }
    }

    /// Repaint only the dots that changed since the last paint
    pub fn incremental<S: DrawSurface>(&mut self, state: &TimerState, surface: &mut S) -> Result<(), DisplayError> {
        let outer = self.sync_ring(Ring::Outer, self.painted_seconds, state.elapsed_seconds, surface)?;
        let inner = self.sync_ring(Ring::Inner, self.painted_minutes, state.elapsed_minutes, surface)?;
        self.painted_seconds = state.elapsed_seconds;
        self.painted_minutes = state.elapsed_minutes;

        if outer || inner {
            surface.commit(RefreshMode::Partial)?;
        }
        Ok(())
    }

    /// Clear and redraw everything, then commit a full refresh
    pub fn full<S: DrawSurface>(&mut self, view: &RenderView<'_>, surface: &mut S) -> Result<(), DisplayError> {
        self.draw_content(view, surface)?;
        surface.commit(RefreshMode::Full)?;
        Ok(())
    }

    /// Black flash, white flash, then a full redraw
    pub fn anti_ghost<S, D>(
        &mut self,
        view: &RenderView<'_>,
        surface: &mut S,
        delay: &mut D,
    ) -> Result<(), DisplayError>
    where
        S: DrawSurface,
        D: DelayNs,
    {
        for tone in [Tone::Black, Tone::White] {
            surface.fill_screen(tone)?;
            surface.commit(RefreshMode::Full)?;
            delay.delay_ms(FLASH_STAGE_MS);
        }
        self.full(view, surface)
    }

    /// Highlight a pressed button and hold it
    pub fn press_feedback<S, D>(&mut self, button: &ButtonSpec, surface: &mut S, delay: &mut D) -> Result<(), DisplayError>
    where
        S: DrawSurface,
        D: DelayNs,
    {
        surface.draw_filled_shape(button_region(button), Tone::Highlight)?;
        surface.commit(RefreshMode::Partial)?;
        delay.delay_ms(PRESS_HOLD_MS);
        Ok(())
    }

    /// Redraw a single button in its unpressed state
    pub fn restore_button<S: DrawSurface>(&mut self, button: &ButtonSpec, surface: &mut S) -> Result<(), DisplayError> {
        surface.draw_filled_shape(button_region(button), Tone::White)?;
        widgets::draw_button(surface, button)?;
        surface.commit(RefreshMode::Partial)?;
        Ok(())
    }

    /// Redraw the battery indicator with a partial refresh
    pub fn draw_battery<S: DrawSurface>(&mut self, status: &BatteryStatus, surface: &mut S) -> Result<(), DisplayError> {
        surface.fill_region(BATTERY_AREA, Tone::White)?;
        widgets::draw_battery(surface, status)?;
        surface.commit(RefreshMode::Partial)?;
        Ok(())
    }

    /// Paint the lock screen shown before suspend
    ///
    /// A missing image or an unavailable store falls back to text.
    pub fn lock_screen<S, I>(&mut self, image_path: &str, store: &mut I, surface: &mut S) -> Result<LockScreen, DisplayError>
    where
        S: DrawSurface,
        I: ImageStore,
    {
        surface.fill_screen(Tone::White)?;

        let mut shown = LockScreen::Placeholder;
        if store.exists(image_path) {
            let origin = Point::new(
                (surface.width() as i32 - LOCK_IMAGE_SIZE as i32) / 2,
                (surface.height() as i32 - LOCK_IMAGE_SIZE as i32) / 2,
            );
            if store.draw_image_file(image_path, origin, surface).is_ok() {
                shown = LockScreen::Image;
            } else {
                // Discard whatever the failed decode left behind
                surface.fill_screen(Tone::White)?;
            }
        }

        if shown == LockScreen::Placeholder {
            let center = Point::new((surface.width() / 2) as i32, (surface.height() / 2) as i32);
            surface.draw_text(
                self.title.as_str(),
                center.offset(0, -20),
                TextAlign::Center,
                TextSize::Large,
                Tone::Black,
            )?;
            surface.draw_text("Sleep Mode", center.offset(0, 20), TextAlign::Center, TextSize::Small, Tone::Black)?;
        }

        surface.commit(RefreshMode::Full)?;
        Ok(shown)
    }

    fn draw_content<S: DrawSurface>(&mut self, view: &RenderView<'_>, surface: &mut S) -> Result<(), SurfaceError> {
        self.geometry.set_duration(view.duration_minutes);
        surface.fill_screen(Tone::White)?;

        let state = view.state;
        for ring in [Ring::Outer, Ring::Inner] {
            let elapsed = match ring {
                Ring::Outer => state.elapsed_seconds,
                Ring::Inner => state.elapsed_minutes,
            };
            for index in 0..self.geometry.total(ring) {
                let dot = Dot { ring, index };
                self.draw_dot(surface, dot, self.geometry.is_filled(dot, elapsed))?;
            }
        }
        self.painted_seconds = state.elapsed_seconds;
        self.painted_minutes = state.elapsed_minutes;

        let center = self.geometry.center();
        widgets::draw_duration(surface, center, view.duration_minutes)?;
        widgets::draw_title(surface, center, self.title.as_str(), self.subtitle.as_str())?;
        for button in view.buttons.iter() {
            widgets::draw_button(surface, button)?;
        }
        widgets::draw_battery(surface, view.battery)
    }

    fn sync_ring<S: DrawSurface>(&self, ring: Ring, painted: u8, target: u8, surface: &mut S) -> Result<bool, SurfaceError> {
        if painted == target {
            return Ok(false);
        }
        for index in 0..self.geometry.total(ring) {
            let dot = Dot { ring, index };
            let filled = self.geometry.is_filled(dot, target);
            if filled != self.geometry.is_filled(dot, painted) {
                self.draw_dot(surface, dot, filled)?;
            }
        }
        Ok(true)
    }

    fn draw_dot<S: DrawSurface>(&self, surface: &mut S, dot: Dot, filled: bool) -> Result<(), SurfaceError> {
        let tone = if filled { Tone::White } else { Tone::Black };
        surface.draw_filled_shape(
            Shape::Circle {
                center: self.geometry.position(dot),
                radius: self.geometry.dot_radius(dot.ring),
            },
            tone,
        )
    }
}

fn button_region(button: &ButtonSpec) -> Shape {
    Shape::RoundRect {
        rect: button.bounds,
        corner: BUTTON_CORNER,
    }
}
