//! Button table and hit testing
//!
//! The table is laid out once from the surface size and never changes. Two
//! rows of three buttons sit at the bottom of the screen (transport icons,
//! then duration presets) and a small refresh button sits in the top right
//! corner.

use core::fmt::Write;

use heapless::{String, Vec};
use paperdoro_hal::{Point, Rect};

use crate::config::PRESET_COUNT;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of buttons in the table
pub const BUTTON_COUNT: usize = 7;

/// Maximum button label length
pub const MAX_BUTTON_LABEL: usize = 8;

/// Main button size
pub const BUTTON_WIDTH: u32 = 120;
pub const BUTTON_HEIGHT: u32 = 60;
/// Horizontal gap between buttons in a row
pub const BUTTON_SPACING: u32 = 30;
/// Distance of the first row from the bottom edge
pub const FIRST_ROW_OFFSET: u32 = 180;
/// Vertical distance between the two rows
pub const ROW_PITCH: i32 = 90;
/// Refresh button edge length
pub const REFRESH_SIZE: u32 = 40;
/// Refresh button inset from the top and right edges
pub const REFRESH_INSET: i32 = 10;

/// Transport icons drawn on the first row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Icon {
    Play,
    Pause,
    Stop,
}

/// What a button does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ButtonKind {
    /// Transport control
    Icon(Icon),
    /// Select a duration in minutes
    Preset(u8),
    /// Anti-ghost refresh
    Refresh,
}

/// One entry of the button table
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonSpec {
    pub bounds: Rect,
    pub kind: ButtonKind,
    pub label: String<MAX_BUTTON_LABEL>,
}

impl ButtonSpec {
    fn new(bounds: Rect, kind: ButtonKind) -> Self {
        let mut label = String::new();
        if let ButtonKind::Preset(minutes) = kind {
            let _ = write!(label, "{}Min", minutes);
        }
        Self {
            bounds,
            kind,
            label,
        }
    }

    /// Check if this is a preset button
    pub fn is_preset(&self) -> bool {
        matches!(self.kind, ButtonKind::Preset(_))
    }
}

/// The fixed, ordered button table
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonTable {
    buttons: Vec<ButtonSpec, BUTTON_COUNT>,
}

impl ButtonTable {
    /// Lay the buttons out on a `width` x `height` surface
    pub fn layout(width: u32, height: u32, presets: &[u8; PRESET_COUNT]) -> Self {
        let row_width = (3 * BUTTON_WIDTH + 2 * BUTTON_SPACING) as i32;
        let start_x = (width as i32 - row_width) / 2;
        let first_row = height as i32 - FIRST_ROW_OFFSET as i32;
        let second_row = first_row + ROW_PITCH;
        let column = |i: i32| start_x + i * (BUTTON_WIDTH + BUTTON_SPACING) as i32;
        let cell = |i: i32, y: i32| Rect::new(column(i), y, BUTTON_WIDTH, BUTTON_HEIGHT);

        let mut buttons = Vec::new();
        let icons = [Icon::Play, Icon::Pause, Icon::Stop];
        for (i, icon) in icons.into_iter().enumerate() {
            let _ = buttons.push(ButtonSpec::new(cell(i as i32, first_row), ButtonKind::Icon(icon)));
        }
        for (i, &minutes) in presets.iter().enumerate() {
            let _ = buttons.push(ButtonSpec::new(cell(i as i32, second_row), ButtonKind::Preset(minutes)));
        }
        let refresh = Rect::new(
            width as i32 - REFRESH_SIZE as i32 - REFRESH_INSET,
            REFRESH_INSET,
            REFRESH_SIZE,
            REFRESH_SIZE,
        );
        let _ = buttons.push(ButtonSpec::new(refresh, ButtonKind::Refresh));

        Self { buttons }
    }

    /// First button whose bounds contain `point` (edges inclusive)
    pub fn hit_test(&self, point: Point) -> Option<(usize, &ButtonSpec)> {
        self.buttons
            .iter()
            .enumerate()
            .find(|(_, button)| button.bounds.contains(point))
    }

    /// Button at a table index
    pub fn get(&self, index: usize) -> Option<&ButtonSpec> {
        self.buttons.get(index)
    }

    /// All buttons in table order
    pub fn iter(&self) -> impl Iterator<Item = &ButtonSpec> {
        self.buttons.iter()
    }

    /// Number of buttons
    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    /// Check if the table has no buttons
    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }
}
