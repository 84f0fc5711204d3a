//! Dot placement on the seconds and minutes rings
//!
//! Index 0 sits at twelve o'clock and indices advance clockwise. Progress
//! fills the rings in the opposite direction: the first elapsed second lights
//! the last outer index, so the filled arc grows counter-clockwise and the
//! final dot lit is the one at twelve o'clock.

use core::f32::consts::TAU;

use paperdoro_hal::Point;

use crate::config::LayoutSettings;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Dots on the outer ring
pub const SECONDS_PER_MINUTE: u8 = 60;

/// Which ring a dot belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Ring {
    /// Seconds ring, always 60 dots
    Outer,
    /// Minutes ring, one dot per configured minute
    Inner,
}

/// A single addressable dot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dot {
    pub ring: Ring,
    pub index: u8,
}

impl Dot {
    /// Outer dot lit by the `n`-th elapsed second (0-based)
    pub const fn for_second(n: u8) -> Self {
        Self {
            ring: Ring::Outer,
            index: SECONDS_PER_MINUTE - 1 - n,
        }
    }

    /// Inner dot lit by the `n`-th elapsed minute (0-based)
    pub const fn for_minute(n: u8, duration_minutes: u8) -> Self {
        Self {
            ring: Ring::Inner,
            index: duration_minutes - 1 - n,
        }
    }
}

/// Position of `index` on a ring of `total` evenly spaced dots
///
/// The angle is measured clockwise from twelve o'clock in screen
/// coordinates. `total == 0` is treated as 1.
pub fn ring_position(index: u32, total: u32, center: Point, radius: u32) -> Point {
    let total = total.max(1);
    let angle = (index % total) as f32 * TAU / total as f32;
    let radius = radius as f32;

    let x = center.x as f32 + radius * libm::sinf(angle);
    let y = center.y as f32 - radius * libm::cosf(angle);

    Point::new(libm::roundf(x) as i32, libm::roundf(y) as i32)
}

/// Placement of both rings on a surface
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RingGeometry {
    center: Point,
    outer_radius: u32,
    inner_radius: u32,
    outer_dot_radius: u32,
    inner_dot_radius: u32,
    inner_total: u8,
}

impl RingGeometry {
    /// Lay the rings out on a `width` x `height` surface
    ///
    /// The shared center sits horizontally centered, one third down.
    pub fn new(layout: &LayoutSettings, width: u32, height: u32, duration_minutes: u8) -> Self {
        Self {
            center: Point::new((width / 2) as i32, (height / 3) as i32),
            outer_radius: layout.outer_radius,
            inner_radius: layout.inner_radius,
            outer_dot_radius: layout.outer_dot_radius,
            inner_dot_radius: layout.inner_dot_radius,
            inner_total: duration_minutes.max(1),
        }
    }

    /// Re-size the inner ring after a duration change
    pub fn set_duration(&mut self, duration_minutes: u8) {
        self.inner_total = duration_minutes.max(1);
    }

    /// Shared ring center
    pub fn center(&self) -> Point {
        self.center
    }

    /// Number of dots on a ring
    pub fn total(&self, ring: Ring) -> u8 {
        match ring {
            Ring::Outer => SECONDS_PER_MINUTE,
            Ring::Inner => self.inner_total,
        }
    }

    /// Ring radius
    pub fn radius(&self, ring: Ring) -> u32 {
        match ring {
            Ring::Outer => self.outer_radius,
            Ring::Inner => self.inner_radius,
        }
    }

    /// Radius of a single dot on a ring
    pub fn dot_radius(&self, ring: Ring) -> u32 {
        match ring {
            Ring::Outer => self.outer_dot_radius,
            Ring::Inner => self.inner_dot_radius,
        }
    }

    /// Center of a dot
    pub fn position(&self, dot: Dot) -> Point {
        ring_position(
            dot.index as u32,
            self.total(dot.ring) as u32,
            self.center,
            self.radius(dot.ring),
        )
    }

    /// Whether `dot` is lit when `elapsed` units of its ring have passed
    pub fn is_filled(&self, dot: Dot, elapsed: u8) -> bool {
        let total = self.total(dot.ring);
        dot.index >= total.saturating_sub(elapsed)
    }
}
