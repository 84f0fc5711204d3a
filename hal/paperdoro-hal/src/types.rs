//! Drawing primitives shared by the core and the renderer
//!
//! Coordinates are signed pixels with (0, 0) at the top-left corner of the
//! surface in its rendering orientation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A pixel coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset this point by the given deltas
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Center point (rounded towards the origin)
    pub const fn center(&self) -> Point {
        Point::new(
            self.x + (self.width / 2) as i32,
            self.y + (self.height / 2) as i32,
        )
    }

    /// Right edge (inclusive)
    pub const fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    /// Bottom edge (inclusive)
    pub const fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    /// Check if a point lies inside this rectangle
    ///
    /// Edges are inclusive on all four sides, so a press exactly on the
    /// right or bottom border still counts as a hit.
    pub const fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

/// Paint tone
///
/// E-paper panels are effectively grayscale; the timer only needs the two
/// extremes plus a neutral highlight for press feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Tone {
    Black,
    White,
    /// Neutral light gray used for press feedback
    Highlight,
}

/// Geometric shapes a surface can outline or fill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Shape {
    /// Circle by center and radius
    Circle { center: Point, radius: u32 },
    /// Rectangle with rounded corners
    RoundRect { rect: Rect, corner: u32 },
    /// Plain rectangle
    Rect(Rect),
    /// Triangle by its three corners
    Triangle(Point, Point, Point),
    /// Line segment (outline only)
    Line(Point, Point),
}

/// Text anchor relative to the given position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextAlign {
    /// Position is the top-left corner of the text box
    TopLeft,
    /// Position is the center of the text box
    Center,
}

/// Relative text size
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextSize {
    Small,
    Medium,
    Large,
    Huge,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_inclusive_edges() {
        let r = Rect::new(10, 20, 100, 50);
        assert!(r.contains(Point::new(10, 20)));
        assert!(r.contains(Point::new(110, 70)));
        assert!(!r.contains(Point::new(111, 70)));
        assert!(!r.contains(Point::new(9, 20)));
        assert!(!r.contains(Point::new(-5, -5)));
    }

    #[test]
    fn test_rect_center() {
        let r = Rect::new(0, 0, 120, 60);
        assert_eq!(r.center(), Point::new(60, 30));
    }
}
