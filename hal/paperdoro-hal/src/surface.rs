//! Drawing surface abstraction
//!
//! Defines the interface the renderer paints through. Surfaces are buffered:
//! nothing reaches the panel until [`DrawSurface::commit`] is called.

use crate::types::{Point, Rect, Shape, TextAlign, TextSize, Tone};

/// Drawing surface errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SurfaceError {
    /// Communication error with the panel
    Communication,
}

/// Panel refresh waveform requested on commit
///
/// Bistable panels trade speed for cleanliness: a partial refresh only
/// drives the changed pixels and leaves residue behind, a full refresh
/// drives every pixel through the complete waveform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RefreshMode {
    /// Fast update of changed pixels only
    Partial,
    /// Complete waveform, clears ghosting
    Full,
}

/// Buffered drawing surface
///
/// Implementations handle the specifics of the panel controller. All calls
/// are synchronous; `commit` blocks until the refresh has been issued.
pub trait DrawSurface {
    /// Fill a rectangular region with a solid tone
    fn fill_region(&mut self, rect: Rect, tone: Tone) -> Result<(), SurfaceError>;

    /// Draw the outline of a shape
    fn draw_outline(&mut self, shape: Shape, tone: Tone) -> Result<(), SurfaceError>;

    /// Draw a filled shape
    ///
    /// Lines have no interior and are drawn as outlines.
    fn draw_filled_shape(&mut self, shape: Shape, tone: Tone) -> Result<(), SurfaceError>;

    /// Draw text anchored at a position
    fn draw_text(
        &mut self,
        text: &str,
        at: Point,
        align: TextAlign,
        size: TextSize,
        tone: Tone,
    ) -> Result<(), SurfaceError>;

    /// Surface width in pixels
    fn width(&self) -> u32;

    /// Surface height in pixels
    fn height(&self) -> u32;

    /// Push the buffered frame to the panel
    fn commit(&mut self, mode: RefreshMode) -> Result<(), SurfaceError>;

    /// Fill the entire surface
    fn fill_screen(&mut self, tone: Tone) -> Result<(), SurfaceError> {
        let bounds = Rect::new(0, 0, self.width(), self.height());
        self.fill_region(bounds, tone)
    }
}
