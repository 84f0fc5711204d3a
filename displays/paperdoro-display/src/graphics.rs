//! `embedded-graphics` surface adapter
//!
//! Maps the renderer's tones, shapes and text sizes onto `embedded-graphics`
//! primitives drawn into a 4-bit grayscale panel.

use embedded_graphics::{
    mono_font::{
        ascii::{FONT_10X20, FONT_6X10, FONT_9X15},
        MonoFont, MonoTextStyle,
    },
    pixelcolor::{Gray4, GrayColor},
    prelude::*,
    primitives::{
        Circle, Line, PrimitiveStyle, Rectangle, RoundedRectangle, Triangle,
    },
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};
use paperdoro_hal::{
    DrawSurface, Point, Rect, RefreshMode, Shape, SurfaceError, TextAlign, TextSize, Tone,
};

/// Luma of the press highlight
pub const HIGHLIGHT_LUMA: u8 = 10;

/// A grayscale panel driven through `embedded-graphics`
///
/// Drawing goes to the panel's buffer; `refresh` pushes it to the glass.
pub trait Panel: DrawTarget<Color = Gray4> + OriginDimensions {
    /// Push the buffer to the panel with the given waveform
    fn refresh(&mut self, mode: RefreshMode) -> Result<(), SurfaceError>;
}

/// Convert a tone to a panel color
pub fn gray(tone: Tone) -> Gray4 {
    match tone {
        Tone::Black => Gray4::BLACK,
        Tone::White => Gray4::WHITE,
        Tone::Highlight => Gray4::new(HIGHLIGHT_LUMA),
    }
}

fn font(size: TextSize) -> &'static MonoFont<'static> {
    match size {
        TextSize::Small => &FONT_6X10,
        TextSize::Medium => &FONT_9X15,
        // Largest ASCII font shipped with embedded-graphics
        TextSize::Large | TextSize::Huge => &FONT_10X20,
    }
}

fn point(p: Point) -> embedded_graphics::prelude::Point {
    embedded_graphics::prelude::Point::new(p.x, p.y)
}

fn rectangle(r: Rect) -> Rectangle {
    Rectangle::new(point(r.origin()), Size::new(r.width, r.height))
}

/// `DrawSurface` over an `embedded-graphics` panel
pub struct GraphicsSurface<P> {
    panel: P,
}

impl<P: Panel> GraphicsSurface<P> {
    /// Wrap a panel
    pub fn new(panel: P) -> Self {
        Self { panel }
    }

    /// The wrapped panel
    pub fn panel(&self) -> &P {
        &self.panel
    }

    fn draw_shape(&mut self, shape: Shape, style: PrimitiveStyle<Gray4>) -> Result<(), SurfaceError> {
        let result = match shape {
            Shape::Circle { center, radius } => {
                // Diameter of 2r + 1 keeps the circle centered on the pixel
                Circle::with_center(point(center), radius * 2 + 1)
                    .into_styled(style)
                    .draw(&mut self.panel)
            }
            Shape::RoundRect { rect, corner } => {
                RoundedRectangle::with_equal_corners(rectangle(rect), Size::new(corner, corner))
                    .into_styled(style)
                    .draw(&mut self.panel)
            }
            Shape::Rect(rect) => rectangle(rect).into_styled(style).draw(&mut self.panel),
            Shape::Triangle(a, b, c) => Triangle::new(point(a), point(b), point(c))
                .into_styled(style)
                .draw(&mut self.panel),
            Shape::Line(a, b) => {
                let stroke = style.fill_color.or(style.stroke_color).unwrap_or(Gray4::BLACK);
                Line::new(point(a), point(b))
                    .into_styled(PrimitiveStyle::with_stroke(stroke, 1))
                    .draw(&mut self.panel)
            }
        };
        result.map_err(|_| SurfaceError::Communication)
    }
}

impl<P: Panel> DrawSurface for GraphicsSurface<P> {
    fn fill_region(&mut self, rect: Rect, tone: Tone) -> Result<(), SurfaceError> {
        self.panel
            .fill_solid(&rectangle(rect), gray(tone))
            .map_err(|_| SurfaceError::Communication)
    }

    fn draw_outline(&mut self, shape: Shape, tone: Tone) -> Result<(), SurfaceError> {
        self.draw_shape(shape, PrimitiveStyle::with_stroke(gray(tone), 1))
    }

    fn draw_filled_shape(&mut self, shape: Shape, tone: Tone) -> Result<(), SurfaceError> {
        self.draw_shape(shape, PrimitiveStyle::with_fill(gray(tone)))
    }

    fn draw_text(
        &mut self,
        text: &str,
        at: Point,
        align: TextAlign,
        size: TextSize,
        tone: Tone,
    ) -> Result<(), SurfaceError> {
        let character_style = MonoTextStyle::new(font(size), gray(tone));
        let text_style = match align {
            TextAlign::TopLeft => TextStyleBuilder::new()
                .alignment(Alignment::Left)
                .baseline(Baseline::Top)
                .build(),
            TextAlign::Center => TextStyleBuilder::new()
                .alignment(Alignment::Center)
                .baseline(Baseline::Middle)
                .build(),
        };

        Text::with_text_style(text, point(at), character_style, text_style)
            .draw(&mut self.panel)
            .map(|_| ())
            .map_err(|_| SurfaceError::Communication)
    }

    fn width(&self) -> u32 {
        self.panel.size().width
    }

    fn height(&self) -> u32 {
        self.panel.size().height
    }

    fn commit(&mut self, mode: RefreshMode) -> Result<(), SurfaceError> {
        self.panel.refresh(mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;

    fn surface() -> GraphicsSurface<FrameBuffer> {
        GraphicsSurface::new(FrameBuffer::new(100, 80))
    }

    #[test]
    fn test_dimensions() {
        let surface = surface();
        assert_eq!(surface.width(), 100);
        assert_eq!(surface.height(), 80);
    }

    #[test]
    fn test_fill_region() {
        let mut surface = surface();
        surface.fill_region(Rect::new(10, 10, 5, 5), Tone::Black).unwrap();
        assert_eq!(surface.panel().pixel(Point::new(12, 12)), Some(Gray4::BLACK));
        assert_eq!(surface.panel().pixel(Point::new(15, 15)), Some(Gray4::WHITE));
    }

    #[test]
    fn test_filled_circle_covers_center() {
        let mut surface = surface();
        let center = Point::new(50, 40);
        surface
            .draw_filled_shape(Shape::Circle { center, radius: 4 }, Tone::Black)
            .unwrap();
        assert_eq!(surface.panel().pixel(center), Some(Gray4::BLACK));
        assert_eq!(surface.panel().pixel(Point::new(50, 37)), Some(Gray4::BLACK));
        assert_eq!(surface.panel().pixel(Point::new(50, 30)), Some(Gray4::WHITE));
    }

    #[test]
    fn test_outline_leaves_interior() {
        let mut surface = surface();
        let rect = Rect::new(10, 10, 30, 20);
        surface.draw_outline(Shape::Rect(rect), Tone::Black).unwrap();
        assert_eq!(surface.panel().pixel(Point::new(10, 10)), Some(Gray4::BLACK));
        assert_eq!(surface.panel().pixel(Point::new(25, 20)), Some(Gray4::WHITE));
    }

    #[test]
    fn test_highlight_tone() {
        assert_eq!(gray(Tone::Highlight).luma(), HIGHLIGHT_LUMA);
    }

    #[test]
    fn test_commit_counts_refreshes() {
        let mut surface = surface();
        surface.commit(RefreshMode::Partial).unwrap();
        surface.commit(RefreshMode::Full).unwrap();
        surface.commit(RefreshMode::Full).unwrap();
        assert_eq!(surface.panel().partial_refreshes(), 1);
        assert_eq!(surface.panel().full_refreshes(), 2);
    }

    #[test]
    fn test_offscreen_drawing_is_clipped() {
        let mut surface = surface();
        surface.fill_region(Rect::new(-20, -20, 10, 10), Tone::Black).unwrap();
        surface
            .draw_text("far away", Point::new(5000, 5000), TextAlign::Center, TextSize::Large, Tone::Black)
            .unwrap();
    }
}
