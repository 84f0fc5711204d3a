//! Static screen elements
//!
//! Buttons, the battery indicator and the dial labels. Each function draws
//! onto a surface without committing; the caller decides the refresh.

use core::f32::consts::PI;
use core::fmt::Write;

use heapless::String;
use paperdoro_core::activity::BatteryStatus;
use paperdoro_core::input::{ButtonKind, ButtonSpec, Icon};
use paperdoro_hal::{DrawSurface, Point, Rect, Shape, SurfaceError, TextAlign, TextSize, Tone};

/// Corner radius of the main buttons
pub const BUTTON_CORNER: u32 = 8;

/// Battery indicator anchor (top-left of the battery outline)
pub const BATTERY_ORIGIN: Point = Point::new(10, 10);

/// Area cleared before the battery indicator is redrawn
pub const BATTERY_AREA: Rect = Rect::new(10, 10, 140, 40);

const BATTERY_WIDTH: u32 = 48;
const BATTERY_HEIGHT: u32 = 24;
const BATTERY_INNER_WIDTH: u32 = 44;

/// Draw a button in its unpressed state
pub fn draw_button<S: DrawSurface>(surface: &mut S, button: &ButtonSpec) -> Result<(), SurfaceError> {
    let bounds = button.bounds;
    match button.kind {
        ButtonKind::Icon(icon) => {
            draw_frame(surface, bounds)?;
            draw_icon(surface, icon, bounds.center())
        }
        ButtonKind::Preset(_) => {
            draw_frame(surface, bounds)?;
            surface.draw_text(
                button.label.as_str(),
                bounds.center(),
                TextAlign::Center,
                TextSize::Medium,
                Tone::Black,
            )
        }
        ButtonKind::Refresh => draw_refresh(surface, bounds),
    }
}

fn draw_frame<S: DrawSurface>(surface: &mut S, bounds: Rect) -> Result<(), SurfaceError> {
    surface.draw_outline(
        Shape::RoundRect {
            rect: bounds,
            corner: BUTTON_CORNER,
        },
        Tone::Black,
    )
}

fn draw_icon<S: DrawSurface>(surface: &mut S, icon: Icon, c: Point) -> Result<(), SurfaceError> {
    match icon {
        Icon::Play => surface.draw_filled_shape(
            Shape::Triangle(c.offset(-8, -10), c.offset(-8, 10), c.offset(8, 0)),
            Tone::Black,
        ),
        Icon::Pause => {
            surface.fill_region(Rect::new(c.x - 8, c.y - 10, 5, 20), Tone::Black)?;
            surface.fill_region(Rect::new(c.x + 3, c.y - 10, 5, 20), Tone::Black)
        }
        Icon::Stop => surface.fill_region(Rect::new(c.x - 8, c.y - 8, 16, 16), Tone::Black),
    }
}

/// Circular button with a three-quarter arrow
fn draw_refresh<S: DrawSurface>(surface: &mut S, bounds: Rect) -> Result<(), SurfaceError> {
    let c = bounds.center();
    let outline = (bounds.width / 2).saturating_sub(2);
    surface.draw_outline(Shape::Circle { center: c, radius: outline }, Tone::Black)?;

    let radius = (bounds.width / 2).saturating_sub(6) as f32;
    let arc_point = |degrees: u32| {
        let angle = degrees as f32 * PI / 180.0;
        Point::new(
            c.x + (radius * libm::cosf(angle)) as i32,
            c.y + (radius * libm::sinf(angle)) as i32,
        )
    };
    for degrees in (0..270).step_by(10) {
        surface.draw_outline(Shape::Line(arc_point(degrees), arc_point(degrees + 10)), Tone::Black)?;
    }

    let r = radius as i32;
    surface.draw_filled_shape(
        Shape::Triangle(c.offset(r - 2, -6), c.offset(r - 2, 2), c.offset(r + 4, -2)),
        Tone::Black,
    )
}

/// Draw the battery outline, fill bar, charge bolt and percentage
pub fn draw_battery<S: DrawSurface>(surface: &mut S, status: &BatteryStatus) -> Result<(), SurfaceError> {
    let o = BATTERY_ORIGIN;
    surface.draw_outline(
        Shape::Rect(Rect::new(o.x, o.y, BATTERY_WIDTH, BATTERY_HEIGHT)),
        Tone::Black,
    )?;
    // Terminal tip
    surface.fill_region(Rect::new(o.x + BATTERY_WIDTH as i32, o.y + 6, 4, 12), Tone::Black)?;

    let inner = Rect::new(o.x + 2, o.y + 2, BATTERY_INNER_WIDTH, BATTERY_HEIGHT - 4);
    surface.fill_region(inner, Tone::White)?;
    let fill = status.level_percent.min(100) as u32 * BATTERY_INNER_WIDTH / 100;
    if fill > 0 {
        surface.fill_region(Rect::new(inner.x, inner.y, fill, inner.height), Tone::Black)?;
    }

    if status.is_charging {
        let b = o.offset(110, 2);
        surface.draw_filled_shape(
            Shape::Triangle(b.offset(6, 0), b.offset(0, 11), b.offset(6, 11)),
            Tone::Black,
        )?;
        surface.draw_filled_shape(
            Shape::Triangle(b.offset(4, 9), b.offset(10, 9), b.offset(4, 20)),
            Tone::Black,
        )?;
    }

    let mut text: String<8> = String::new();
    let _ = write!(text, "{}%", status.level_percent);
    surface.draw_text(
        text.as_str(),
        o.offset(60, 4),
        TextAlign::TopLeft,
        TextSize::Medium,
        Tone::Black,
    )
}

/// Duration in the middle of the dial
pub fn draw_duration<S: DrawSurface>(surface: &mut S, center: Point, minutes: u8) -> Result<(), SurfaceError> {
    let mut text: String<4> = String::new();
    let _ = write!(text, "{}", minutes);
    surface.draw_text(
        text.as_str(),
        center.offset(0, -15),
        TextAlign::Center,
        TextSize::Huge,
        Tone::Black,
    )?;
    surface.draw_text("min", center.offset(0, 25), TextAlign::Center, TextSize::Medium, Tone::Black)
}

/// Title and subtitle below the dial
pub fn draw_title<S: DrawSurface>(
    surface: &mut S,
    center: Point,
    title: &str,
    subtitle: &str,
) -> Result<(), SurfaceError> {
    let at = center.offset(0, 300);
    surface.draw_text(title, at, TextAlign::Center, TextSize::Large, Tone::Black)?;
    surface.draw_text(subtitle, at.offset(0, 35), TextAlign::Center, TextSize::Small, Tone::Black)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;
    use crate::graphics::GraphicsSurface;
    use embedded_graphics::pixelcolor::{Gray4, GrayColor};
    use paperdoro_core::input::ButtonTable;

    fn surface() -> GraphicsSurface<FrameBuffer> {
        GraphicsSurface::new(FrameBuffer::new(540, 960))
    }

    #[test]
    fn test_battery_fill_width() {
        let mut surface = surface();
        let status = BatteryStatus {
            level_percent: 50,
            is_charging: false,
            last_sample_ms: 0,
        };
        draw_battery(&mut surface, &status).unwrap();

        let fb = surface.panel();
        // 50% of 44 px = 22 px starting at x = 12
        assert_eq!(fb.pixel(Point::new(12, 20)), Some(Gray4::BLACK));
        assert_eq!(fb.pixel(Point::new(33, 20)), Some(Gray4::BLACK));
        assert_eq!(fb.pixel(Point::new(34, 20)), Some(Gray4::WHITE));
    }

    #[test]
    fn test_empty_battery_has_no_fill() {
        let mut surface = surface();
        draw_battery(&mut surface, &BatteryStatus::default()).unwrap();
        assert_eq!(surface.panel().pixel(Point::new(12, 20)), Some(Gray4::WHITE));
    }

    #[test]
    fn test_icon_buttons_draw_inside_bounds() {
        let mut surface = surface();
        let table = ButtonTable::layout(540, 960, &[25, 5, 30]);
        for button in table.iter() {
            draw_button(&mut surface, button).unwrap();
        }
        let fb = surface.panel();
        // Stop square fills the middle of the third button
        let stop = table.get(2).unwrap().bounds.center();
        assert_eq!(fb.pixel(stop), Some(Gray4::BLACK));
        // Play triangle covers the middle of the first button
        let play = table.get(0).unwrap().bounds.center();
        assert_eq!(fb.pixel(play), Some(Gray4::BLACK));
        // Preset buttons only have a frame
        let preset = table.get(3).unwrap().bounds;
        assert_eq!(fb.pixel(preset.origin().offset(4, preset.height as i32 / 2)), Some(Gray4::WHITE));
    }
}
