//! In-memory grayscale panel
//!
//! Unlike `MockDisplay` from embedded-graphics this buffer allows overdraw,
//! which the renderer relies on (clear, then draw on top). It also counts
//! refreshes by waveform so callers can assert how the panel was driven.

use alloc::vec;
use alloc::vec::Vec;

use embedded_graphics::{
    pixelcolor::{Gray4, GrayColor},
    prelude::*,
};
use paperdoro_hal::{RefreshMode, SurfaceError};

use crate::graphics::Panel;

/// Framebuffer panel; starts out blank white like fresh paper
pub struct FrameBuffer {
    pixels: Vec<Gray4>,
    width: u32,
    height: u32,
    partial_refreshes: u32,
    full_refreshes: u32,
}

impl FrameBuffer {
    /// Create a framebuffer with the given dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![Gray4::WHITE; (width * height) as usize],
            width,
            height,
            partial_refreshes: 0,
            full_refreshes: 0,
        }
    }

    /// Pixel at a coordinate, `None` when out of bounds
    pub fn pixel(&self, at: paperdoro_hal::Point) -> Option<Gray4> {
        if at.x < 0 || at.y < 0 || at.x as u32 >= self.width || at.y as u32 >= self.height {
            return None;
        }
        self.pixels
            .get((at.y as u32 * self.width + at.x as u32) as usize)
            .copied()
    }

    /// Number of partial refreshes so far
    pub fn partial_refreshes(&self) -> u32 {
        self.partial_refreshes
    }

    /// Number of full refreshes so far
    pub fn full_refreshes(&self) -> u32 {
        self.full_refreshes
    }

    /// Count pixels with the given color
    pub fn count(&self, color: Gray4) -> usize {
        self.pixels.iter().filter(|&&p| p == color).count()
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Gray4;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if coord.x >= 0
                && coord.y >= 0
                && (coord.x as u32) < self.width
                && (coord.y as u32) < self.height
            {
                let idx = (coord.y as u32 * self.width + coord.x as u32) as usize;
                self.pixels[idx] = color;
            }
        }
        Ok(())
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl Panel for FrameBuffer {
    fn refresh(&mut self, mode: RefreshMode) -> Result<(), SurfaceError> {
        match mode {
            RefreshMode::Partial => self.partial_refreshes += 1,
            RefreshMode::Full => self.full_refreshes += 1,
        }
        Ok(())
    }
}
