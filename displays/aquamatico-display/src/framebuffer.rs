//! Off-screen 1-bit framebuffer
//!
//! Laid out the way the panel's GDDRAM is: 8 pages of 128 column bytes,
//! bit 0 of each byte being the top row of its page. A render can then
//! copy page slices straight onto the bus.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::area::RenderArea;

/// Panel width in pixels
pub const WIDTH: usize = 128;

/// Panel height in pixels
pub const HEIGHT: usize = 64;

/// Rows of 8 pixels
pub const PAGES: usize = HEIGHT / 8;

/// Bytes in a full frame
pub const BUFFER_LEN: usize = WIDTH * PAGES;

/// 128x64 monochrome framebuffer
#[derive(Clone)]
pub struct Framebuffer {
    buffer: [u8; BUFFER_LEN],
}

impl Framebuffer {
    /// Create a new blank framebuffer
    pub const fn new() -> Self {
        Self {
            buffer: [0; BUFFER_LEN],
        }
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.buffer.fill(0);
    }

    /// Read one pixel; out-of-range reads are off
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }
        self.buffer[(y / 8) * WIDTH + x] & (1 << (y % 8)) != 0
    }

    /// Raw page-ordered bytes
    pub fn as_bytes(&self) -> &[u8; BUFFER_LEN] {
        &self.buffer
    }

    /// Columns of one page restricted to `area`
    pub fn page_slice(&self, page: usize, area: &RenderArea) -> &[u8] {
        let start = page * WIDTH + usize::from(area.start_column);
        &self.buffer[start..start + area.width()]
    }

    fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        let index = (y / 8) * WIDTH + x;
        let mask = 1 << (y % 8);
        if on {
            self.buffer[index] |= mask;
        } else {
            self.buffer[index] &= !mask;
        }
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if coord.x >= 0 && coord.x < WIDTH as i32 && coord.y >= 0 && coord.y < HEIGHT as i32 {
                self.set_pixel(coord.x as usize, coord.y as usize, color.is_on());
            }
        }
        Ok(())
    }
}
