//! Pixel buffer for the 5x5 LED matrix
//!
//! The matrix is a single chain of 25 LEDs laid out row-major:
//! `index = row * GRID_SIZE + column`. Row 0 is the first row of the chain.

use smart_leds::RGB8;

use crate::led::LedError;

/// Colour of one LED (human RGB order; the wire order is G, R, B)
pub type Pixel = RGB8;

/// Rows and columns of the square matrix
pub const GRID_SIZE: usize = 5;

/// Number of LEDs in the chain
pub const LED_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Bytes per pixel on the wire
pub const BYTES_PER_PIXEL: usize = 3;

/// Serialized frame length
pub const FRAME_LEN: usize = LED_COUNT * BYTES_PER_PIXEL;

/// Named colours used by the animations
pub mod colors {
    use super::Pixel;

    /// All channels off
    pub const OFF: Pixel = Pixel { r: 0, g: 0, b: 0 };
    /// Idle background
    pub const BACKGROUND: Pixel = Pixel { r: 0, g: 0, b: 255 };
    /// Twinkle accent (orange)
    pub const ACCENT: Pixel = Pixel {
        r: 255,
        g: 165,
        b: 0,
    };
    /// Falling dot
    pub const GREEN: Pixel = Pixel { r: 0, g: 255, b: 0 };
    /// Row blink
    pub const WHITE: Pixel = Pixel {
        r: 255,
        g: 255,
        b: 255,
    };
}

/// Serialize one pixel in wire order
pub const fn grb_bytes(pixel: Pixel) -> [u8; BYTES_PER_PIXEL] {
    [pixel.g, pixel.r, pixel.b]
}

/// Linear index of a grid cell, or `None` if the cell is off the grid
pub const fn cell_index(row: usize, col: usize) -> Option<usize> {
    if row < GRID_SIZE && col < GRID_SIZE {
        Some(row * GRID_SIZE + col)
    } else {
        None
    }
}

/// Fixed array of 25 pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: [Pixel; LED_COUNT],
}

impl Default for PixelBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelBuffer {
    /// Create a buffer with every pixel off
    pub const fn new() -> Self {
        Self {
            pixels: [colors::OFF; LED_COUNT],
        }
    }

    /// Read a pixel
    pub fn get(&self, index: usize) -> Option<Pixel> {
        self.pixels.get(index).copied()
    }

    /// Set a pixel
    ///
    /// Out-of-range indices are rejected and leave the buffer untouched.
    pub fn set(&mut self, index: usize, pixel: Pixel) -> Result<(), LedError> {
        let slot = self
            .pixels
            .get_mut(index)
            .ok_or(LedError::IndexOutOfRange { index })?;
        *slot = pixel;
        Ok(())
    }

    /// Set a pixel by grid position
    pub fn set_cell(&mut self, row: usize, col: usize, pixel: Pixel) -> Result<(), LedError> {
        let index = cell_index(row, col).ok_or(LedError::IndexOutOfRange {
            index: row.saturating_mul(GRID_SIZE).saturating_add(col),
        })?;
        self.set(index, pixel)
    }

    /// Set every pixel of one row
    pub fn set_row(&mut self, row: usize, pixel: Pixel) -> Result<(), LedError> {
        for col in 0..GRID_SIZE {
            self.set_cell(row, col, pixel)?;
        }
        Ok(())
    }

    /// Set every pixel to the same colour
    pub fn fill(&mut self, pixel: Pixel) {
        self.pixels = [pixel; LED_COUNT];
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.fill(colors::OFF);
    }

    /// All pixels in chain order
    pub fn pixels(&self) -> &[Pixel; LED_COUNT] {
        &self.pixels
    }

    /// Serialize the buffer in chain order, G,R,B per pixel
    pub fn to_frame(&self) -> [u8; FRAME_LEN] {
        let mut frame = [0u8; FRAME_LEN];
        for (chunk, pixel) in frame.chunks_exact_mut(BYTES_PER_PIXEL).zip(self.pixels.iter()) {
            chunk.copy_from_slice(&grb_bytes(*pixel));
        }
        frame
    }
}
