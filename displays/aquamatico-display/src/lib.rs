//! OLED text display for the Aquamatico Mini
//!
//! This crate provides:
//! - `Framebuffer`, a page-organized 128x64 `embedded-graphics` draw target
//! - `Ssd1306`, a blocking I2C driver that pushes framebuffer windows
//! - `OledTextDisplay`, the two combined behind the core `TextDisplay` trait
//!
//! # Architecture
//!
//! Text is rasterized into the framebuffer with an 8-pixel-high mono font
//! and only reaches the panel on `render()`. Drawing never touches the
//! bus, so only `init()` and `render()` can fail.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod area;
pub mod framebuffer;
pub mod ssd1306;

use aquamatico_core::TextDisplay;
use embedded_graphics::mono_font::ascii::FONT_5X8;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use embedded_hal::i2c::I2c;

pub use area::RenderArea;
pub use framebuffer::Framebuffer;
pub use ssd1306::{Ssd1306, DEFAULT_ADDRESS};

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Render requested before `init()`
    NotInitialized,
}

/// Opaque text: glyph background pixels are cleared
fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_5X8)
        .text_color(BinaryColor::On)
        .background_color(BinaryColor::Off)
        .build()
}

/// SSD1306 panel with an off-screen framebuffer
pub struct OledTextDisplay<I2C> {
    driver: Ssd1306<I2C>,
    framebuffer: Framebuffer,
    area: RenderArea,
    initialized: bool,
}

impl<I2C: I2c> OledTextDisplay<I2C> {
    /// Create a new display rendering the whole panel
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self::with_area(i2c, address, RenderArea::full())
    }

    /// Create a new display rendering only `area`
    pub fn with_area(i2c: I2C, address: u8, area: RenderArea) -> Self {
        Self {
            driver: Ssd1306::new(i2c, address),
            framebuffer: Framebuffer::new(),
            area,
            initialized: false,
        }
    }

    /// Power the panel up and blank it
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.driver
            .init()
            .map_err(|_| DisplayError::Communication)?;
        self.initialized = true;
        self.framebuffer.clear();
        self.render()
    }

    /// Current framebuffer contents
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Release the bus
    pub fn release(self) -> I2C {
        self.driver.release()
    }
}

impl<I2C: I2c> TextDisplay for OledTextDisplay<I2C> {
    type Error = DisplayError;

    fn draw_string(&mut self, x: i32, y: i32, text: &str) -> Result<(), DisplayError> {
        // Drawing into RAM cannot fail
        let _ = Text::with_baseline(text, Point::new(x, y), text_style(), Baseline::Top)
            .draw(&mut self.framebuffer);
        Ok(())
    }

    fn render(&mut self) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }
        self.driver
            .render(&self.framebuffer, &self.area)
            .map_err(|_| DisplayError::Communication)
    }
}
