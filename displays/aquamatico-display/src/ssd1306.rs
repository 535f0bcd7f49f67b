//! SSD1306 OLED Display Driver
//!
//! Driver for 128x64 SSD1306-based OLED displays via I2C. Holds no pixel
//! state; it pushes a [`Framebuffer`] window to the panel.

use embedded_hal::i2c::I2c;

use crate::area::RenderArea;
use crate::framebuffer::{Framebuffer, HEIGHT, WIDTH};

/// Default SSD1306 I2C address (0x3D with the address pin high)
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Control byte announcing a command
const CONTROL_COMMAND: u8 = 0x00;

/// Control byte announcing GDDRAM data
const CONTROL_DATA: u8 = 0x40;

/// SSD1306 commands
mod cmd {
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_ENTIRE_ON: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_MEM_MODE: u8 = 0x20;
    pub const SET_COL_ADDR: u8 = 0x21;
    pub const SET_PAGE_ADDR: u8 = 0x22;
    pub const SET_SCROLL_OFF: u8 = 0x2E;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// Power-up sequence for a 128x64 panel with internal charge pump
const INIT_SEQUENCE: &[u8] = &[
    cmd::DISPLAY_OFF,
    cmd::SET_MEM_MODE,
    0x00, // Horizontal addressing
    cmd::SET_START_LINE,
    cmd::SET_SEG_REMAP, // Column 127 mapped to SEG0
    cmd::SET_MUX_RATIO,
    (HEIGHT - 1) as u8,
    cmd::SET_COM_SCAN_DEC, // Scan from COM[N-1] to COM0
    cmd::SET_DISPLAY_OFFSET,
    0x00,
    cmd::SET_COM_PINS,
    0x12, // Alternative COM config, 128x64
    cmd::SET_CLOCK_DIV,
    0x80,
    cmd::SET_PRECHARGE,
    0xF1,
    cmd::SET_VCOM_DETECT,
    0x30,
    cmd::SET_CONTRAST,
    0xFF,
    cmd::SET_ENTIRE_ON, // Follow RAM
    cmd::SET_NORMAL,
    cmd::SET_CHARGE_PUMP,
    0x14, // Enable charge pump
    cmd::SET_SCROLL_OFF,
    cmd::DISPLAY_ON,
];

/// SSD1306 OLED driver
pub struct Ssd1306<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Ssd1306<I2C> {
    /// Create a new SSD1306 driver
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Initialize the display
    pub fn init(&mut self) -> Result<(), I2C::Error> {
        for &c in INIT_SEQUENCE {
            self.command(c)?;
        }
        Ok(())
    }

    /// Send a command to the display
    fn command(&mut self, cmd: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &[CONTROL_COMMAND, cmd])
    }

    /// Copy `area` of `framebuffer` to the panel
    pub fn render(
        &mut self,
        framebuffer: &Framebuffer,
        area: &RenderArea,
    ) -> Result<(), I2C::Error> {
        let area = area.clamped();

        self.command(cmd::SET_COL_ADDR)?;
        self.command(area.start_column)?;
        self.command(area.end_column)?;
        self.command(cmd::SET_PAGE_ADDR)?;
        self.command(area.start_page)?;
        self.command(area.end_page)?;

        // One data write per page
        let mut data = [0u8; WIDTH + 1];
        data[0] = CONTROL_DATA;
        for page in usize::from(area.start_page)..=usize::from(area.end_page) {
            let columns = framebuffer.page_slice(page, &area);
            data[1..=columns.len()].copy_from_slice(columns);
            self.i2c.write(self.address, &data[..=columns.len()])?;
        }

        Ok(())
    }

    /// Release the bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}
