//! LED matrix serial driver
//!
//! Owns the pixel buffer and a claimed timing engine. A frame is the 75
//! G,R,B bytes of the buffer followed by an idle reset gap; the LED chain
//! detects the frame boundary from the absence of signal, so the gap is
//! part of every write.

use aquamatico_hal::{Delay, EngineAllocator, EngineClaim, SerialEngine};

use crate::pixel::{grb_bytes, Pixel, PixelBuffer, FRAME_LEN};

/// Output bit rate of the LED chain protocol
pub const DEFAULT_BIT_RATE_HZ: u32 = 800_000;

/// Shortest idle time the LED datasheet accepts as a reset
pub const MIN_RESET_GAP_US: u32 = 80;

/// Reset gap used after every frame
pub const DEFAULT_RESET_GAP_US: u32 = 100;

/// GPIO driving the LED chain data input
pub const DEFAULT_LED_PIN: u8 = 7;

/// LED driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedError {
    /// No free timing engine at start-up
    EngineExhausted,
    /// Bit rate of zero requested at start-up
    ZeroBitRate,
    /// Pixel index outside 0..25
    IndexOutOfRange { index: usize },
}

/// LED output configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedConfig {
    /// Data output GPIO
    pub pin: u8,
    /// Serial bit rate in Hz
    pub bit_rate_hz: u32,
    /// Idle time after each frame in microseconds
    pub reset_gap_us: u32,
}

impl Default for LedConfig {
    fn default() -> Self {
        Self {
            pin: DEFAULT_LED_PIN,
            bit_rate_hz: DEFAULT_BIT_RATE_HZ,
            reset_gap_us: DEFAULT_RESET_GAP_US,
        }
    }
}

/// 5x5 LED matrix driver
pub struct LedMatrix<E, D> {
    engine: E,
    delay: D,
    buffer: PixelBuffer,
    reset_gap_us: u32,
}

impl<E: SerialEngine, D: Delay> LedMatrix<E, D> {
    /// Claim a timing engine and create the driver
    ///
    /// Fails with [`LedError::EngineExhausted`] when the allocator has no
    /// engine left. There is no degraded mode without LED output, so the
    /// caller is expected to halt. A zero bit rate is refused before any
    /// engine is claimed.
    pub fn initialize<A>(allocator: &mut A, config: &LedConfig, delay: D) -> Result<Self, LedError>
    where
        A: EngineAllocator<Engine = E>,
    {
        if config.bit_rate_hz == 0 {
            return Err(LedError::ZeroBitRate);
        }
        match allocator.claim(config.pin, config.bit_rate_hz) {
            EngineClaim::Acquired(engine) => Ok(Self::new(engine, delay, config.reset_gap_us)),
            EngineClaim::Exhausted => Err(LedError::EngineExhausted),
        }
    }

    /// Create a driver around an already claimed engine
    ///
    /// Gaps shorter than [`MIN_RESET_GAP_US`] are raised to the minimum.
    pub fn new(engine: E, delay: D, reset_gap_us: u32) -> Self {
        Self {
            engine,
            delay,
            buffer: PixelBuffer::new(),
            reset_gap_us: reset_gap_us.max(MIN_RESET_GAP_US),
        }
    }

    /// Set one LED
    pub fn set(&mut self, index: usize, r: u8, g: u8, b: u8) -> Result<(), LedError> {
        self.buffer.set(index, Pixel::new(r, g, b))
    }

    /// Set one LED to a colour
    pub fn set_pixel(&mut self, index: usize, pixel: Pixel) -> Result<(), LedError> {
        self.buffer.set(index, pixel)
    }

    /// Set one LED by grid position
    pub fn set_cell(&mut self, row: usize, col: usize, pixel: Pixel) -> Result<(), LedError> {
        self.buffer.set_cell(row, col, pixel)
    }

    /// Set a full row
    pub fn set_row(&mut self, row: usize, pixel: Pixel) -> Result<(), LedError> {
        self.buffer.set_row(row, pixel)
    }

    /// Set every LED to one colour
    pub fn fill(&mut self, pixel: Pixel) {
        self.buffer.fill(pixel);
    }

    /// Turn every LED off (in the buffer; call [`write`](Self::write) to show it)
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Read back one LED from the buffer
    pub fn pixel(&self, index: usize) -> Option<Pixel> {
        self.buffer.get(index)
    }

    /// Current buffer contents
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Bytes the next write will put on the wire
    pub fn frame(&self) -> [u8; FRAME_LEN] {
        self.buffer.to_frame()
    }

    /// Configured reset gap in microseconds
    pub fn reset_gap_us(&self) -> u32 {
        self.reset_gap_us
    }

    /// Transmit the buffer and hold the reset gap
    ///
    /// Blocks for the whole transfer. Bytes leave in chain order, one
    /// engine word per colour channel, G then R then B.
    pub fn write(&mut self) {
        for pixel in self.buffer.pixels() {
            for byte in grb_bytes(*pixel) {
                self.engine.put_blocking(byte);
            }
        }
        self.engine.flush();
        self.delay.delay_us(self.reset_gap_us);
    }
}
