//! Timed serial output engines
//!
//! A timing engine is a hardware block (a PIO state machine on the RP2040)
//! that turns bytes into a precisely timed waveform on one pin without CPU
//! involvement. The chip has a small, fixed number of them, so acquiring
//! one can fail.

/// A claimed timing engine running the LED serial protocol
pub trait SerialEngine {
    /// Queue one 8-bit word for transmission, MSB first
    ///
    /// Blocks until the engine has room for the word. Returns once the word
    /// is queued, not once it has left the pin.
    fn put_blocking(&mut self, byte: u8);

    /// Block until every queued word has been shifted out of the pin
    ///
    /// Engines without an output queue have nothing to wait for.
    fn flush(&mut self) {}
}

/// Outcome of trying to claim a timing engine
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineClaim<E> {
    /// An engine was free and is now loaded with the protocol program
    Acquired(E),
    /// Every engine instance is already in use
    Exhausted,
}

impl<E> EngineClaim<E> {
    /// Convert into an `Option`, dropping the exhaustion reason
    pub fn acquired(self) -> Option<E> {
        match self {
            EngineClaim::Acquired(engine) => Some(engine),
            EngineClaim::Exhausted => None,
        }
    }

    /// Check if the claim failed
    pub fn is_exhausted(&self) -> bool {
        matches!(self, EngineClaim::Exhausted)
    }
}

/// Source of timing engines
///
/// Implementations try their instances in a fixed order (primary first,
/// then any fallbacks) and report `Exhausted` once none are left.
pub trait EngineAllocator {
    /// Engine type handed out on success
    type Engine: SerialEngine;

    /// Claim an engine and load the serial program into it
    ///
    /// # Arguments
    /// * `pin` - GPIO number the program drives
    /// * `bit_rate_hz` - Output bit rate (800 kHz for WS2812-class LEDs)
    fn claim(&mut self, pin: u8, bit_rate_hz: u32) -> EngineClaim<Self::Engine>;
}

impl<T: SerialEngine + ?Sized> SerialEngine for &mut T {
    fn put_blocking(&mut self, byte: u8) {
        (**self).put_blocking(byte);
    }

    fn flush(&mut self) {
        (**self).flush();
    }
}
