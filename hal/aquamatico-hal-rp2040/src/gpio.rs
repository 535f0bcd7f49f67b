//! Button inputs
//!
//! Buttons are wired to ground, so the pin is configured with its internal
//! pull-up and reads low while held.

use aquamatico_hal::InputPin;
use embassy_rp::gpio::{Input, Pin, Pull};
use embassy_rp::Peri;

/// Pulled-up GPIO input
pub struct PulledUpInput<'d> {
    input: Input<'d>,
}

impl<'d> PulledUpInput<'d> {
    /// Create a new input with the internal pull-up enabled
    pub fn new(pin: Peri<'d, impl Pin>) -> Self {
        Self {
            input: Input::new(pin, Pull::Up),
        }
    }
}

impl InputPin for PulledUpInput<'_> {
    fn is_high(&self) -> bool {
        self.input.is_high()
    }
}
