//! GPIO pin abstractions
//!
//! The board only reads digital inputs (the two push buttons). Output pins
//! are driven by the timing engine, never bit-banged.

/// Digital input pin
///
/// Implementations perform a single point-in-time read of the pin level.
/// There is no edge latching; a level that changes between two reads is
/// not observed.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

impl<T: InputPin + ?Sized> InputPin for &T {
    fn is_high(&self) -> bool {
        (**self).is_high()
    }
}
