//! Ring oscillator random source

use aquamatico_hal::RandomSource;
use embassy_rp::clocks::RoscRng;
use rand_core::RngCore;

/// Random words sampled from the ring oscillator jitter
///
/// Not cryptographic; good enough to pick LEDs and fake sensor values.
pub struct RoscRandom {
    rng: RoscRng,
}

impl RoscRandom {
    /// Create a new ring oscillator source
    pub fn new() -> Self {
        Self { rng: RoscRng }
    }
}

impl Default for RoscRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for RoscRandom {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }
}
