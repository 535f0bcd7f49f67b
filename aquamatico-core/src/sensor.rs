//! Simulated water sensors
//!
//! The board has no real probes yet. Readings are drawn at random from
//! plausible aquarium ranges in 0.1 steps and stored as fixed-point
//! tenths.

use core::fmt::Write;

use aquamatico_hal::RandomSource;
use heapless::String;

/// Lowest simulated temperature (×10 for 0.1°C resolution)
pub const TEMPERATURE_MIN_X10: u16 = 270;

/// Number of 0.1°C steps above the minimum (upper bound exclusive: 30.0°C)
pub const TEMPERATURE_STEPS: u16 = 30;

/// Lowest simulated pH (×10)
pub const PH_MIN_X10: u16 = 60;

/// Number of 0.1 pH steps above the minimum (upper bound exclusive: 8.0)
pub const PH_STEPS: u16 = 20;

/// Lowest simulated water level in percent
pub const WATER_LEVEL_MIN: u8 = 95;

/// Highest simulated water level in percent (inclusive)
pub const WATER_LEVEL_MAX: u8 = 100;

/// Capacity of a formatted value string
///
/// The widest value, `" 6553.5 C"` from `u16::MAX`, takes 9 bytes.
pub const VALUE_LEN: usize = 16;

/// One set of simulated readings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorReading {
    /// Water temperature in 0.1°C units (e.g., 284 = 28.4°C)
    pub temperature_x10: u16,
    /// pH in 0.1 units (e.g., 71 = 7.1)
    pub ph_x10: u16,
    /// Water level in percent
    pub water_level: u8,
}

impl SensorReading {
    /// Draw a new reading
    pub fn simulate<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        let temperature_x10 = TEMPERATURE_MIN_X10 + rng.below(u32::from(TEMPERATURE_STEPS)) as u16;
        let ph_x10 = PH_MIN_X10 + rng.below(u32::from(PH_STEPS)) as u16;
        let level_span = u32::from(WATER_LEVEL_MAX - WATER_LEVEL_MIN) + 1;
        let water_level = WATER_LEVEL_MIN + rng.below(level_span) as u8;

        Self {
            temperature_x10,
            ph_x10,
            water_level,
        }
    }

    /// Temperature value text, e.g. `" 28.4 C"`
    pub fn format_temperature(&self) -> String<VALUE_LEN> {
        let mut out = String::new();
        let written = write!(
            out,
            " {}.{} C",
            self.temperature_x10 / 10,
            self.temperature_x10 % 10
        );
        debug_assert!(written.is_ok());
        out
    }

    /// pH value text, e.g. `" 7.1"`
    pub fn format_ph(&self) -> String<VALUE_LEN> {
        let mut out = String::new();
        let written = write!(out, " {}.{}", self.ph_x10 / 10, self.ph_x10 % 10);
        debug_assert!(written.is_ok());
        out
    }

    /// Water level value text, e.g. `" 97"`
    pub fn format_water_level(&self) -> String<VALUE_LEN> {
        let mut out = String::new();
        let written = write!(out, " {}", self.water_level);
        debug_assert!(written.is_ok());
        out
    }
}
