//! Board configuration types
//!
//! Defaults match the Aquamatico Mini board wiring and the timings the
//! animations were designed around.

use crate::animation::DEFAULT_HOLD_MS;
use crate::control::{DEFAULT_DEBOUNCE_MS, DEFAULT_REFRESH_INTERVAL_MS};
use crate::led::{
    LedConfig, DEFAULT_BIT_RATE_HZ, DEFAULT_LED_PIN, DEFAULT_RESET_GAP_US, MIN_RESET_GAP_US,
};

/// Highest GPIO number on the RP2040
pub const MAX_GPIO: u8 = 29;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Line is neither a section header, a key/value pair nor a comment
    MalformedLine { line: usize },
    /// Unknown `[section]` name
    InvalidSection { line: usize },
    /// Key not valid in the current section
    UnknownKey { line: usize },
    /// Value is not a non-negative integer in range
    InvalidValue { line: usize },
    /// GPIO number above [`MAX_GPIO`]
    PinOutOfRange,
    /// Pin differs from the one the peripheral is soldered to
    PinMismatch,
    /// Reset gap below the datasheet minimum
    ResetGapTooShort,
    /// Animation hold of zero
    ZeroHold,
    /// Sensor refresh interval of zero
    ZeroRefreshInterval,
    /// LED bit rate of zero
    ZeroBitRate,
}

/// GPIO assignments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// LED chain data output
    pub led: u8,
    /// Button A (active-low, pulled up)
    pub button_a: u8,
    /// Button B (active-low, pulled up)
    pub button_b: u8,
    /// OLED I2C data
    pub i2c_sda: u8,
    /// OLED I2C clock
    pub i2c_scl: u8,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            led: DEFAULT_LED_PIN,
            button_a: 5,
            button_b: 6,
            i2c_sda: 14,
            i2c_scl: 15,
        }
    }
}

impl PinConfig {
    /// Check that every pin names the GPIO the board actually wires
    ///
    /// The pins are a record of the PCB, not a choice: drivers are bound
    /// to fixed pin peripherals at compile time.
    pub fn check_wiring(&self, wired: &PinConfig) -> Result<(), ConfigError> {
        if self == wired {
            Ok(())
        } else {
            Err(ConfigError::PinMismatch)
        }
    }

    fn all(&self) -> [u8; 5] {
        [
            self.led,
            self.button_a,
            self.button_b,
            self.i2c_sda,
            self.i2c_scl,
        ]
    }
}

/// Animation and refresh timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    /// How long each animation frame stays up
    pub hold_ms: u32,
    /// Cooldown after a button-triggered animation
    pub debounce_ms: u32,
    /// Minimum time between sensor display refreshes
    pub refresh_interval_ms: u32,
    /// Idle gap after each LED frame
    pub reset_gap_us: u32,
    /// LED serial bit rate
    pub bit_rate_hz: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            hold_ms: DEFAULT_HOLD_MS,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            reset_gap_us: DEFAULT_RESET_GAP_US,
            bit_rate_hz: DEFAULT_BIT_RATE_HZ,
        }
    }
}

/// OLED bus settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// 7-bit I2C address
    pub i2c_address: u8,
    /// I2C clock in Hz
    pub i2c_frequency_hz: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            i2c_address: 0x3C,
            i2c_frequency_hz: 400_000,
        }
    }
}

/// Complete board configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardConfig {
    pub pins: PinConfig,
    pub timing: TimingConfig,
    pub display: DisplayConfig,
}

impl BoardConfig {
    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pins.all().iter().any(|pin| *pin > MAX_GPIO) {
            return Err(ConfigError::PinOutOfRange);
        }
        if self.timing.reset_gap_us < MIN_RESET_GAP_US {
            return Err(ConfigError::ResetGapTooShort);
        }
        if self.timing.hold_ms == 0 {
            return Err(ConfigError::ZeroHold);
        }
        if self.timing.refresh_interval_ms == 0 {
            return Err(ConfigError::ZeroRefreshInterval);
        }
        if self.timing.bit_rate_hz == 0 {
            return Err(ConfigError::ZeroBitRate);
        }
        Ok(())
    }

    /// LED driver settings
    pub fn led_config(&self) -> LedConfig {
        LedConfig {
            pin: self.pins.led,
            bit_rate_hz: self.timing.bit_rate_hz,
            reset_gap_us: self.timing.reset_gap_us,
        }
    }
}
