//! Board configuration
//!
//! `board.toml` is compiled into the image. The build script has already
//! validated it, so a parse failure here means the file and the parser
//! disagree; the firmware then runs on compiled defaults.

use defmt::*;

use aquamatico_core::config::{parse_config, BoardConfig, PinConfig};

/// Embedded board configuration (compiled into firmware)
/// Edit board.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../board.toml");

/// Pins the peripherals are physically wired to
///
/// PIO, I2C and GPIO drivers take typed pin peripherals, so `main` claims
/// these exact pins. Keep in sync with the wiring table in `build.rs`.
pub const WIRED: PinConfig = PinConfig {
    led: 7,
    button_a: 5,
    button_b: 6,
    i2c_sda: 14,
    i2c_scl: 15,
};

/// Parse the embedded configuration, falling back to defaults
///
/// `[pins]` must describe the wiring. A mismatch is logged and the wired
/// pins are used, so no configured pin ever reaches a driver.
pub fn load_config() -> BoardConfig {
    let mut config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {}", e);
            error!("Using compiled defaults");
            BoardConfig::default()
        }
    };

    if let Err(e) = config.pins.check_wiring(&WIRED) {
        error!("board.toml pins {} do not match the board: {}", config.pins, e);
        error!("Using the wired pins {}", WIRED);
        config.pins = WIRED;
    }
    config
}
