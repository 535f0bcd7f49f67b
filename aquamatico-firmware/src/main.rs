//! Aquamatico Mini - Aquarium Monitor Firmware
//!
//! Main firmware binary for the RP2040 Aquamatico Mini board. A 5x5 LED
//! matrix idles with a random twinkle, two buttons trigger animations and
//! an OLED shows simulated water temperature, pH and level readings.
//!
//! Everything runs in the main task. Animation holds are busy-waits, so
//! there is nothing else to spawn.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{PIO0, PIO1};
use embassy_rp::pio::{InterruptHandler as PioInterruptHandler, Pio};
use {defmt_rtt as _, panic_probe as _};

use aquamatico_core::screen;
use aquamatico_core::{AnimationEngine, Button, Buttons, ControlError, ControlLoop, LedMatrix};
use aquamatico_display::OledTextDisplay;
use aquamatico_hal_rp2040::{BusyDelay, PulledUpInput, RoscRandom, SystemClock, Ws2812Pool};

mod board;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
    PIO1_IRQ_0 => PioInterruptHandler<PIO1>;
});

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Aquamatico Mini starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = board::load_config();

    // OLED on I2C1 (SCL GPIO15, SDA GPIO14)
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = config.display.i2c_frequency_hz;
    let bus = I2c::new_blocking(p.I2C1, p.PIN_15, p.PIN_14, i2c_config);
    let mut display = OledTextDisplay::new(bus, config.display.i2c_address);
    match display.init() {
        Ok(()) => info!("OLED initialized"),
        Err(e) => warn!("OLED init failed: {}", e),
    }
    if let Err(e) = screen::show_welcome(&mut display) {
        warn!("Welcome screen failed: {}", e);
    }

    // Buttons (active low)
    let buttons = Buttons {
        a: Button::new(PulledUpInput::new(p.PIN_5)),
        b: Button::new(PulledUpInput::new(p.PIN_6)),
    };

    // LED matrix on the first free PIO state machine
    let mut pool = Ws2812Pool::new(p.PIN_7, board::WIRED.led)
        .with_pio0(Pio::new(p.PIO0, Irqs))
        .with_pio1(Pio::new(p.PIO1, Irqs));
    let leds = match LedMatrix::initialize(&mut pool, &config.led_config(), BusyDelay) {
        Ok(leds) => leds,
        Err(e) => {
            error!("LED matrix init failed: {}", e);
            defmt::panic!("LED matrix unavailable, halting");
        }
    };
    info!(
        "LED matrix on GPIO{} ({} Hz, {} us reset)",
        config.pins.led,
        config.timing.bit_rate_hz,
        leds.reset_gap_us()
    );

    let animations = AnimationEngine::new(BusyDelay, config.timing.hold_ms);
    let mut control = ControlLoop::new(
        leds,
        animations,
        RoscRandom::new(),
        buttons,
        SystemClock,
        display,
        &config.timing,
    );

    control.start();
    info!("Entering main loop");

    loop {
        match control.step() {
            Ok(cycle) => debug!("{}", cycle),
            Err(ControlError::Display(e)) => warn!("Display refresh failed: {}", e),
            Err(ControlError::Led(e)) => warn!("LED update failed: {}", e),
        }
    }
}
