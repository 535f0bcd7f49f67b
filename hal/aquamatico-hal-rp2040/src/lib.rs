//! RP2040-specific HAL for the Aquamatico Mini firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `aquamatico-hal` traits:
//!
//! - PIO-based LED chain serializer and its engine pool
//! - Pulled-up button inputs
//! - Timer-backed clock and busy-wait delay
//! - Ring oscillator random source

#![no_std]

pub mod gpio;
pub mod rng;
pub mod time;
pub mod ws2812;

pub use gpio::PulledUpInput;
pub use rng::RoscRandom;
pub use time::{BusyDelay, SystemClock};
pub use ws2812::{Ws2812Engine, Ws2812Pool};
