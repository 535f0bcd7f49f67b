//! Board-agnostic core logic for the Aquamatico Mini firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - 5x5 LED matrix buffer and frame serialization
//! - Matrix animations (twinkle, green dot drop, row blink)
//! - Simulated water sensors and their display layout
//! - The main control loop
//! - Board configuration and its TOML reader
//!
//! Chip access goes through the `aquamatico-hal` traits, so everything
//! here runs under `cargo test` on the host.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod animation;
pub mod config;
pub mod control;
pub mod led;
pub mod pixel;
pub mod screen;
pub mod sensor;
pub mod traits;

#[cfg(test)]
mod testing;

pub use animation::AnimationEngine;
pub use control::{Button, Buttons, ControlError, ControlLoop, Cycle};
pub use led::{LedConfig, LedError, LedMatrix};
pub use pixel::{Pixel, PixelBuffer};
pub use sensor::SensorReading;
pub use traits::TextDisplay;
