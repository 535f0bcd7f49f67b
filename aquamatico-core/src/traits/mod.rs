//! Output abstraction traits
//!
//! Chip-level seams (pins, timing engines, time) live in `aquamatico-hal`.
//! These traits cover whole peripherals driven by the application.

pub mod display;

pub use display::TextDisplay;
