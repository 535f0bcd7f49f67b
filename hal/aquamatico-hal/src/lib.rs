//! Aquamatico Hardware Abstraction Layer
//!
//! This crate defines the hardware seams the board-agnostic core is written
//! against. Chip-specific crates (currently only RP2040) implement them, and
//! host tests substitute recording mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (aquamatico-firmware)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  aquamatico-core (animations, loop)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  aquamatico-hal (this crate - traits)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ aquamatico-   │
//!             │  hal-rp2040   │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`] - Digital input
//! - [`engine::SerialEngine`], [`engine::EngineAllocator`] - Timed serial output
//! - [`time::Clock`], [`time::Delay`] - Monotonic time and blocking waits
//! - [`rng::RandomSource`] - Hardware entropy

#![no_std]
#![deny(unsafe_code)]

pub mod engine;
pub mod gpio;
pub mod rng;
pub mod time;

// Re-export key traits at crate root for convenience
pub use engine::{EngineAllocator, EngineClaim, SerialEngine};
pub use gpio::InputPin;
pub use rng::RandomSource;
pub use time::{Clock, Delay};
