//! Board configuration
//!
//! Plain `Copy` structs with working defaults, plus a reader for the
//! small TOML file the firmware embeds at build time.

pub mod parse;
pub mod types;

pub use parse::parse_config;
pub use types::*;
