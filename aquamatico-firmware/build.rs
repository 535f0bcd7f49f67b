//! Build script for aquamatico-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates board.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Shortest LED reset gap the matrix latches on
const MIN_RESET_GAP_US: i64 = 80;

/// Highest RP2040 GPIO number
const MAX_GPIO: i64 = 29;

/// GPIOs the board is soldered to (see `src/board.rs`)
const WIRED_PINS: [(&str, i64); 5] = [
    ("led", 7),
    ("button_a", 5),
    ("button_b", 6),
    ("i2c_sda", 14),
    ("i2c_scl", 15),
];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate board.toml configuration at compile time
fn validate_config() {
    // Re-run if board.toml changes
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds board.toml at build time.                   ║\n\
            ║  Please create one in the aquamatico-firmware directory.         ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read board.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in board.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_pins(&config, &mut errors);
    validate_timing(&config, &mut errors);
    validate_display(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid values in board.toml                             ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=board.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Only the three known sections, each a table
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = config.as_table() else {
        return;
    };
    for (name, value) in table {
        if !["pins", "timing", "display"].contains(&name.as_str()) {
            errors.push(format!("unknown section [{}]", name));
        } else if !value.is_table() {
            errors.push(format!("[{}] must be a table", name));
        }
    }
}

/// Look up `section.key`, checking that it is a non-negative integer
fn get_int(
    config: &toml::Value,
    section: &str,
    key: &str,
    errors: &mut Vec<String>,
) -> Option<i64> {
    match config.get(section)?.get(key)? {
        toml::Value::Integer(n) if *n >= 0 => Some(*n),
        _ => {
            errors.push(format!("[{}] {} must be a non-negative integer", section, key));
            None
        }
    }
}

fn check_keys(config: &toml::Value, section: &str, known: &[&str], errors: &mut Vec<String>) {
    let Some(table) = config.get(section).and_then(toml::Value::as_table) else {
        return;
    };
    for key in table.keys() {
        if !known.contains(&key.as_str()) {
            errors.push(format!("[{}] unknown key '{}'", section, key));
        }
    }
}

fn validate_pins(config: &toml::Value, errors: &mut Vec<String>) {
    let keys: Vec<&str> = WIRED_PINS.iter().map(|(key, _)| *key).collect();
    check_keys(config, "pins", &keys, errors);

    let Some(pins) = config.get("pins") else {
        return;
    };
    for (key, wired) in WIRED_PINS {
        let pin = match pins.get(key) {
            None => continue,
            Some(toml::Value::Integer(n)) => Some(*n),
            Some(toml::Value::String(s)) => s.strip_prefix("gpio").and_then(|n| n.parse().ok()),
            Some(_) => None,
        };
        match pin {
            Some(n) if n == wired => {}
            Some(n) if (0..=MAX_GPIO).contains(&n) => {
                errors.push(format!("[pins] {} is wired to gpio{}, not gpio{}", key, wired, n))
            }
            _ => errors.push(format!("[pins] {} must be gpio0-gpio{}", key, MAX_GPIO)),
        }
    }
}

fn validate_timing(config: &toml::Value, errors: &mut Vec<String>) {
    check_keys(
        config,
        "timing",
        &["hold_ms", "debounce_ms", "refresh_interval_ms", "reset_gap_us", "bit_rate_hz"],
        errors,
    );

    if let Some(gap) = get_int(config, "timing", "reset_gap_us", errors) {
        if gap < MIN_RESET_GAP_US {
            errors.push(format!("[timing] reset_gap_us must be at least {}", MIN_RESET_GAP_US));
        }
    }
    for key in ["hold_ms", "refresh_interval_ms", "bit_rate_hz"] {
        if get_int(config, "timing", key, errors) == Some(0) {
            errors.push(format!("[timing] {} must not be zero", key));
        }
    }
    get_int(config, "timing", "debounce_ms", errors);
}

fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    check_keys(config, "display", &["i2c_address", "i2c_frequency_hz"], errors);

    if let Some(addr) = get_int(config, "display", "i2c_address", errors) {
        if addr > 0x7F {
            errors.push("[display] i2c_address must be a 7-bit address".to_string());
        }
    }
    get_int(config, "display", "i2c_frequency_hz", errors);
}
