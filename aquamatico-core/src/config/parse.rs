//! Minimal TOML reader for `board.toml`
//!
//! Handles only the subset the board file uses:
//! - `[pins]`, `[timing]` and `[display]` section headers
//! - `key = value` pairs with unsigned integer values (decimal, `0x` hex,
//!   `_` separators)
//! - Pin values written as `"gpio7"` or a bare number
//! - Comments (# ...), whole-line or trailing
//!
//! Keys left out keep their default. Unknown sections and keys are errors
//! so a typo never silently falls back to a default.

use super::types::{BoardConfig, ConfigError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Pins,
    Timing,
    Display,
}

/// Parse and validate a board configuration
pub fn parse_config(input: &str) -> Result<BoardConfig, ConfigError> {
    let mut config = BoardConfig::default();
    let mut section = Section::Root;

    for (index, raw) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = strip_comment(raw).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            if !line.ends_with(']') {
                return Err(ConfigError::MalformedLine { line: line_no });
            }
            section = parse_section_header(&line[1..line.len() - 1])
                .ok_or(ConfigError::InvalidSection { line: line_no })?;
            continue;
        }

        let (key, value) =
            parse_key_value(line).ok_or(ConfigError::MalformedLine { line: line_no })?;
        apply_value(&mut config, section, key, value, line_no)?;
    }

    config.validate()?;
    Ok(config)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_section_header(header: &str) -> Option<Section> {
    match header.trim() {
        "pins" => Some(Section::Pins),
        "timing" => Some(Section::Timing),
        "display" => Some(Section::Display),
        _ => None,
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse an unsigned integer, accepting `0x` hex and `_` separators
fn parse_int(value: &str) -> Option<u32> {
    let (digits, radix) = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => (hex, 16),
        None => (value, 10),
    };

    if digits.is_empty() || digits.starts_with('_') {
        return None;
    }

    let mut result: u32 = 0;
    for c in digits.chars() {
        if c == '_' {
            continue;
        }
        let digit = c.to_digit(radix)?;
        result = result.checked_mul(radix)?.checked_add(digit)?;
    }
    Some(result)
}

/// Parse a pin written as `"gpio11"`, `gpio11` or `11`
fn parse_pin(value: &str) -> Option<u8> {
    let value = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);
    let number = value.strip_prefix("gpio").unwrap_or(value);
    parse_int(number).and_then(|n| u8::try_from(n).ok())
}

fn apply_value(
    config: &mut BoardConfig,
    section: Section,
    key: &str,
    value: &str,
    line: usize,
) -> Result<(), ConfigError> {
    let invalid = ConfigError::InvalidValue { line };
    let int = || parse_int(value).ok_or(invalid);
    let pin = || parse_pin(value).ok_or(invalid);

    match (section, key) {
        (Section::Pins, "led") => config.pins.led = pin()?,
        (Section::Pins, "button_a") => config.pins.button_a = pin()?,
        (Section::Pins, "button_b") => config.pins.button_b = pin()?,
        (Section::Pins, "i2c_sda") => config.pins.i2c_sda = pin()?,
        (Section::Pins, "i2c_scl") => config.pins.i2c_scl = pin()?,

        (Section::Timing, "hold_ms") => config.timing.hold_ms = int()?,
        (Section::Timing, "debounce_ms") => config.timing.debounce_ms = int()?,
        (Section::Timing, "refresh_interval_ms") => config.timing.refresh_interval_ms = int()?,
        (Section::Timing, "reset_gap_us") => config.timing.reset_gap_us = int()?,
        (Section::Timing, "bit_rate_hz") => config.timing.bit_rate_hz = int()?,

        (Section::Display, "i2c_address") => {
            config.display.i2c_address = u8::try_from(int()?).map_err(|_| invalid)?
        }
        (Section::Display, "i2c_frequency_hz") => config.display.i2c_frequency_hz = int()?,

        _ => return Err(ConfigError::UnknownKey { line }),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_gives_defaults() {
        assert_eq!(parse_config(""), Ok(BoardConfig::default()));
        assert_eq!(
            parse_config("# nothing here\n\n"),
            Ok(BoardConfig::default())
        );
    }

    #[test]
    fn test_full_board_file() {
        let input = r#"
# Aquamatico Mini
[pins]
led = "gpio7"
button_a = "gpio5"   # left
button_b = 6
i2c_sda = "gpio14"
i2c_scl = "gpio15"

[timing]
hold_ms = 1_500
debounce_ms = 250
refresh_interval_ms = 10000
reset_gap_us = 120
bit_rate_hz = 800_000

[display]
i2c_address = 0x3D
i2c_frequency_hz = 100_000
"#;
        let config = parse_config(input).unwrap();
        assert_eq!(config.pins.led, 7);
        assert_eq!(config.pins.button_a, 5);
        assert_eq!(config.pins.button_b, 6);
        assert_eq!(config.timing.hold_ms, 1500);
        assert_eq!(config.timing.debounce_ms, 250);
        assert_eq!(config.timing.refresh_interval_ms, 10_000);
        assert_eq!(config.timing.reset_gap_us, 120);
        assert_eq!(config.display.i2c_address, 0x3D);
        assert_eq!(config.display.i2c_frequency_hz, 100_000);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = parse_config("[timing]\nhold_ms = 500\n").unwrap();
        assert_eq!(config.timing.hold_ms, 500);
        assert_eq!(config.timing.refresh_interval_ms, 5000);
        assert_eq!(config.pins, BoardConfig::default().pins);
    }

    #[test]
    fn test_unknown_section() {
        assert_eq!(
            parse_config("[pins]\nled = 7\n[motors]\n"),
            Err(ConfigError::InvalidSection { line: 3 })
        );
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(
            parse_config("[timing]\nhold = 5\n"),
            Err(ConfigError::UnknownKey { line: 2 })
        );
        // Keys outside a section are not accepted either
        assert_eq!(
            parse_config("hold_ms = 5\n"),
            Err(ConfigError::UnknownKey { line: 1 })
        );
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            parse_config("[timing]\nhold_ms = fast\n"),
            Err(ConfigError::InvalidValue { line: 2 })
        );
        assert_eq!(
            parse_config("[timing]\nhold_ms = -1\n"),
            Err(ConfigError::InvalidValue { line: 2 })
        );
        assert_eq!(
            parse_config("[pins]\nled = \"gpio300\"\n"),
            Err(ConfigError::InvalidValue { line: 2 })
        );
        assert_eq!(
            parse_config("[display]\ni2c_address = 0x100\n"),
            Err(ConfigError::InvalidValue { line: 2 })
        );
        assert_eq!(
            parse_config("[timing]\nhold_ms = 99999999999\n"),
            Err(ConfigError::InvalidValue { line: 2 })
        );
    }

    #[test]
    fn test_malformed_lines() {
        assert_eq!(
            parse_config("[pins\n"),
            Err(ConfigError::MalformedLine { line: 1 })
        );
        assert_eq!(
            parse_config("[pins]\nled\n"),
            Err(ConfigError::MalformedLine { line: 2 })
        );
        assert_eq!(
            parse_config("[pins]\nled =\n"),
            Err(ConfigError::MalformedLine { line: 2 })
        );
    }

    #[test]
    fn test_parsed_file_is_validated() {
        assert_eq!(
            parse_config("[timing]\nreset_gap_us = 50\n"),
            Err(ConfigError::ResetGapTooShort)
        );
        assert_eq!(
            parse_config("[pins]\nled = 40\n"),
            Err(ConfigError::PinOutOfRange)
        );
    }

    #[test]
    fn test_parse_int_forms() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int("0x3c"), Some(0x3C));
        assert_eq!(parse_int("1_000"), Some(1000));
        assert_eq!(parse_int("_1"), None);
        assert_eq!(parse_int("0x"), None);
        assert_eq!(parse_int(""), None);
    }
}
