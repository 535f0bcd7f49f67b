//! OLED screen layouts
//!
//! Two fixed screens: the boot greeting and the three-line sensor status.
//! Both end with a render so the panel never shows a half-drawn screen.

use crate::sensor::SensorReading;
use crate::traits::TextDisplay;

/// Left margin of every text line
pub const TEXT_X: i32 = 5;

/// Column where sensor values start
pub const VALUE_X: i32 = 80;

/// Vertical pitch of the greeting lines
pub const WELCOME_LINE_PITCH: i32 = 8;

/// Vertical pitch of the status lines
pub const STATUS_LINE_PITCH: i32 = 10;

/// Boot greeting
pub const WELCOME_LINES: [&str; 3] = ["  Bem-vindo ao", "  Aquamatico", "     Mini!"];

/// Status labels, one per line
pub const STATUS_LABELS: [&str; 3] = [" Temperatura: ", " pH: ", " Niv.agua: "];

/// Spaces wide enough to wipe a line from [`TEXT_X`] to the panel edge
pub const BLANK_LINE: &str = "                         ";

/// Draw the boot greeting and render it
pub fn show_welcome<T: TextDisplay + ?Sized>(display: &mut T) -> Result<(), T::Error> {
    let mut y = 0;
    for line in WELCOME_LINES {
        display.draw_string(TEXT_X, y, line)?;
        y += WELCOME_LINE_PITCH;
    }
    display.render()
}

/// Replace the status lines with `reading` and render
pub fn show_reading<T: TextDisplay + ?Sized>(
    display: &mut T,
    reading: &SensorReading,
) -> Result<(), T::Error> {
    for row in 0..STATUS_LABELS.len() {
        display.draw_string(TEXT_X, status_line_y(row), BLANK_LINE)?;
    }

    let values = [
        reading.format_temperature(),
        reading.format_ph(),
        reading.format_water_level(),
    ];
    for (row, (label, value)) in STATUS_LABELS.iter().zip(values.iter()).enumerate() {
        let y = status_line_y(row);
        display.draw_string(TEXT_X, y, label)?;
        display.draw_string(VALUE_X, y, value)?;
    }

    display.render()
}

const fn status_line_y(row: usize) -> i32 {
    row as i32 * STATUS_LINE_PITCH
}
