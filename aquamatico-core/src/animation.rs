//! Matrix animations
//!
//! Every animation is a finite, blocking run of (mutate buffer, write
//! frame, hold) steps. The engine borrows the matrix only for the length
//! of one call and never keeps it.

use aquamatico_hal::{Delay, SerialEngine};

use crate::led::{LedError, LedMatrix};
use crate::pixel::{colors, GRID_SIZE};

/// Time each animation frame stays on the matrix
pub const DEFAULT_HOLD_MS: u32 = 2000;

/// Column the green dot falls down
pub const DROP_COLUMN: usize = 2;

/// Row the green dot starts from
const TOP_ROW: usize = GRID_SIZE - 1;

/// Rows lit by the row blink, in lighting order
const BLINK_ROWS: [usize; 2] = [GRID_SIZE - 1, GRID_SIZE - 2];

/// Runs the fixed animation set against an [`LedMatrix`]
pub struct AnimationEngine<D> {
    delay: D,
    hold_ms: u32,
}

impl<D: Delay> AnimationEngine<D> {
    /// Create an engine holding each frame for `hold_ms`
    pub fn new(delay: D, hold_ms: u32) -> Self {
        Self { delay, hold_ms }
    }

    /// Block for `ms` milliseconds
    pub fn hold(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    /// Blank the matrix, paint it background blue and show it
    pub fn fill_background<E, LD>(&mut self, leds: &mut LedMatrix<E, LD>)
    where
        E: SerialEngine,
        LD: Delay,
    {
        leds.clear();
        leds.fill(colors::BACKGROUND);
        leds.write();
    }

    /// One idle heartbeat: flash `index` orange, then restore it to blue
    pub fn idle_twinkle<E, LD>(
        &mut self,
        leds: &mut LedMatrix<E, LD>,
        index: usize,
    ) -> Result<(), LedError>
    where
        E: SerialEngine,
        LD: Delay,
    {
        leds.set_pixel(index, colors::ACCENT)?;
        leds.write();
        self.hold(self.hold_ms);

        leds.set_pixel(index, colors::BACKGROUND)?;
        leds.write();
        self.hold(self.hold_ms);
        Ok(())
    }

    /// Drop a green dot from the top row to row 0 of [`DROP_COLUMN`]
    ///
    /// Leaves the column background blue again.
    pub fn drop_green_dot<E, LD>(&mut self, leds: &mut LedMatrix<E, LD>) -> Result<(), LedError>
    where
        E: SerialEngine,
        LD: Delay,
    {
        for row in (0..GRID_SIZE).rev() {
            if row < TOP_ROW {
                leds.set_cell(row + 1, DROP_COLUMN, colors::BACKGROUND)?;
            }
            leds.set_cell(row, DROP_COLUMN, colors::GREEN)?;
            leds.write();
            self.hold(self.hold_ms);
        }

        leds.set_cell(0, DROP_COLUMN, colors::BACKGROUND)?;
        leds.write();
        Ok(())
    }

    /// Light rows 4 and 3 white one after the other, then restore them
    ///
    /// No hold after the final frame.
    pub fn blink_last_two_rows<E, LD>(
        &mut self,
        leds: &mut LedMatrix<E, LD>,
    ) -> Result<(), LedError>
    where
        E: SerialEngine,
        LD: Delay,
    {
        for row in BLINK_ROWS {
            leds.set_row(row, colors::WHITE)?;
            leds.write();
            self.hold(self.hold_ms);
        }

        let [first, second] = BLINK_ROWS;
        leds.set_row(second, colors::BACKGROUND)?;
        leds.write();
        self.hold(self.hold_ms);

        leds.set_row(first, colors::BACKGROUND)?;
        leds.write();
        Ok(())
    }
}
