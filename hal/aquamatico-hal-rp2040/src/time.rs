//! Time sources backed by the embassy time driver

use aquamatico_hal::{Clock, Delay};
use embassy_time::{block_for, Duration, Instant};

/// Milliseconds since boot
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}

/// Busy-wait delay
///
/// Spins on the timer instead of yielding to the executor. The control
/// loop is the only task, so nothing else needs the CPU meanwhile.
#[derive(Debug, Clone, Copy, Default)]
pub struct BusyDelay;

impl Delay for BusyDelay {
    fn delay_ms(&mut self, ms: u32) {
        block_for(Duration::from_millis(u64::from(ms)));
    }

    fn delay_us(&mut self, us: u32) {
        block_for(Duration::from_micros(u64::from(us)));
    }
}
