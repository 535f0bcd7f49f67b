//! Time abstractions

/// Monotonic millisecond clock
pub trait Clock {
    /// Milliseconds elapsed since boot
    fn now_ms(&self) -> u64;
}

/// Blocking delay
///
/// The caller is suspended for the whole duration. There is no scheduler
/// to yield to, so implementations may busy-wait.
pub trait Delay {
    /// Block for `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);

    /// Block for `us` microseconds
    fn delay_us(&mut self, us: u32);
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}
