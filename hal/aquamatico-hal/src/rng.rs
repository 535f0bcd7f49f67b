//! Random number source

/// Source of random 32-bit words
///
/// Quality requirements are low: values pick which LED twinkles and
/// generate simulated sensor readings.
pub trait RandomSource {
    /// Next random word
    fn next_u32(&mut self) -> u32;

    /// Random value in `0..bound`
    ///
    /// Returns 0 when `bound` is 0. The modulo bias is below 1e-8 for the
    /// small bounds used by the firmware.
    fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.next_u32() % bound
    }
}
