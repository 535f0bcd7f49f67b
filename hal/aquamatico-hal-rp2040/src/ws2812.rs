//! PIO-based LED chain serializer
//!
//! Uses RP2040's Programmable I/O to produce the single-wire 800 kHz
//! LED protocol. Each bit is a fixed 10-cycle pattern: the pin goes high,
//! stays high a short or long time depending on the bit value, then goes
//! low. The CPU only feeds bytes into the TX FIFO.
//!
//! # Architecture
//!
//! The pool owns both PIO blocks and the LED data pin. A claim loads the
//! program into the first free block and starts state machine 0 on it.
//! PIO0 is tried first, then PIO1; when neither is left the claim reports
//! exhaustion.

use aquamatico_hal::{EngineAllocator, EngineClaim, SerialEngine};
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::peripherals::{PIO0, PIO1};
use embassy_rp::pio::{
    Common, Config, Direction, FifoJoin, Instance, Pin, Pio, PioPin, ShiftConfig, ShiftDirection,
    StateMachine,
};
use embassy_rp::Peri;
use embassy_time::{block_for, Duration};
use fixed::types::U24F8;

/// Cycles spent driving the pin high for every bit
const T1: u8 = 2;
/// Extra high cycles for a one bit (low for a zero bit)
const T2: u8 = 5;
/// Low cycles closing every bit
const T3: u8 = 3;

/// PIO cycles per transmitted bit
pub const CYCLES_PER_BIT: u32 = (T1 + T2 + T3) as u32;

/// Bits shifted out per FIFO word
pub const BITS_PER_WORD: u32 = 8;

/// Largest 16.8 divider the PIO accepts
const MAX_DIVIDER_BITS: u32 = 0xFFFF_FF;

/// Calculate the PIO clock divider for a bit rate
///
/// The program runs at SYS_CLK / divider and spends [`CYCLES_PER_BIT`]
/// cycles per bit, so:
/// divider = SYS_CLK / (bit_rate * CYCLES_PER_BIT)
///
/// Result is in 16.8 fixed point, clamped to the hardware range.
pub fn clock_divider(sys_clk_hz: u32, bit_rate_hz: u32) -> U24F8 {
    if bit_rate_hz == 0 {
        return U24F8::from_bits(MAX_DIVIDER_BITS);
    }

    // divider * 256 = (SYS_CLK * 256) / (bit_rate * cycles)
    let divisor = u64::from(bit_rate_hz) * u64::from(CYCLES_PER_BIT);
    let divider_x256 = (u64::from(sys_clk_hz) * 256) / divisor;

    // Integer part must be 1..=65535
    let divider_x256 = divider_x256.clamp(256, u64::from(MAX_DIVIDER_BITS));
    U24F8::from_bits(divider_x256 as u32)
}

/// Time for the last word to leave the shift register after the FIFO empties
pub fn drain_time_us(bit_rate_hz: u32) -> u64 {
    if bit_rate_hz == 0 {
        return 0;
    }
    (u64::from(BITS_PER_WORD) * 1_000_000).div_ceil(u64::from(bit_rate_hz))
}

/// One running state machine with its program and pin
pub struct PioLane<'d, P: Instance> {
    // Kept alive so the program and pin stay allocated
    _common: Common<'d, P>,
    _pin: Pin<'d, P>,
    sm: StateMachine<'d, P, 0>,
    drain_us: u64,
}

impl<'d, P: Instance> PioLane<'d, P> {
    fn start(pio: Pio<'d, P>, pin: Peri<'d, impl PioPin>, bit_rate_hz: u32) -> Self {
        let Pio {
            mut common,
            sm0: mut sm,
            ..
        } = pio;

        let prg = pio::pio_asm!(
            ".side_set 1",
            ".wrap_target",
            "bitloop:",
            "    out x, 1        side 0 [2]",
            "    jmp !x do_zero  side 1 [1]",
            "do_one:",
            "    jmp bitloop     side 1 [4]",
            "do_zero:",
            "    nop             side 0 [4]",
            ".wrap",
        );

        let out_pin = common.make_pio_pin(pin);
        let mut cfg = Config::default();
        cfg.use_program(&common.load_program(&prg.program), &[&out_pin]);
        cfg.clock_divider = clock_divider(clk_sys_freq(), bit_rate_hz);
        cfg.fifo_join = FifoJoin::TxOnly;
        cfg.shift_out = ShiftConfig {
            auto_fill: true,
            threshold: BITS_PER_WORD as u8,
            direction: ShiftDirection::Left,
        };

        sm.set_config(&cfg);
        sm.set_pin_dirs(Direction::Out, &[&out_pin]);
        sm.set_enable(true);

        Self {
            _common: common,
            _pin: out_pin,
            sm,
            drain_us: drain_time_us(bit_rate_hz),
        }
    }

    fn put_blocking(&mut self, byte: u8) {
        // Left shift: the byte goes out MSB first from the top of the word
        let word = u32::from(byte) << 24;
        while !self.sm.tx().try_push(word) {}
    }

    fn flush(&mut self) {
        while !self.sm.tx().empty() {}
        block_for(Duration::from_micros(self.drain_us));
    }
}

/// Claimed LED serializer
pub enum Ws2812Engine<'d> {
    Pio0(PioLane<'d, PIO0>),
    Pio1(PioLane<'d, PIO1>),
}

impl SerialEngine for Ws2812Engine<'_> {
    fn put_blocking(&mut self, byte: u8) {
        match self {
            Ws2812Engine::Pio0(lane) => lane.put_blocking(byte),
            Ws2812Engine::Pio1(lane) => lane.put_blocking(byte),
        }
    }

    fn flush(&mut self) {
        match self {
            Ws2812Engine::Pio0(lane) => lane.flush(),
            Ws2812Engine::Pio1(lane) => lane.flush(),
        }
    }
}

/// Hands out at most one serializer per PIO block
///
/// Wired to a single data pin; claims for any other pin are refused.
pub struct Ws2812Pool<'d, L: PioPin> {
    pin: Option<Peri<'d, L>>,
    pin_number: u8,
    pio0: Option<Pio<'d, PIO0>>,
    pio1: Option<Pio<'d, PIO1>>,
}

impl<'d, L: PioPin> Ws2812Pool<'d, L> {
    /// Create a new pool for the LED data pin `pin_number`
    pub fn new(pin: Peri<'d, L>, pin_number: u8) -> Self {
        Self {
            pin: Some(pin),
            pin_number,
            pio0: None,
            pio1: None,
        }
    }

    /// Offer PIO0 to the pool
    pub fn with_pio0(mut self, pio: Pio<'d, PIO0>) -> Self {
        self.pio0 = Some(pio);
        self
    }

    /// Offer PIO1 to the pool
    pub fn with_pio1(mut self, pio: Pio<'d, PIO1>) -> Self {
        self.pio1 = Some(pio);
        self
    }
}

impl<'d, L: PioPin> EngineAllocator for Ws2812Pool<'d, L> {
    type Engine = Ws2812Engine<'d>;

    fn claim(&mut self, pin: u8, bit_rate_hz: u32) -> EngineClaim<Ws2812Engine<'d>> {
        if pin != self.pin_number || bit_rate_hz == 0 {
            return EngineClaim::Exhausted;
        }
        let Some(data_pin) = self.pin.take() else {
            return EngineClaim::Exhausted;
        };

        if let Some(pio) = self.pio0.take() {
            return EngineClaim::Acquired(Ws2812Engine::Pio0(PioLane::start(
                pio,
                data_pin,
                bit_rate_hz,
            )));
        }
        if let Some(pio) = self.pio1.take() {
            return EngineClaim::Acquired(Ws2812Engine::Pio1(PioLane::start(
                pio,
                data_pin,
                bit_rate_hz,
            )));
        }

        self.pin = Some(data_pin);
        EngineClaim::Exhausted
    }
}
