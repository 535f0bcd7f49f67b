//! Recording mocks shared by the unit tests
//!
//! Every mock writes into one `Timeline` so tests can assert the exact
//! interleaving of frames, gaps, holds and display calls.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::string::{String, ToString};
use std::vec::Vec;

use aquamatico_hal::{
    Clock, Delay, EngineAllocator, EngineClaim, InputPin, RandomSource, SerialEngine,
};

use crate::pixel::{Pixel, BYTES_PER_PIXEL};
use crate::traits::TextDisplay;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Frame(Vec<u8>),
    GapUs(u32),
    HoldMs(u32),
    Text { x: i32, y: i32, text: String },
    Render,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Timeline(Rc<RefCell<Vec<Event>>>);

impl Timeline {
    pub(crate) fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub(crate) fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub(crate) fn reset(&self) {
        self.0.borrow_mut().clear();
    }

    pub(crate) fn frames(&self) -> Vec<Vec<Pixel>> {
        self.0
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::Frame(bytes) => Some(decode_frame(bytes)),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn holds(&self) -> Vec<u32> {
        self.0
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::HoldMs(ms) => Some(*ms),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn texts(&self) -> Vec<(i32, i32, String)> {
        self.0
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::Text { x, y, text } => Some((*x, *y, text.clone())),
                _ => None,
            })
            .collect()
    }

    /// Events with the per-frame reset gaps stripped out
    pub(crate) fn without_gaps(&self) -> Vec<Event> {
        self.0
            .borrow()
            .iter()
            .filter(|event| !matches!(event, Event::GapUs(_)))
            .cloned()
            .collect()
    }
}

/// Decode a G,R,B byte stream back into pixels
pub(crate) fn decode_frame(bytes: &[u8]) -> Vec<Pixel> {
    bytes
        .chunks_exact(BYTES_PER_PIXEL)
        .map(|grb| Pixel::new(grb[1], grb[0], grb[2]))
        .collect()
}

pub(crate) struct MockEngine {
    timeline: Timeline,
    pending: Vec<u8>,
}

impl MockEngine {
    pub(crate) fn new(timeline: Timeline) -> Self {
        Self {
            timeline,
            pending: Vec::new(),
        }
    }
}

impl SerialEngine for MockEngine {
    fn put_blocking(&mut self, byte: u8) {
        self.pending.push(byte);
    }

    fn flush(&mut self) {
        if !self.pending.is_empty() {
            let bytes = core::mem::take(&mut self.pending);
            self.timeline.push(Event::Frame(bytes));
        }
    }
}

pub(crate) struct MockAllocator {
    timeline: Timeline,
    free_engines: usize,
    pub(crate) claims: Vec<(u8, u32)>,
}

impl MockAllocator {
    pub(crate) fn new(timeline: Timeline, free_engines: usize) -> Self {
        Self {
            timeline,
            free_engines,
            claims: Vec::new(),
        }
    }
}

impl EngineAllocator for MockAllocator {
    type Engine = MockEngine;

    fn claim(&mut self, pin: u8, bit_rate_hz: u32) -> EngineClaim<MockEngine> {
        self.claims.push((pin, bit_rate_hz));
        if self.free_engines == 0 {
            return EngineClaim::Exhausted;
        }
        self.free_engines -= 1;
        EngineClaim::Acquired(MockEngine::new(self.timeline.clone()))
    }
}

/// Clock advanced only by `MockDelay`
#[derive(Debug, Clone, Default)]
pub(crate) struct MockClock(Rc<Cell<u64>>);

impl MockClock {
    pub(crate) fn advance_us(&self, us: u64) {
        self.0.set(self.0.get() + us);
    }

    pub(crate) fn advance_ms(&self, ms: u64) {
        self.advance_us(ms * 1000);
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.0.get() / 1000
    }
}

#[derive(Debug, Clone)]
pub(crate) struct MockDelay {
    timeline: Timeline,
    clock: MockClock,
}

impl MockDelay {
    pub(crate) fn new(timeline: Timeline, clock: MockClock) -> Self {
        Self { timeline, clock }
    }
}

impl Delay for MockDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.timeline.push(Event::HoldMs(ms));
        self.clock.advance_ms(u64::from(ms));
    }

    fn delay_us(&mut self, us: u32) {
        self.timeline.push(Event::GapUs(us));
        self.clock.advance_us(u64::from(us));
    }
}

/// Push button wired active-low
#[derive(Debug, Clone, Default)]
pub(crate) struct MockButton(Rc<Cell<bool>>);

impl MockButton {
    pub(crate) fn press(&self) {
        self.0.set(true);
    }

    pub(crate) fn release(&self) {
        self.0.set(false);
    }
}

impl InputPin for MockButton {
    fn is_high(&self) -> bool {
        !self.0.get()
    }
}

/// Button held down only while the mock clock is inside `[from_ms, until_ms)`
#[derive(Debug, Clone)]
pub(crate) struct TimedButton {
    clock: MockClock,
    from_ms: u64,
    until_ms: u64,
}

impl TimedButton {
    pub(crate) fn new(clock: MockClock, from_ms: u64, until_ms: u64) -> Self {
        Self {
            clock,
            from_ms,
            until_ms,
        }
    }
}

impl InputPin for TimedButton {
    fn is_high(&self) -> bool {
        !(self.from_ms..self.until_ms).contains(&self.clock.now_ms())
    }
}

/// Replays a fixed list of words, cycling when exhausted
#[derive(Debug, Clone)]
pub(crate) struct SequenceRng {
    values: Vec<u32>,
    next: usize,
}

impl SequenceRng {
    pub(crate) fn new(values: &[u32]) -> Self {
        Self {
            values: values.to_vec(),
            next: 0,
        }
    }
}

impl RandomSource for SequenceRng {
    fn next_u32(&mut self) -> u32 {
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MockDisplayError;

#[derive(Debug, Clone)]
pub(crate) struct MockDisplay {
    timeline: Timeline,
    failing: Rc<Cell<bool>>,
}

impl MockDisplay {
    pub(crate) fn new(timeline: Timeline) -> Self {
        Self {
            timeline,
            failing: Rc::default(),
        }
    }

    pub(crate) fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }
}

impl TextDisplay for MockDisplay {
    type Error = MockDisplayError;

    fn draw_string(&mut self, x: i32, y: i32, text: &str) -> Result<(), Self::Error> {
        if self.failing.get() {
            return Err(MockDisplayError);
        }
        self.timeline.push(Event::Text {
            x,
            y,
            text: text.to_string(),
        });
        Ok(())
    }

    fn render(&mut self) -> Result<(), Self::Error> {
        if self.failing.get() {
            return Err(MockDisplayError);
        }
        self.timeline.push(Event::Render);
        Ok(())
    }
}
