//! Top-level control loop
//!
//! One `step()` is one pass of the board's main loop: an idle twinkle,
//! the two button polls and the sensor refresh check. Everything blocks;
//! the loop never yields while an animation is running.

use aquamatico_hal::{Clock, Delay, InputPin, RandomSource, SerialEngine};

use crate::animation::AnimationEngine;
use crate::config::TimingConfig;
use crate::led::{LedError, LedMatrix};
use crate::pixel::LED_COUNT;
use crate::screen;
use crate::sensor::SensorReading;
use crate::traits::TextDisplay;

/// Cooldown after a button-triggered animation
pub const DEFAULT_DEBOUNCE_MS: u32 = 500;

/// Minimum time between sensor display refreshes
pub const DEFAULT_REFRESH_INTERVAL_MS: u32 = 5000;

/// Control loop errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlError<DE> {
    /// LED buffer access failed
    Led(LedError),
    /// Display bus failed during a refresh
    Display(DE),
}

impl<DE> From<LedError> for ControlError<DE> {
    fn from(e: LedError) -> Self {
        ControlError::Led(e)
    }
}

/// Gate that opens at most once per interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RefreshTimer {
    last_update_ms: u64,
    interval_ms: u32,
}

impl RefreshTimer {
    /// Create a timer whose first window starts at time zero
    pub const fn new(interval_ms: u32) -> Self {
        Self {
            last_update_ms: 0,
            interval_ms,
        }
    }

    /// Timestamp of the last refresh
    pub fn last_update_ms(&self) -> u64 {
        self.last_update_ms
    }

    /// Returns true and restarts the window if `interval_ms` has elapsed
    pub fn due(&mut self, now_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_update_ms) >= u64::from(self.interval_ms) {
            self.last_update_ms = now_ms;
            true
        } else {
            false
        }
    }
}

/// Push button wired to ground with a pull-up
pub struct Button<P> {
    pin: P,
}

impl<P: InputPin> Button<P> {
    /// Create a new button on an input pin
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Point-in-time read; the button reads low while held
    pub fn is_pressed(&self) -> bool {
        self.pin.is_low()
    }
}

/// The two front-panel buttons
pub struct Buttons<P> {
    /// Triggers the green dot drop
    pub a: Button<P>,
    /// Triggers the row blink
    pub b: Button<P>,
}

/// What one loop pass did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cycle {
    /// LED flashed by the idle twinkle
    pub twinkled: usize,
    /// Button A animation ran
    pub dropped: bool,
    /// Button B animation ran
    pub blinked: bool,
    /// New reading shown on the display, if the refresh was due
    pub refreshed: Option<SensorReading>,
}

/// Main loop state
pub struct ControlLoop<E, D, R, P, C, T> {
    leds: LedMatrix<E, D>,
    animations: AnimationEngine<D>,
    rng: R,
    buttons: Buttons<P>,
    clock: C,
    display: T,
    refresh: RefreshTimer,
    debounce_ms: u32,
}

impl<E, D, R, P, C, T> ControlLoop<E, D, R, P, C, T>
where
    E: SerialEngine,
    D: Delay,
    R: RandomSource,
    P: InputPin,
    C: Clock,
    T: TextDisplay,
{
    /// Create a new control loop
    pub fn new(
        leds: LedMatrix<E, D>,
        animations: AnimationEngine<D>,
        rng: R,
        buttons: Buttons<P>,
        clock: C,
        display: T,
        timing: &TimingConfig,
    ) -> Self {
        Self {
            leds,
            animations,
            rng,
            buttons,
            clock,
            display,
            refresh: RefreshTimer::new(timing.refresh_interval_ms),
            debounce_ms: timing.debounce_ms,
        }
    }

    /// Show the background frame
    pub fn start(&mut self) {
        self.animations.fill_background(&mut self.leds);
    }

    /// Run one loop pass
    ///
    /// A display failure is reported after the LED work of the pass is
    /// done; the refresh window still restarts so a dead bus is not
    /// retried every pass.
    pub fn step(&mut self) -> Result<Cycle, ControlError<T::Error>> {
        let twinkled = self.rng.below(LED_COUNT as u32) as usize;
        self.animations.idle_twinkle(&mut self.leds, twinkled)?;

        let dropped = self.buttons.a.is_pressed();
        if dropped {
            self.animations.drop_green_dot(&mut self.leds)?;
            self.animations.hold(self.debounce_ms);
        }

        let blinked = self.buttons.b.is_pressed();
        if blinked {
            self.animations.blink_last_two_rows(&mut self.leds)?;
            self.animations.hold(self.debounce_ms);
        }

        let refreshed = if self.refresh.due(self.clock.now_ms()) {
            let reading = SensorReading::simulate(&mut self.rng);
            screen::show_reading(&mut self.display, &reading).map_err(ControlError::Display)?;
            Some(reading)
        } else {
            None
        };

        Ok(Cycle {
            twinkled,
            dropped,
            blinked,
            refreshed,
        })
    }

    /// LED matrix state
    pub fn leds(&self) -> &LedMatrix<E, D> {
        &self.leds
    }

    /// Refresh gate state
    pub fn refresh_timer(&self) -> &RefreshTimer {
        &self.refresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::colors;
    use crate::testing::{
        Event, MockButton, MockClock, MockDelay, MockDisplay, MockDisplayError, MockEngine,
        SequenceRng, TimedButton, Timeline,
    };

    type TestLoop =
        ControlLoop<MockEngine, MockDelay, SequenceRng, MockButton, MockClock, MockDisplay>;

    struct Rig {
        timeline: Timeline,
        button_a: MockButton,
        button_b: MockButton,
        display: MockDisplay,
        control: TestLoop,
    }

    fn rig(rng: &[u32], timing: TimingConfig) -> Rig {
        let timeline = Timeline::default();
        let clock = MockClock::default();
        let delay = MockDelay::new(timeline.clone(), clock.clone());
        let leds = LedMatrix::new(
            MockEngine::new(timeline.clone()),
            delay.clone(),
            timing.reset_gap_us,
        );
        let animations = AnimationEngine::new(delay, timing.hold_ms);
        let button_a = MockButton::default();
        let button_b = MockButton::default();
        let display = MockDisplay::new(timeline.clone());

        let control = ControlLoop::new(
            leds,
            animations,
            SequenceRng::new(rng),
            Buttons {
                a: Button::new(button_a.clone()),
                b: Button::new(button_b.clone()),
            },
            clock,
            display.clone(),
            &timing,
        );

        Rig {
            timeline,
            button_a,
            button_b,
            display,
            control,
        }
    }

    type TimedLoop =
        ControlLoop<MockEngine, MockDelay, SequenceRng, TimedButton, MockClock, MockDisplay>;

    /// Loop whose buttons follow the mock clock, already started
    fn timed_loop(press_a_ms: (u64, u64), press_b_ms: (u64, u64)) -> TimedLoop {
        let timeline = Timeline::default();
        let clock = MockClock::default();
        let delay = MockDelay::new(timeline.clone(), clock.clone());
        let timing = TimingConfig::default();
        let leds = LedMatrix::new(
            MockEngine::new(timeline.clone()),
            delay.clone(),
            timing.reset_gap_us,
        );
        let buttons = Buttons {
            a: Button::new(TimedButton::new(clock.clone(), press_a_ms.0, press_a_ms.1)),
            b: Button::new(TimedButton::new(clock.clone(), press_b_ms.0, press_b_ms.1)),
        };

        let mut control = ControlLoop::new(
            leds,
            AnimationEngine::new(delay, timing.hold_ms),
            SequenceRng::new(&[0]),
            buttons,
            clock,
            MockDisplay::new(timeline),
            &timing,
        );
        control.start();
        control
    }

    #[test]
    fn test_press_released_during_twinkle_is_missed() {
        // Both buttons let go before the 4000 ms twinkle ends
        let mut control = timed_loop((0, 3000), (0, 3999));

        let cycle = control.step().unwrap();
        assert!(!cycle.dropped);
        assert!(!cycle.blinked);
    }

    #[test]
    fn test_buttons_polled_after_twinkle() {
        // Not pressed at the start of the pass, pressed once the twinkle is over
        let mut control = timed_loop((4000, u64::MAX), (0, 0));

        let cycle = control.step().unwrap();
        assert!(cycle.dropped);
        assert!(!cycle.blinked);
    }

    #[test]
    fn test_button_b_polled_after_drop() {
        // B goes down while the green dot is falling
        let mut control = timed_loop((4000, 4001), (6000, u64::MAX));

        let cycle = control.step().unwrap();
        assert!(cycle.dropped);
        assert!(cycle.blinked);
    }

    #[test]
    fn test_refresh_timer_gates_interval() {
        let mut timer = RefreshTimer::new(5000);
        assert!(!timer.due(4999));
        assert!(timer.due(5000));
        assert_eq!(timer.last_update_ms(), 5000);
        assert!(!timer.due(9999));
        assert!(timer.due(10_000));
    }

    #[test]
    fn test_button_is_active_low() {
        let pin = MockButton::default();
        let button = Button::new(pin.clone());
        assert!(!button.is_pressed());
        pin.press();
        assert!(button.is_pressed());
        pin.release();
        assert!(!button.is_pressed());
    }

    #[test]
    fn test_start_shows_background() {
        let mut rig = rig(&[0], TimingConfig::default());
        rig.control.start();

        let frames = rig.timeline.frames();
        assert_eq!(frames.len(), 1);
        assert!(frames[0].iter().all(|p| *p == colors::BACKGROUND));
        assert!(rig.timeline.holds().is_empty());
    }

    #[test]
    fn test_idle_step_twinkles_random_led() {
        let mut rig = rig(&[7], TimingConfig::default());
        rig.control.start();
        rig.timeline.reset();

        let cycle = rig.control.step().unwrap();

        assert_eq!(
            cycle,
            Cycle {
                twinkled: 7,
                dropped: false,
                blinked: false,
                refreshed: None,
            }
        );
        let frames = rig.timeline.frames();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0][7], colors::ACCENT);
        assert_eq!(frames[1][7], colors::BACKGROUND);
        assert_eq!(rig.timeline.holds(), vec![2000, 2000]);
        assert!(rig.timeline.texts().is_empty());
    }

    #[test]
    fn test_twinkle_index_wraps_into_matrix() {
        let mut rig = rig(&[25 + 3], TimingConfig::default());
        rig.control.start();

        assert_eq!(rig.control.step().unwrap().twinkled, 3);
    }

    #[test]
    fn test_button_a_drops_then_debounces() {
        let mut rig = rig(&[0], TimingConfig::default());
        rig.control.start();
        rig.timeline.reset();
        rig.button_a.press();

        let cycle = rig.control.step().unwrap();

        assert!(cycle.dropped);
        assert!(!cycle.blinked);
        // twinkle (2) + drop (5) + debounce
        assert_eq!(
            rig.timeline.holds(),
            vec![2000, 2000, 2000, 2000, 2000, 2000, 2000, 500]
        );
        assert!(rig
            .control
            .leds()
            .buffer()
            .pixels()
            .iter()
            .all(|p| *p == colors::BACKGROUND));
    }

    #[test]
    fn test_button_b_blinks_then_debounces() {
        let mut rig = rig(&[0], TimingConfig::default());
        rig.control.start();
        rig.timeline.reset();
        rig.button_b.press();

        let cycle = rig.control.step().unwrap();

        assert!(!cycle.dropped);
        assert!(cycle.blinked);
        // twinkle (2) + blink (3) + debounce
        assert_eq!(
            rig.timeline.holds(),
            vec![2000, 2000, 2000, 2000, 2000, 500]
        );
    }

    #[test]
    fn test_both_buttons_run_a_then_b() {
        let mut rig = rig(&[0], TimingConfig::default());
        rig.control.start();
        rig.timeline.reset();
        rig.button_a.press();
        rig.button_b.press();

        let cycle = rig.control.step().unwrap();
        assert!(cycle.dropped && cycle.blinked);

        let holds = rig.timeline.holds();
        assert_eq!(holds.len(), 2 + 5 + 1 + 3 + 1);
        assert_eq!(holds[7], 500);
        assert_eq!(holds[11], 500);
    }

    #[test]
    fn test_refresh_at_most_once_per_interval() {
        let mut rig = rig(&[0], TimingConfig::default());
        rig.control.start();

        // Each idle pass holds 4000 ms, so the refresh lands on every second pass
        let refreshed: Vec<bool> = (0..4)
            .map(|_| rig.control.step().unwrap().refreshed.is_some())
            .collect();
        assert_eq!(refreshed, vec![false, true, false, true]);
        assert_eq!(rig.control.refresh_timer().last_update_ms(), 16_000);

        let renders = rig
            .timeline
            .events()
            .iter()
            .filter(|e| **e == Event::Render)
            .count();
        assert_eq!(renders, 2);
    }

    #[test]
    fn test_refresh_draws_reading() {
        let mut rig = rig(&[0], TimingConfig::default());
        rig.control.start();
        rig.control.step().unwrap();
        rig.timeline.reset();

        let cycle = rig.control.step().unwrap();

        let reading = cycle.refreshed.unwrap();
        assert_eq!(reading.temperature_x10, 270);
        assert_eq!(reading.ph_x10, 60);
        assert_eq!(reading.water_level, 95);

        let texts = rig.timeline.texts();
        assert_eq!(texts.len(), 9);
        assert_eq!(texts[4].2, " 27.0 C");
        assert_eq!(texts[6].2, " 6.0");
        assert_eq!(texts[8].2, " 95");
        // Display work comes after the LED work of the pass
        assert_eq!(rig.timeline.events().last(), Some(&Event::Render));
    }

    #[test]
    fn test_display_failure_does_not_stop_leds() {
        let mut rig = rig(&[0], TimingConfig::default());
        rig.control.start();
        rig.display.set_failing(true);

        assert!(rig.control.step().is_ok());
        assert_eq!(
            rig.control.step(),
            Err(ControlError::Display(MockDisplayError))
        );
        // Window restarted; next pass is quiet and still animates
        rig.timeline.reset();
        assert_eq!(rig.control.step().unwrap().refreshed, None);
        assert_eq!(rig.timeline.frames().len(), 2);
    }

    #[test]
    fn test_custom_timing() {
        let timing = TimingConfig {
            hold_ms: 100,
            debounce_ms: 50,
            refresh_interval_ms: 150,
            ..TimingConfig::default()
        };
        let mut rig = rig(&[0], timing);
        rig.control.start();
        rig.button_a.press();

        let cycle = rig.control.step().unwrap();
        assert!(cycle.refreshed.is_some());
        assert_eq!(rig.timeline.holds().last(), Some(&50));
    }
}
