//! Simulated pin driver and clock for host tests
//!
//! [`MockGpio`] models the classic ESP32 pin map. Undriven pins idle high
//! once configured with a pull-up, low otherwise. Levels can be forced
//! immediately or scheduled against a [`SimClock`], which lets a blocking
//! [`crate::button::Button::poll`] observe presses and releases while it
//! spins.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::error::{HalError, HalResult};
use crate::gpio::{is_input_only, Level, PinConfig, PinDriver, ESP32_INPUT_ONLY};
use crate::time::{Clock, Duration, Instant};

/// Manually driven clock
///
/// Every call to [`Clock::now`] returns the current time and then moves
/// it forward by the configured step, standing in for the time one
/// iteration of the caller's loop takes.
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    inner: Rc<SimClockInner>,
}

#[derive(Debug, Default)]
struct SimClockInner {
    now: Cell<u64>,
    step: Cell<u64>,
}

impl SimClock {
    /// Clock at the epoch that only moves when told to
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock at the epoch that advances by `step` per `now()` call
    pub fn with_step(step: Duration) -> Self {
        let clock = Self::new();
        clock.set_step(step);
        clock
    }

    pub fn set_step(&self, step: Duration) {
        self.inner.step.set(step.as_micros());
    }

    pub fn advance(&self, by: Duration) {
        let now = self.inner.now.get();
        self.inner.now.set(now.saturating_add(by.as_micros()));
    }

    pub fn set(&self, at: Instant) {
        self.inner.now.set(at.as_micros());
    }

    /// Current time, without stepping
    pub fn peek(&self) -> Instant {
        Instant::from_micros(self.inner.now.get())
    }
}

impl Clock for SimClock {
    fn now(&self) -> Instant {
        let now = self.inner.now.get();
        self.inner.now.set(now.saturating_add(self.inner.step.get()));
        Instant::from_micros(now)
    }
}

#[derive(Debug, Default)]
struct PinState {
    config: Option<PinConfig>,
    level: Option<Level>,
    schedule: Vec<(Instant, Level)>,
    writes: Vec<Level>,
    reads: usize,
}

#[derive(Debug, Default)]
struct MockState {
    pins: BTreeMap<u8, PinState>,
    configure_error: Option<HalError>,
    write_error: Option<HalError>,
}

/// In-memory pin driver, cheap to clone and share between pins
#[derive(Debug, Clone, Default)]
pub struct MockGpio {
    state: Rc<RefCell<MockState>>,
    clock: Option<SimClock>,
}

impl MockGpio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Driver whose scheduled levels follow `clock`
    pub fn with_clock(clock: SimClock) -> Self {
        Self {
            state: Rc::default(),
            clock: Some(clock),
        }
    }

    /// Force the level seen on `pin` from now on
    pub fn set_level(&self, pin: u8, level: bool) {
        let mut state = self.state.borrow_mut();
        let pin = state.pins.entry(pin).or_default();
        pin.level = Some(level.into());
        pin.schedule.clear();
    }

    /// Make `pin` read `level` from `at` onwards.
    ///
    /// Needs a driver created with [`MockGpio::with_clock`].
    pub fn schedule(&self, pin: u8, at: Instant, level: bool) {
        let mut state = self.state.borrow_mut();
        let pin = state.pins.entry(pin).or_default();
        pin.schedule.push((at, level.into()));
        pin.schedule.sort_by_key(|(at, _)| *at);
    }

    /// Fail the next `configure` call with `error`
    pub fn fail_next_configure(&self, error: HalError) {
        self.state.borrow_mut().configure_error = Some(error);
    }

    /// Fail the next `write_level` call with `error`
    pub fn fail_next_write(&self, error: HalError) {
        self.state.borrow_mut().write_error = Some(error);
    }

    /// Last configuration applied to `pin`
    pub fn config_of(&self, pin: u8) -> Option<PinConfig> {
        self.state.borrow().pins.get(&pin).and_then(|p| p.config)
    }

    /// Every level written to `pin`, oldest first
    pub fn writes(&self, pin: u8) -> Vec<Level> {
        self.state
            .borrow()
            .pins
            .get(&pin)
            .map(|p| p.writes.clone())
            .unwrap_or_default()
    }

    /// Number of times `pin` has been sampled
    pub fn reads(&self, pin: u8) -> usize {
        self.state.borrow().pins.get(&pin).map_or(0, |p| p.reads)
    }
}

impl PinDriver for MockGpio {
    const MAX_PIN: u8 = 39;
    const INPUT_ONLY: &'static [u8] = ESP32_INPUT_ONLY;

    fn configure(&mut self, pin: u8, config: &PinConfig) -> HalResult<()> {
        let mut state = self.state.borrow_mut();
        if let Some(error) = state.configure_error.take() {
            return Err(error);
        }
        let no_resistors = is_input_only(Self::INPUT_ONLY, pin);
        if pin > Self::MAX_PIN || (no_resistors && (config.pull_up || config.pull_down)) {
            return Err(HalError::ConfigurationError);
        }
        state.pins.entry(pin).or_default().config = Some(*config);
        Ok(())
    }

    fn read_level(&self, pin: u8) -> Level {
        let now = self.clock.as_ref().map(SimClock::peek);
        let mut state = self.state.borrow_mut();
        let pin = state.pins.entry(pin).or_default();
        pin.reads += 1;

        let scheduled = now.and_then(|now| {
            pin.schedule
                .iter()
                .rev()
                .find(|(at, _)| *at <= now)
                .map(|(_, level)| *level)
        });

        scheduled.or(pin.level).unwrap_or(match pin.config {
            Some(config) if config.pull_up => Level::High,
            _ => Level::Low,
        })
    }

    fn write_level(&mut self, pin: u8, level: Level) -> HalResult<()> {
        let mut state = self.state.borrow_mut();
        if let Some(error) = state.write_error.take() {
            return Err(error);
        }
        let pin = state.pins.entry(pin).or_default();
        pin.level = Some(level);
        pin.writes.push(level);
        Ok(())
    }
}
