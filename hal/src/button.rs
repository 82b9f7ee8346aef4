//! Debounced push-button
//!
//! The button idles high through the pin's pull-up and pressing it pulls
//! the line low: a raw `true` means released, `false` means pressed.
//!
//! Polling is caller-driven. [`Button::poll`] samples the pin, fires
//! callbacks synchronously, and keeps control for as long as the button
//! stays pressed:
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use gpio_hal::mock::{MockGpio, SimClock};
//! use gpio_hal::{Button, Duration, Instant, Pin};
//!
//! let clock = SimClock::with_step(Duration::from_millis(1));
//! let gpio = MockGpio::with_clock(clock.clone());
//! gpio.schedule(0, Instant::from_millis(10), false);
//! gpio.schedule(0, Instant::from_millis(100), true);
//!
//! let mut button: Button<_, _, 0> = Button::new(Pin::new(gpio), clock.clone());
//! button.init().unwrap();
//!
//! let presses = Rc::new(Cell::new(0));
//! let counter = presses.clone();
//! button.on_press(move || counter.set(counter.get() + 1));
//!
//! while clock.peek() < Instant::from_millis(300) {
//!     button.poll();
//! }
//! assert_eq!(presses.get(), 1);
//! assert!(!button.is_pressed());
//! ```

use alloc::boxed::Box;
use core::fmt;

use crate::error::HalResult;
use crate::gpio::PinDriver;
use crate::pin::{Input, Pin};
use crate::time::{Clock, Duration, Instant};

/// Raw level of a pressed button
const PRESSED: bool = false;
/// Raw level of a released button
const RELEASED: bool = true;

/// Zero-argument event handler
pub type Callback = Box<dyn FnMut()>;

/// Events a button reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Debounced transition to pressed
    Press,
    /// Once per hold-loop iteration while pressed
    Hold,
    /// Debounced transition to released
    Release,
}

/// Push-button on input pin `N`, debounced over `DEBOUNCE_MS` milliseconds
pub struct Button<D: PinDriver, C: Clock, const N: u8, const DEBOUNCE_MS: u64 = 50> {
    pin: Pin<D, N, Input>,
    clock: C,
    on_press: Option<Callback>,
    on_hold: Option<Callback>,
    on_release: Option<Callback>,
    /// Debounced level
    state: bool,
    /// Raw level seen by the previous step
    last_state: bool,
    /// When the raw level last changed
    last_change: Instant,
}

impl<D: PinDriver, C: Clock, const N: u8, const DEBOUNCE_MS: u64> Button<D, C, N, DEBOUNCE_MS> {
    pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(DEBOUNCE_MS);

    /// Wrap `pin`; the button starts released with no callbacks.
    pub fn new(pin: Pin<D, N, Input>, clock: C) -> Self {
        Self {
            pin,
            clock,
            on_press: None,
            on_hold: None,
            on_release: None,
            state: RELEASED,
            last_state: RELEASED,
            last_change: Instant::EPOCH,
        }
    }

    /// Configure the underlying pin
    pub fn init(&mut self) -> HalResult<()> {
        self.pin.init()
    }

    /// Register `callback` for `event`, replacing any previous one
    pub fn set_callback<F>(&mut self, event: ButtonEvent, callback: F) -> &mut Self
    where
        F: FnMut() + 'static,
    {
        *self.slot(event) = Some(Box::new(callback));
        self
    }

    pub fn clear_callback(&mut self, event: ButtonEvent) -> &mut Self {
        *self.slot(event) = None;
        self
    }

    pub fn on_press<F: FnMut() + 'static>(&mut self, callback: F) -> &mut Self {
        self.set_callback(ButtonEvent::Press, callback)
    }

    pub fn on_hold<F: FnMut() + 'static>(&mut self, callback: F) -> &mut Self {
        self.set_callback(ButtonEvent::Hold, callback)
    }

    pub fn on_release<F: FnMut() + 'static>(&mut self, callback: F) -> &mut Self {
        self.set_callback(ButtonEvent::Release, callback)
    }

    /// Debounced state: `true` while pressed
    pub fn is_pressed(&self) -> bool {
        self.state == PRESSED
    }

    /// Debounced raw level (`true` = released)
    pub fn state(&self) -> bool {
        self.state
    }

    pub fn pin(&self) -> &Pin<D, N, Input> {
        &self.pin
    }

    pub fn free(self) -> (Pin<D, N, Input>, C) {
        (self.pin, self.clock)
    }

    /// Poll once.
    ///
    /// Runs one press step. If the button is then pressed, blocks in a
    /// loop firing the hold callback and running release steps until the
    /// release is committed. The hold rate and the timer resolution during
    /// that loop depend only on how fast the pin and clock can be read.
    ///
    /// Callbacks run on the caller's stack and must not poll this button.
    pub fn poll(&mut self) {
        self.debounce(Edge::Press);
        while self.is_pressed() {
            self.fire(ButtonEvent::Hold);
            self.debounce(Edge::Release);
        }
    }

    /// Run a single press step and return.
    ///
    /// Never blocks and never fires hold or release; a release is still
    /// committed silently by a later call.
    pub fn poll_press(&mut self) {
        self.debounce(Edge::Press);
    }

    /// One debounce step, firing `edge` if it matches the committed level.
    ///
    /// Any raw change restarts the timer. A new level is committed once the
    /// raw level has been stable for more than `DEBOUNCE_MS` whole
    /// milliseconds. A committing step returns without recording the raw
    /// sample; since a commit needs an unchanged sample, the recorded one
    /// already matches it.
    fn debounce(&mut self, edge: Edge) {
        let reading = self.pin.get();
        let now = self.clock.now();

        if reading != self.last_state {
            self.last_change = now;
        }

        let elapsed = now - self.last_change;
        if elapsed.as_millis() > DEBOUNCE_MS && reading != self.state {
            self.state = reading;
            log::trace!("gpio{}: debounced to {} after {}", N, reading, elapsed);
            if reading == edge.level() {
                self.fire(edge.event());
            }
            return;
        }

        self.last_state = reading;
    }

    fn fire(&mut self, event: ButtonEvent) {
        if let Some(callback) = self.slot(event).as_mut() {
            callback();
        }
    }

    fn slot(&mut self, event: ButtonEvent) -> &mut Option<Callback> {
        match event {
            ButtonEvent::Press => &mut self.on_press,
            ButtonEvent::Hold => &mut self.on_hold,
            ButtonEvent::Release => &mut self.on_release,
        }
    }
}

/// Transition a debounce step watches for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Press,
    Release,
}

impl Edge {
    /// Raw level the button settles at after this edge
    const fn level(self) -> bool {
        match self {
            Edge::Press => PRESSED,
            Edge::Release => RELEASED,
        }
    }

    const fn event(self) -> ButtonEvent {
        match self {
            Edge::Press => ButtonEvent::Press,
            Edge::Release => ButtonEvent::Release,
        }
    }
}

impl<D: PinDriver, C: Clock, const N: u8, const DEBOUNCE_MS: u64> fmt::Debug
    for Button<D, C, N, DEBOUNCE_MS>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("pin", &N)
            .field("debounce", &Self::DEBOUNCE_DELAY)
            .field("state", &self.state)
            .field("last_state", &self.last_state)
            .field("last_change", &self.last_change)
            .field("on_press", &self.on_press.is_some())
            .field("on_hold", &self.on_hold.is_some())
            .field("on_release", &self.on_release.is_some())
            .finish()
    }
}
