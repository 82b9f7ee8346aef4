//! Button scenarios against the simulated driver
//! These tests run on x86 host with std, polling the way an application loop would

use std::cell::Cell;
use std::rc::Rc;

use gpio_hal::mock::{MockGpio, SimClock};
use gpio_hal::{Button, Duration, Instant, Pin};

const BUTTON: u8 = 0;

struct Rig {
    clock: SimClock,
    gpio: MockGpio,
    button: Button<MockGpio, SimClock, BUTTON>,
    presses: Rc<Cell<u32>>,
    holds: Rc<Cell<u32>>,
    releases: Rc<Cell<u32>>,
}

/// Button with counting callbacks; every `now()` call costs `step_ms`.
fn rig(step_ms: u64) -> Rig {
    let clock = SimClock::with_step(Duration::from_millis(step_ms));
    let gpio = MockGpio::with_clock(clock.clone());
    let mut button = Button::new(Pin::new(gpio.clone()), clock.clone());
    button.init().unwrap();

    let presses = Rc::new(Cell::new(0));
    let holds = Rc::new(Cell::new(0));
    let releases = Rc::new(Cell::new(0));
    {
        let (p, h, r) = (presses.clone(), holds.clone(), releases.clone());
        button
            .on_press(move || p.set(p.get() + 1))
            .on_hold(move || h.set(h.get() + 1))
            .on_release(move || r.set(r.get() + 1));
    }

    Rig {
        clock,
        gpio,
        button,
        presses,
        holds,
        releases,
    }
}

impl Rig {
    fn poll_until(&mut self, ms: u64) {
        while self.clock.peek() < Instant::from_millis(ms) {
            self.button.poll();
        }
    }

    fn press(&self, from_ms: u64, to_ms: u64) {
        self.gpio.schedule(BUTTON, Instant::from_millis(from_ms), false);
        self.gpio.schedule(BUTTON, Instant::from_millis(to_ms), true);
    }
}

#[test]
fn test_idle_button_reads_released() {
    let mut rig = rig(1);
    rig.poll_until(500);
    assert!(!rig.button.is_pressed());
    assert_eq!(rig.presses.get(), 0);
    assert_eq!(rig.holds.get(), 0);
    assert_eq!(rig.releases.get(), 0);
}

#[test]
fn test_press_held_60ms_fires_once() {
    let mut rig = rig(1);
    rig.press(100, 160);
    rig.poll_until(400);
    assert_eq!(rig.presses.get(), 1);
    assert_eq!(rig.releases.get(), 1);
}

#[test]
fn test_press_without_release_fires_once() {
    let clock = SimClock::with_step(Duration::from_millis(1));
    let gpio = MockGpio::with_clock(clock.clone());
    gpio.schedule(BUTTON, Instant::from_millis(100), false);

    let mut button: Button<_, _, BUTTON> = Button::new(Pin::new(gpio), clock.clone());
    button.init().unwrap();
    let presses = Rc::new(Cell::new(0));
    let p = presses.clone();
    button.on_press(move || p.set(p.get() + 1));

    while clock.peek() < Instant::from_millis(400) {
        button.poll_press();
    }
    assert_eq!(presses.get(), 1);
    assert!(button.is_pressed());
}

#[test]
fn test_bounce_shorter_than_delay_is_ignored() {
    let mut rig = rig(1);
    rig.press(100, 130);
    rig.poll_until(400);
    assert_eq!(rig.presses.get(), 0);
    assert_eq!(rig.holds.get(), 0);
    assert!(rig.button.state());
}

#[test]
fn test_hold_fires_every_iteration_until_release() {
    let mut rig = rig(10);
    // press seen at 100ms, committed at 160ms, released 200ms later
    rig.press(100, 360);

    let releases = rig.releases.clone();
    let holds_while_down = Rc::new(Cell::new(0));
    let clock = rig.clock.clone();
    let h = holds_while_down.clone();
    let total = rig.holds.clone();
    rig.button.on_hold(move || {
        total.set(total.get() + 1);
        assert_eq!(releases.get(), 0, "release fired during hold");
        if clock.peek() < Instant::from_millis(360) {
            h.set(h.get() + 1);
        }
    });

    rig.poll_until(1_000);

    let held = holds_while_down.get();
    assert!((18..=21).contains(&held), "holds while down: {held}");
    assert!(rig.holds.get() >= held);
    assert_eq!(rig.presses.get(), 1);
    assert_eq!(rig.releases.get(), 1);
}

#[test]
fn test_release_after_hold_fires_once() {
    let mut rig = rig(1);
    rig.press(100, 300);
    rig.poll_until(1_000);
    assert_eq!(rig.presses.get(), 1);
    assert_eq!(rig.releases.get(), 1);
    assert!(!rig.button.is_pressed());
    assert!(rig.button.state());
}

#[test]
fn test_poll_blocks_until_release_is_committed() {
    let mut rig = rig(1);
    rig.press(10, 200);

    // first call that sees the committed press spins through the hold
    while rig.presses.get() == 0 {
        rig.button.poll();
    }
    assert!(!rig.button.is_pressed());
    assert!(rig.clock.peek() > Instant::from_millis(250));
    assert_eq!(rig.releases.get(), 1);
}

#[test]
fn test_repeated_presses() {
    let mut rig = rig(1);
    rig.press(100, 200);
    rig.press(400, 500);
    rig.press(800, 900);
    rig.poll_until(1_200);
    assert_eq!(rig.presses.get(), 3);
    assert_eq!(rig.releases.get(), 3);
}

#[test]
fn test_stable_segments_settle_to_last_level() {
    let clock = SimClock::new();
    let gpio = MockGpio::with_clock(clock.clone());
    let mut button: Button<_, _, BUTTON> = Button::new(Pin::new(gpio.clone()), clock.clone());
    button.init().unwrap();

    let segments = [
        (false, 60),
        (true, 75),
        (true, 51),
        (false, 200),
        (true, 52),
        (false, 90),
    ];
    for (level, hold_ms) in segments {
        gpio.set_level(BUTTON, level);
        let until = clock.peek() + Duration::from_millis(hold_ms);
        while clock.peek() < until {
            button.poll_press();
            clock.advance(Duration::from_millis(1));
        }
        assert_eq!(button.state(), level);
    }
}

#[test]
fn test_buttons_keep_independent_state() {
    let clock = SimClock::with_step(Duration::from_millis(1));
    let gpio = MockGpio::with_clock(clock.clone());
    let mut a: Button<_, _, 4> = Button::new(Pin::new(gpio.clone()), clock.clone());
    let mut b: Button<_, _, 5> = Button::new(Pin::new(gpio.clone()), clock.clone());
    a.init().unwrap();
    b.init().unwrap();

    gpio.schedule(4, Instant::from_millis(10), false);
    while clock.peek() < Instant::from_millis(200) {
        a.poll_press();
        b.poll_press();
    }
    assert!(a.is_pressed());
    assert!(!b.is_pressed());
}

#[test]
fn test_blocking_poll_without_callbacks_matches_with_callbacks() {
    let mut with_callbacks = rig(1);

    let bare_clock = SimClock::with_step(Duration::from_millis(1));
    let bare_gpio = MockGpio::with_clock(bare_clock.clone());
    let mut bare: Button<_, _, BUTTON> =
        Button::new(Pin::new(bare_gpio.clone()), bare_clock.clone());
    bare.init().unwrap();

    // held, bounced, held again
    for (from, to) in [(100, 300), (500, 520), (700, 760)] {
        with_callbacks.press(from, to);
        bare_gpio.schedule(BUTTON, Instant::from_millis(from), false);
        bare_gpio.schedule(BUTTON, Instant::from_millis(to), true);
    }

    for until in [200, 400, 600, 730, 1_000] {
        with_callbacks.poll_until(until);
        while bare_clock.peek() < Instant::from_millis(until) {
            bare.poll();
        }
        assert_eq!(with_callbacks.button.state(), bare.state(), "at {until}ms");
        assert_eq!(with_callbacks.clock.peek(), bare_clock.peek());
    }

    assert!(bare.state());
    assert_eq!(with_callbacks.presses.get(), 2);
    assert_eq!(with_callbacks.releases.get(), 2);
    assert!(with_callbacks.holds.get() > 0);
}
