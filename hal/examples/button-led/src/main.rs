//! Button/LED demo
//!
//! The BOOT button on GPIO0 toggles the LED on GPIO2 on every press.
//! Holding the button keeps `poll` busy until it is released, so keep
//! holds short or the task watchdog will complain.

use std::thread;
use std::time::Duration;

use gpio_hal::{Button, Output, Pin};
use gpio_hal_esp::{EspClock, EspGpio};

const BUTTON: u8 = 0;
const LED: u8 = 2;

fn main() {
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    let mut led = Pin::<EspGpio, LED, Output>::new(EspGpio);
    if let Err(e) = led.init() {
        log::error!("LED on GPIO{} failed to initialise: {}", LED, e);
        return;
    }

    let mut button: Button<EspGpio, EspClock, BUTTON> = Button::new(Pin::new(EspGpio), EspClock);
    if let Err(e) = button.init() {
        log::error!("button on GPIO{} failed to initialise: {}", BUTTON, e);
        return;
    }

    button
        .on_press(move || {
            if let Err(e) = led.toggle() {
                log::warn!("LED toggle failed: {}", e);
            }
        })
        .on_release(|| log::info!("released"));

    log::info!("polling button on GPIO{}", BUTTON);
    loop {
        button.poll();
        thread::sleep(Duration::from_millis(5));
    }
}
