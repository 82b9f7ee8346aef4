//! ESP-IDF backend for `gpio-hal`
//!
//! Implements [`gpio_hal::PinDriver`] on top of the ESP-IDF GPIO driver and
//! [`gpio_hal::Clock`] on top of the high-resolution `esp_timer`.
//!
//! ## Supported Chips
//! - ESP32 (default): GPIO0..=GPIO39, GPIO34..=GPIO39 input-only
//! - ESP32-S3: GPIO0..=GPIO48
//! - ESP32-C6: GPIO0..=GPIO30
//!
//! ## Example
//! ```no_run
//! use gpio_hal::{Button, Output, Pin};
//! use gpio_hal_esp::{EspClock, EspGpio};
//!
//! let mut led = Pin::<EspGpio, 2, Output>::new(EspGpio);
//! led.init().unwrap();
//!
//! let mut button: Button<_, _, 0> = Button::new(Pin::new(EspGpio), EspClock);
//! button.init().unwrap();
//! button.on_press(move || led.toggle().unwrap_or_default());
//! loop {
//!     button.poll();
//! }
//! ```

#![no_std]

// Re-export esp-idf-sys for users who need direct access
pub use esp_idf_sys;

pub mod clock;
pub mod gpio;

pub use clock::EspClock;
pub use gpio::EspGpio;

#[cfg(any(
    all(feature = "esp32", feature = "esp32s3"),
    all(feature = "esp32", feature = "esp32c6"),
    all(feature = "esp32s3", feature = "esp32c6"),
))]
compile_error!("Multiple chips selected! Choose only one of: esp32, esp32s3, esp32c6");
