//! Monotonic clock from `esp_timer`

use esp_idf_sys as sys;
use gpio_hal::{Clock, Instant};

/// Microseconds since boot, from the `esp_timer` service
#[derive(Debug, Clone, Copy, Default)]
pub struct EspClock;

impl Clock for EspClock {
    fn now(&self) -> Instant {
        // SAFETY: esp_timer is started by the IDF before app_main
        let micros = unsafe { sys::esp_timer_get_time() };
        Instant::from_micros(u64::try_from(micros).unwrap_or(0))
    }
}
