//! ESP32 GPIO driver using ESP-IDF

use esp_idf_sys as sys;
use gpio_hal::error::{HalError, HalResult};
use gpio_hal::gpio::{Direction, Level, PinConfig, PinDriver};

/// ESP-IDF GPIO driver
///
/// Stateless; every pin may hold its own copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct EspGpio;

fn check(ret: sys::esp_err_t) -> HalResult<()> {
    if ret != sys::ESP_OK as sys::esp_err_t {
        return Err(HalError::VendorError(ret));
    }
    Ok(())
}

fn mode(direction: Direction) -> sys::gpio_mode_t {
    match direction {
        Direction::Input => sys::gpio_mode_t_GPIO_MODE_INPUT,
        Direction::InputOutput => sys::gpio_mode_t_GPIO_MODE_INPUT_OUTPUT,
    }
}

impl PinDriver for EspGpio {
    #[cfg(feature = "esp32s3")]
    const MAX_PIN: u8 = 48;
    #[cfg(feature = "esp32s3")]
    const INPUT_ONLY: &'static [u8] = &[];

    #[cfg(feature = "esp32c6")]
    const MAX_PIN: u8 = 30;
    #[cfg(feature = "esp32c6")]
    const INPUT_ONLY: &'static [u8] = &[];

    #[cfg(not(any(feature = "esp32s3", feature = "esp32c6")))]
    const MAX_PIN: u8 = 39;
    #[cfg(not(any(feature = "esp32s3", feature = "esp32c6")))]
    const INPUT_ONLY: &'static [u8] = gpio_hal::gpio::ESP32_INPUT_ONLY;

    fn configure(&mut self, pin: u8, config: &PinConfig) -> HalResult<()> {
        let cfg = sys::gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: mode(config.direction),
            pull_up_en: if config.pull_up {
                sys::gpio_pullup_t_GPIO_PULLUP_ENABLE
            } else {
                sys::gpio_pullup_t_GPIO_PULLUP_DISABLE
            },
            pull_down_en: if config.pull_down {
                sys::gpio_pulldown_t_GPIO_PULLDOWN_ENABLE
            } else {
                sys::gpio_pulldown_t_GPIO_PULLDOWN_DISABLE
            },
            intr_type: sys::gpio_int_type_t_GPIO_INTR_DISABLE,
            ..Default::default()
        };

        // SAFETY: cfg outlives the call and names a single valid pin
        check(unsafe { sys::gpio_config(&cfg) })
    }

    fn read_level(&self, pin: u8) -> Level {
        // SAFETY: reading the input register has no side effects
        let level = unsafe { sys::gpio_get_level(pin as sys::gpio_num_t) };
        Level::from(level != 0)
    }

    fn write_level(&mut self, pin: u8, level: Level) -> HalResult<()> {
        let val = match level {
            Level::Low => 0,
            Level::High => 1,
        };
        // SAFETY: pin was range-checked when its `Pin` was built
        check(unsafe { sys::gpio_set_level(pin as sys::gpio_num_t, val) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpio_hal::gpio::is_input_only;

    #[test]
    fn test_capability_table() {
        for pin in EspGpio::INPUT_ONLY {
            assert!(*pin <= EspGpio::MAX_PIN);
        }
        #[cfg(not(any(feature = "esp32s3", feature = "esp32c6")))]
        {
            assert!(is_input_only(EspGpio::INPUT_ONLY, 34));
            assert!(!is_input_only(EspGpio::INPUT_ONLY, 2));
        }
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(check(sys::ESP_OK as sys::esp_err_t), Ok(()));
        assert_eq!(
            check(sys::ESP_ERR_INVALID_ARG as sys::esp_err_t),
            Err(HalError::VendorError(sys::ESP_ERR_INVALID_ARG as sys::esp_err_t))
        );
    }
}
