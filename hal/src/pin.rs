//! Typed GPIO pins
//!
//! A [`Pin`] is bound to its pin number and direction at compile time.
//! Configuration is derived from those parameters and the driver's
//! capability table, so an invalid combination never reaches the hardware.
//!
//! Requesting output on one of the chip's input-only pins is rejected
//! when the program is built:
//!
//! ```compile_fail,E0080
//! use gpio_hal::mock::MockGpio;
//! use gpio_hal::pin::{Output, Pin};
//!
//! // GPIO34 has no output driver on the ESP32
//! let led = Pin::<MockGpio, 34, Output>::new(MockGpio::new());
//! ```
//!
//! So is a pin number the chip does not have, whatever the direction:
//!
//! ```compile_fail,E0080
//! use gpio_hal::mock::MockGpio;
//! use gpio_hal::pin::{Input, Pin};
//!
//! let sensor = Pin::<MockGpio, 40, Input>::new(MockGpio::new());
//! ```
//!
//! The same pin is fine as an input:
//!
//! ```
//! use gpio_hal::mock::MockGpio;
//! use gpio_hal::pin::{Input, Output, Pin};
//!
//! let sensor = Pin::<MockGpio, 34, Input>::new(MockGpio::new());
//! let led = Pin::<MockGpio, 2, Output>::new(MockGpio::new());
//! assert!(sensor.is_input_only());
//! assert!(!led.is_input_only());
//! ```

use core::marker::PhantomData;

use crate::error::{HalError, HalResult};
use crate::gpio::{is_input_only, Direction, Level, PinConfig, PinDriver};

mod sealed {
    pub trait Sealed {}
}

/// Pin direction marker
pub trait Mode: sealed::Sealed {
    const DIRECTION: Direction;
}

/// Input pin
#[derive(Debug, Clone, Copy)]
pub struct Input;

/// Output pin, optionally driving the inverse of the logical level
#[derive(Debug, Clone, Copy)]
pub struct Output<const INVERTED: bool = false>;

impl sealed::Sealed for Input {}
impl<const INVERTED: bool> sealed::Sealed for Output<INVERTED> {}

impl Mode for Input {
    const DIRECTION: Direction = Direction::Input;
}

impl<const INVERTED: bool> Mode for Output<INVERTED> {
    const DIRECTION: Direction = Direction::InputOutput;
}

/// GPIO pin `N` in mode `M`, accessed through driver `D`
#[derive(Debug)]
pub struct Pin<D: PinDriver, const N: u8, M: Mode = Input> {
    driver: D,
    _mode: PhantomData<M>,
}

impl<D: PinDriver, const N: u8, M: Mode> Pin<D, N, M> {
    const IN_RANGE: () = assert!(N <= D::MAX_PIN, "pin number out of range for this chip");

    const OUTPUT_CAPABLE: () = assert!(
        !(matches!(M::DIRECTION, Direction::InputOutput) && is_input_only(D::INPUT_ONLY, N)),
        "pin is input-only and cannot be used as an output"
    );

    /// Configuration applied by `init`
    pub const CONFIG: PinConfig =
        PinConfig::derive(M::DIRECTION, is_input_only(D::INPUT_ONLY, N));

    /// Bind pin `N` to `driver`. Nothing touches the hardware until `init`.
    pub fn new(driver: D) -> Self {
        let () = Self::IN_RANGE;
        let () = Self::OUTPUT_CAPABLE;
        Self {
            driver,
            _mode: PhantomData,
        }
    }

    pub const fn number(&self) -> u8 {
        N
    }

    pub const fn config(&self) -> PinConfig {
        Self::CONFIG
    }

    pub const fn is_input_only(&self) -> bool {
        is_input_only(D::INPUT_ONLY, N)
    }

    /// Current physical level
    #[inline]
    pub fn get(&self) -> bool {
        self.driver.read_level(N).into()
    }

    /// Release the driver
    pub fn free(self) -> D {
        self.driver
    }

    fn configure(&mut self) -> HalResult<()> {
        log::debug!("gpio{}: configuring {:?}", N, Self::CONFIG);
        self.driver.configure(N, &Self::CONFIG)
    }
}

impl<D: PinDriver, const N: u8> Pin<D, N, Input> {
    /// Apply the pin configuration
    pub fn init(&mut self) -> HalResult<()> {
        self.configure()
    }
}

impl<D: PinDriver, const N: u8, const INVERTED: bool> Pin<D, N, Output<INVERTED>> {
    /// Apply the pin configuration, then drive the idle level.
    ///
    /// The idle logical level equals `INVERTED`, which leaves the line
    /// physically low for both polarities.
    pub fn init(&mut self) -> HalResult<()> {
        self.configure()?;
        self.set(INVERTED)
    }

    /// Drive the logical level `state`
    #[inline]
    pub fn set(&mut self, state: bool) -> HalResult<()> {
        self.driver.write_level(N, Level::from(state != INVERTED))
    }

    /// Invert the output relative to the level read back from the pin
    pub fn toggle(&mut self) -> HalResult<()> {
        let level = !self.driver.read_level(N);
        self.driver.write_level(N, level)
    }
}

// embedded-hal speaks electrical levels, so these bypass `INVERTED`.

impl<D: PinDriver, const N: u8, M: Mode> embedded_hal::digital::ErrorType for Pin<D, N, M> {
    type Error = HalError;
}

impl<D: PinDriver, const N: u8, M: Mode> embedded_hal::digital::InputPin for Pin<D, N, M> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.get())
    }
}

impl<D: PinDriver, const N: u8, const INVERTED: bool> embedded_hal::digital::OutputPin
    for Pin<D, N, Output<INVERTED>>
{
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.driver.write_level(N, Level::Low)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.driver.write_level(N, Level::High)
    }
}

impl<D: PinDriver, const N: u8, const INVERTED: bool> embedded_hal::digital::StatefulOutputPin
    for Pin<D, N, Output<INVERTED>>
{
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.get())
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.get())
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        Pin::toggle(self)
    }
}
