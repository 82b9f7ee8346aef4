//! GPIO driver abstraction
//!
//! [`PinDriver`] is the seam between the typed pins in [`crate::pin`] and a
//! vendor peripheral driver. It works on raw pin numbers; everything that
//! can be checked at compile time is checked by [`crate::pin::Pin`] instead.

use core::ops::Not;

use crate::error::HalResult;

/// GPIO pin levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Low level (0V)
    Low,
    /// High level (VCC)
    High,
}

impl From<bool> for Level {
    fn from(value: bool) -> Self {
        if value {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> bool {
        matches!(level, Level::High)
    }
}

impl Not for Level {
    type Output = Level;

    fn not(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

/// Pin direction as seen by the peripheral
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Input only
    Input,
    /// Output with the input buffer kept enabled, so the driven level reads back
    InputOutput,
}

/// Complete configuration applied to one pin by [`PinDriver::configure`].
/// Pin interrupts are always left disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    pub direction: Direction,
    pub pull_up: bool,
    pub pull_down: bool,
}

impl PinConfig {
    /// Configuration used by [`crate::pin::Pin`].
    ///
    /// Pull-up is enabled on every pad that has one, so an unconnected
    /// button idles high. Input-only pads have no internal resistors.
    pub const fn derive(direction: Direction, input_only: bool) -> Self {
        Self {
            direction,
            pull_up: !input_only,
            pull_down: false,
        }
    }
}

/// Vendor pin driver
///
/// Implementations describe the chip's pin capabilities through the
/// associated constants, which [`crate::pin::Pin`] checks at compile time.
pub trait PinDriver {
    /// Highest valid pin number
    const MAX_PIN: u8;

    /// Pins that have no output driver
    const INPUT_ONLY: &'static [u8];

    /// Apply `config` to `pin`
    fn configure(&mut self, pin: u8, config: &PinConfig) -> HalResult<()>;

    /// Read the current level
    fn read_level(&self, pin: u8) -> Level;

    /// Drive the pin
    fn write_level(&mut self, pin: u8, level: Level) -> HalResult<()>;
}

/// Whether `pin` is listed in `input_only`, usable in const context.
pub const fn is_input_only(input_only: &[u8], pin: u8) -> bool {
    let mut i = 0;
    while i < input_only.len() {
        if input_only[i] == pin {
            return true;
        }
        i += 1;
    }
    false
}

/// GPIO34..=GPIO39 on the classic ESP32
pub const ESP32_INPUT_ONLY: &[u8] = &[34, 35, 36, 37, 38, 39];
