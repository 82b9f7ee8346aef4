//! GPIO Hardware Abstraction Layer
//!
//! Typed, compile-time configured GPIO pins and a polled, debounced
//! push-button built on them. Vendor crates plug in by implementing
//! [`gpio::PinDriver`] and [`time::Clock`].
//!
//! - [`pin`]: `Pin<D, N, M>`, one hardware pin bound to its number and
//!   direction at compile time
//! - [`button`]: `Button`, press/hold/release detection with a time-based
//!   debounce filter
//! - [`gpio`]: the driver-facing vocabulary and the `PinDriver` trait
//! - [`time`]: timestamps, durations and the `Clock` trait
//!
//! ## Features
//! - `std` (default): `StdClock`, the [`mock`] driver and
//!   `std::error::Error` for [`HalError`]
//! - `defmt`: `defmt::Format` for the public value types

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

pub mod button;
pub mod error;
pub mod gpio;
pub mod pin;
pub mod time;

#[cfg(any(test, feature = "std"))]
pub mod mock;

// Re-export commonly used types
pub use button::{Button, ButtonEvent};
pub use error::{HalError, HalResult};
pub use gpio::{Level, PinDriver};
pub use pin::{Input, Output, Pin};
pub use time::{Clock, Duration, Instant};
