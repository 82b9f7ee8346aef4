//! Common error types for HAL operations

use core::fmt;

/// HAL operation errors
///
/// Only pin configuration and output writes can fail. Reads, debouncing
/// and callback dispatch have no failure path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalError {
    /// The driver rejected the pin configuration
    ConfigurationError,
    /// Vendor-specific error code (an `esp_err_t` on ESP-IDF)
    VendorError(i32),
}

impl HalError {
    /// Raw vendor status code, if the driver supplied one
    pub const fn code(&self) -> Option<i32> {
        match self {
            Self::VendorError(code) => Some(*code),
            _ => None,
        }
    }
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigurationError => write!(f, "pin configuration rejected"),
            Self::VendorError(code) => write!(f, "vendor error code: {}", code),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

#[cfg(feature = "defmt")]
impl defmt::Format for HalError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::ConfigurationError => defmt::write!(fmt, "ConfigurationError"),
            Self::VendorError(code) => defmt::write!(fmt, "VendorError({})", code),
        }
    }
}

impl embedded_hal::digital::Error for HalError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

/// Result type for HAL operations
pub type HalResult<T> = Result<T, HalError>;
