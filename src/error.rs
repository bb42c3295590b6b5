//! Unified error types for the thermopanel firmware.
//!
//! The control core itself has no recoverable errors (inputs are clamped,
//! radio commands are fire-and-forget).  Errors only arise at the edges:
//! configuration validation and the hardware adapters.  All variants are
//! `Copy` so adapters can log and discard them without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A pin or ADC channel could not be read or driven.
    Hardware(HardwareError),
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid or could not be parsed.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hardware(e) => write!(f, "hardware: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Hardware errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareError {
    /// Digital input read failed (button).
    GpioReadFailed,
    /// Digital output write failed (backlight, buzzer).
    GpioWriteFailed,
    /// ADC conversion failed or timed out (knob, thermistor).
    AdcReadFailed,
}

impl fmt::Display for HardwareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioReadFailed => write!(f, "GPIO read failed"),
            Self::GpioWriteFailed => write!(f, "GPIO write failed"),
            Self::AdcReadFailed => write!(f, "ADC read failed"),
        }
    }
}

impl From<HardwareError> for Error {
    fn from(e: HardwareError) -> Self {
        Self::Hardware(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
