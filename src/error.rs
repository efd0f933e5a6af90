//! Unified error types for the ThermAlarm firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! sampling loop's error handling uniform. All variants are `Copy` so they
//! can be passed through events and the published snapshot without
//! allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A digital line could not be driven or sampled. Fatal.
    Io(IoFault),
    /// A raw sample produced no valid physical reading. Recoverable.
    Conversion(ConversionFault),
    /// A converter channel outside `{0, 1}` was requested.
    InvalidChannel(u8),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Conversion(e) => write!(f, "conversion: {e}"),
            Self::InvalidChannel(ch) => write!(f, "invalid ADC channel {ch} (expected 0 or 1)"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// I/O faults
// ---------------------------------------------------------------------------

/// Digital I/O port failures. The sampling loop cannot continue without
/// sensor data, so every one of these ends the monitoring session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoFault {
    /// The port has no line with this pin number.
    UnknownPin(u8),
    /// Driving an output line failed.
    WriteFailed(u8),
    /// Sampling an input line failed.
    ReadFailed(u8),
    /// The whole port is gone (device unplugged, driver closed).
    Unavailable,
}

impl fmt::Display for IoFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPin(pin) => write!(f, "no line mapped to pin {pin}"),
            Self::WriteFailed(pin) => write!(f, "write to pin {pin} failed"),
            Self::ReadFailed(pin) => write!(f, "read from pin {pin} failed"),
            Self::Unavailable => write!(f, "digital I/O port unavailable"),
        }
    }
}

impl From<IoFault> for Error {
    fn from(e: IoFault) -> Self {
        Self::Io(e)
    }
}

// ---------------------------------------------------------------------------
// Conversion faults
// ---------------------------------------------------------------------------

/// A raw code that has no physical interpretation under the current
/// calibration. The loop keeps its previous reading when it sees one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionFault {
    /// Divider voltage reached the reference (raw code 255): the
    /// resistance formula would divide by zero.
    SaturatedInput,
    /// Computed sensor resistance is zero or negative (raw code 0).
    NonPositiveResistance,
    /// The Beta equation produced a non-finite or non-positive 1/T.
    OutOfModelRange,
}

impl fmt::Display for ConversionFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SaturatedInput => write!(f, "divider voltage saturated"),
            Self::NonPositiveResistance => write!(f, "non-positive thermistor resistance"),
            Self::OutOfModelRange => write!(f, "temperature outside Beta model range"),
        }
    }
}

impl From<ConversionFault> for Error {
    fn from(e: ConversionFault) -> Self {
        Self::Conversion(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
