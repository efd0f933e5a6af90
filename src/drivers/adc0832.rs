//! ADC0832 two-channel 8-bit serial converter, bit-banged over four lines.
//!
//! ## Transaction
//!
//! ```text
//!  CS   ‾‾\___________________________________________/‾‾
//!  CLK  ____/‾\_/‾\_/‾\____/‾\_/‾\_ ... _/‾\__________
//!  DI   < 1 >< 1 ><ch >
//!  DO                     <b7 ><b6 > ... <b0 >
//!        start sgl  odd     8 data pulses, MSB first
//! ```
//!
//! 1. CS high then low discards any half-finished transaction.
//! 2. CLK low sets the idle phase.
//! 3. Three address bits (start, single-ended, channel) are each held on DI
//!    for one full clock pulse.
//! 4. Eight clock pulses, DO sampled after each falling edge, MSB first.
//! 5. CS high ends the conversion.
//!
//! Only edge ordering matters; no delay is inserted between edges. The
//! driver holds nothing but its pin numbers, so a transaction is atomic as
//! long as the caller owns the port for the whole `read` call.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::app::ports::DigitalPort;
use crate::config::PinMap;
use crate::error::{Error, IoFault, Result};

/// Converter input multiplexer selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Channel {
    Ch0 = 0,
    Ch1 = 1,
}

impl Channel {
    /// Both channels, in converter order.
    pub const ALL: [Channel; 2] = [Channel::Ch0, Channel::Ch1];

    /// Value of the odd/sign address bit.
    pub const fn select_bit(self) -> bool {
        matches!(self, Channel::Ch1)
    }
}

impl TryFrom<u8> for Channel {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Channel::Ch0),
            1 => Ok(Channel::Ch1),
            other => Err(Error::InvalidChannel(other)),
        }
    }
}

/// A quantised converter reading, 0 – 255.
pub type RawSample = u8;

/// Number of result bits shifted out per conversion.
const RESULT_BITS: u32 = 8;

/// Pin numbers of the four converter lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdcPins {
    pub clock: u8,
    pub data_in: u8,
    pub data_out: u8,
    pub chip_select: u8,
}

impl From<&PinMap> for AdcPins {
    fn from(p: &PinMap) -> Self {
        Self {
            clock: p.clock,
            data_in: p.data_in,
            data_out: p.data_out,
            chip_select: p.chip_select,
        }
    }
}

/// Bit-banged ADC0832 driver.
#[derive(Debug, Clone, Copy)]
pub struct AdcDriver {
    pins: AdcPins,
}

impl AdcDriver {
    pub fn new(pins: AdcPins) -> Self {
        Self { pins }
    }

    pub fn pins(&self) -> AdcPins {
        self.pins
    }

    /// Run one complete conversion on `channel`.
    pub fn read(&self, port: &mut impl DigitalPort, channel: Channel) -> Result<RawSample> {
        let p = self.pins;

        // 1. Fresh transaction.
        port.set_line(p.chip_select, true)?;
        port.set_line(p.chip_select, false)?;

        // 2. Idle clock phase.
        port.set_line(p.clock, false)?;

        // 3. Mux address: start, single-ended, channel.
        for bit in [true, true, channel.select_bit()] {
            port.set_line(p.data_in, bit)?;
            self.pulse_clock(port)?;
        }

        // 4. Result, MSB first.
        let mut acc: u8 = 0;
        for _ in 0..RESULT_BITS {
            self.pulse_clock(port)?;
            acc <<= 1;
            if port.read_line(p.data_out)? {
                acc |= 0x1;
            }
        }

        // 5. Release the converter.
        port.set_line(p.chip_select, true)?;

        trace!("adc0832: ch{} = {}", channel as u8, acc);
        Ok(acc)
    }

    /// Like [`read`](Self::read) but takes an untyped channel number.
    /// Anything but 0 or 1 is rejected before a single line moves.
    pub fn read_channel(&self, port: &mut impl DigitalPort, channel: u8) -> Result<RawSample> {
        let channel = Channel::try_from(channel)?;
        self.read(port, channel)
    }

    /// Convert both channels back to back: `[ch0, ch1]`.
    pub fn read_both(&self, port: &mut impl DigitalPort) -> Result<[RawSample; 2]> {
        Ok([self.read(port, Channel::Ch0)?, self.read(port, Channel::Ch1)?])
    }

    /// Park every converter output line: CS high (deselected), CLK and DI low.
    pub fn release(&self, port: &mut impl DigitalPort) -> core::result::Result<(), IoFault> {
        port.set_line(self.pins.chip_select, true)?;
        port.set_line(self.pins.clock, false)?;
        port.set_line(self.pins.data_in, false)
    }

    fn pulse_clock(&self, port: &mut impl DigitalPort) -> core::result::Result<(), IoFault> {
        port.set_line(self.pins.clock, true)?;
        port.set_line(self.pins.clock, false)
    }
}
