//! embedded-hal adapter: bridges real GPIO pins to [`DigitalPort`].
//!
//! Any HAL whose pins implement `embedded_hal::digital::{OutputPin,
//! InputPin}` plugs in here. Outputs share one pin type and inputs another
//! (on ESP-IDF: `PinDriver<AnyOutputPin, Output>` and
//! `PinDriver<AnyInputPin, Input>`), each registered under its GPIO number.

use embedded_hal::digital::{InputPin, OutputPin, PinState};

use crate::app::ports::DigitalPort;
use crate::error::{Error, IoFault, Result};

/// Clock, data-in, chip-select, buzzer.
const MAX_OUTPUTS: usize = 4;
/// Data-out, arm button, disarm button.
const MAX_INPUTS: usize = 3;

/// A [`DigitalPort`] made of individually owned HAL pins.
pub struct HalPort<O, I> {
    outputs: heapless::Vec<(u8, O), MAX_OUTPUTS>,
    inputs: heapless::Vec<(u8, I), MAX_INPUTS>,
}

impl<O: OutputPin, I: InputPin> HalPort<O, I> {
    pub fn new() -> Self {
        Self {
            outputs: heapless::Vec::new(),
            inputs: heapless::Vec::new(),
        }
    }

    /// Register an output line under `pin`.
    pub fn with_output(mut self, pin: u8, line: O) -> Result<Self> {
        if self.is_mapped(pin) {
            return Err(Error::Config("GPIO registered twice"));
        }
        self.outputs
            .push((pin, line))
            .map_err(|_| Error::Config("too many output lines"))?;
        Ok(self)
    }

    /// Register an input line under `pin`.
    pub fn with_input(mut self, pin: u8, line: I) -> Result<Self> {
        if self.is_mapped(pin) {
            return Err(Error::Config("GPIO registered twice"));
        }
        self.inputs
            .push((pin, line))
            .map_err(|_| Error::Config("too many input lines"))?;
        Ok(self)
    }

    fn is_mapped(&self, pin: u8) -> bool {
        self.outputs.iter().any(|(p, _)| *p == pin) || self.inputs.iter().any(|(p, _)| *p == pin)
    }
}

impl<O: OutputPin, I: InputPin> Default for HalPort<O, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: OutputPin, I: InputPin> DigitalPort for HalPort<O, I> {
    fn set_line(&mut self, pin: u8, high: bool) -> core::result::Result<(), IoFault> {
        let (_, line) = self
            .outputs
            .iter_mut()
            .find(|(p, _)| *p == pin)
            .ok_or(IoFault::UnknownPin(pin))?;
        line.set_state(PinState::from(high))
            .map_err(|_| IoFault::WriteFailed(pin))
    }

    fn read_line(&mut self, pin: u8) -> core::result::Result<bool, IoFault> {
        let (_, line) = self
            .inputs
            .iter_mut()
            .find(|(p, _)| *p == pin)
            .ok_or(IoFault::UnknownPin(pin))?;
        line.is_high().map_err(|_| IoFault::ReadFailed(pin))
    }
}
