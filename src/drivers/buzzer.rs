//! Buzzer / alarm LED output.
//!
//! A single active-HIGH line. The driver remembers the last level it wrote
//! so the loop can report edges; it writes the line every cycle regardless,
//! so a glitched output is corrected within one period.

use crate::app::ports::DigitalPort;
use crate::error::IoFault;

pub struct Buzzer {
    pin: u8,
    on: bool,
}

impl Buzzer {
    pub fn new(pin: u8) -> Self {
        Self { pin, on: false }
    }

    /// Drive the line. Returns `true` if the level changed.
    pub fn set(&mut self, port: &mut impl DigitalPort, on: bool) -> Result<bool, IoFault> {
        port.set_line(self.pin, on)?;
        let changed = self.on != on;
        self.on = on;
        Ok(changed)
    }

    /// Silence the buzzer.
    pub fn off(&mut self, port: &mut impl DigitalPort) -> Result<(), IoFault> {
        self.set(port, false).map(|_| ())
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn pin(&self) -> u8 {
        self.pin
    }
}
