//! Polled momentary push-buttons for manual arm / disarm.
//!
//! ## Hardware
//!
//! Momentary switch per function, by default active-low with a pull-up.
//! There is no interrupt: the sampling loop polls each button once per
//! cycle, and a press registers on the released → pressed edge. At the
//! 200 ms default period contact bounce settles between polls, so no
//! separate debounce timer is needed.
//!
//! | Button  | Edge             | Command               |
//! |---------|------------------|-----------------------|
//! | Arm     | released→pressed | `AlarmCommand::Arm`   |
//! | Disarm  | released→pressed | `AlarmCommand::Disarm`|

use crate::app::commands::AlarmCommand;
use crate::app::ports::DigitalPort;
use crate::config::PinMap;
use crate::error::IoFault;

/// Edge detector for one button line.
pub struct ButtonDriver {
    pin: u8,
    active_low: bool,
    command: AlarmCommand,
    was_pressed: bool,
}

impl ButtonDriver {
    pub fn new(pin: u8, active_low: bool, command: AlarmCommand) -> Self {
        Self {
            pin,
            active_low,
            command,
            was_pressed: false,
        }
    }

    /// GPIO pin this button is attached to.
    pub fn pin(&self) -> u8 {
        self.pin
    }

    /// Sample the line. Returns the button's command on a fresh press.
    pub fn poll(&mut self, port: &mut impl DigitalPort) -> Result<Option<AlarmCommand>, IoFault> {
        let level = port.read_line(self.pin)?;
        let pressed = level != self.active_low;
        let fired = pressed && !self.was_pressed;
        self.was_pressed = pressed;
        Ok(fired.then_some(self.command))
    }
}

/// The optional arm and disarm buttons from a [`PinMap`].
pub struct ButtonPanel {
    buttons: heapless::Vec<ButtonDriver, 2>,
}

impl ButtonPanel {
    pub fn from_pins(pins: &PinMap) -> Self {
        let mut buttons = heapless::Vec::new();
        let wired = [
            (pins.arm_button, AlarmCommand::Arm),
            (pins.disarm_button, AlarmCommand::Disarm),
        ];
        for (pin, command) in wired {
            if let Some(pin) = pin {
                // Capacity matches the two possible buttons.
                let _ = buttons.push(ButtonDriver::new(pin, pins.buttons_active_low, command));
            }
        }
        Self { buttons }
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// Poll every button, handing each fresh press to `on_press` in
    /// arm, disarm order.
    pub fn poll(
        &mut self,
        port: &mut impl DigitalPort,
        mut on_press: impl FnMut(AlarmCommand),
    ) -> Result<(), IoFault> {
        for button in &mut self.buttons {
            if let Some(cmd) = button.poll(port)? {
                on_press(cmd);
            }
        }
        Ok(())
    }
}
