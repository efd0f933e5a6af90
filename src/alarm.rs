//! Alarm controller.
//!
//! Two states, changed only by operator commands, and a pure decision
//! function evaluated once per sampling cycle:
//!
//! ```text
//!            Arm / Toggle
//!   Disarmed ─────────────▶ Armed
//!            ◀─────────────
//!            Disarm / Toggle
//!
//!   buzzer = Armed ∧ temperature > threshold
//! ```
//!
//! The comparison is strict and has no hysteresis band: a temperature
//! exactly at the threshold stays silent.

use log::info;

use crate::app::commands::AlarmCommand;

/// Whether an over-threshold temperature sounds the buzzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmState {
    Armed,
    Disarmed,
}

impl AlarmState {
    /// State after applying `cmd`.
    pub const fn apply(self, cmd: AlarmCommand) -> Self {
        match (cmd, self) {
            (AlarmCommand::Arm, _) | (AlarmCommand::Toggle, AlarmState::Disarmed) => AlarmState::Armed,
            (AlarmCommand::Disarm, _) | (AlarmCommand::Toggle, AlarmState::Armed) => AlarmState::Disarmed,
        }
    }

    pub const fn is_armed(self) -> bool {
        matches!(self, AlarmState::Armed)
    }
}

/// Buzzer decision for one cycle.
pub fn buzzer_on(state: AlarmState, temperature_c: f64, threshold_c: f64) -> bool {
    state.is_armed() && temperature_c > threshold_c
}

/// Alarm state holder.
pub struct AlarmController {
    state: AlarmState,
}

impl AlarmController {
    pub fn new(initial: AlarmState) -> Self {
        Self { state: initial }
    }

    pub fn state(&self) -> AlarmState {
        self.state
    }

    /// Apply an operator command. Returns the previous state if it changed.
    pub fn handle(&mut self, cmd: AlarmCommand) -> Option<AlarmState> {
        let prev = self.state;
        self.state = prev.apply(cmd);
        if self.state == prev {
            return None;
        }
        info!("ALARM {:?} -> {:?} ({:?})", prev, self.state, cmd);
        Some(prev)
    }

    /// Decide the buzzer level. No valid temperature yet means silence.
    pub fn decide(&self, temperature_c: Option<f64>, threshold_c: f64) -> bool {
        temperature_c.is_some_and(|t| buzzer_on(self.state, t, threshold_c))
    }
}
