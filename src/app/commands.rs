//! Inbound operator commands.
//!
//! Produced by the presentation layer (buttons, keyboard, GUI) through
//! [`MonitorControls`](super::controls::MonitorControls) and by the
//! optional hardware buttons; consumed once per cycle by the sampling loop.

/// Commands that change the alarm's armed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmCommand {
    /// Arm the alarm. No-op when already armed.
    Arm,
    /// Disarm the alarm. No-op when already disarmed.
    Disarm,
    /// Flip between armed and disarmed.
    Toggle,
}
