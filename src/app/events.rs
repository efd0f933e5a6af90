//! Outbound monitor events and the published snapshot.
//!
//! The [`MonitorService`](super::service::MonitorService) emits these
//! through the [`EventSink`](super::ports::EventSink) port and stores the
//! latest [`Snapshot`] in [`MonitorControls`](super::controls::MonitorControls)
//! for polling readers.

use crate::alarm::AlarmState;
use crate::error::{ConversionFault, IoFault};
use crate::sensors::light::Light;

/// Structured events emitted by the monitor core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MonitorEvent {
    /// The sampling loop started (carries the initial alarm state).
    Started(AlarmState),

    /// One sampling cycle completed.
    Sample(Snapshot),

    /// An operator command changed the alarm state.
    AlarmChanged { from: AlarmState, to: AlarmState },

    /// The buzzer line changed level.
    BuzzerChanged(bool),

    /// Temperature samples became unusable; the previous reading stays.
    /// Emitted on the first cycle of a fault streak only.
    ConversionFault(ConversionFault),

    /// A line could not be driven or read. The loop is ending.
    IoFault(IoFault),

    /// The loop stopped and released every line.
    Stopped,
}

/// Raw converter codes captured in one cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawCodes {
    /// Channel 0: thermistor divider.
    pub temperature: u8,
    /// Channel 1: threshold potentiometer.
    pub threshold: u8,
}

/// Read-only view of the latest cycle, published once per cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    /// Last valid temperature; `None` until the first good conversion.
    pub temperature_celsius: Option<f64>,
    /// Last valid threshold, always inside the configured range.
    pub threshold_celsius: f64,
    pub alarm_state: AlarmState,
    pub buzzer_on: bool,
    pub light: Light,
    /// Photoresistor brightness, 0.0 (dark) – 1.0 (bright).
    pub light_fraction: f64,
    /// Codes read this cycle, whether or not they converted.
    pub raw: RawCodes,
    /// Cycles completed since the loop started.
    pub cycle: u64,
}

impl Snapshot {
    /// Last valid temperature in Fahrenheit.
    pub fn temperature_fahrenheit(&self) -> Option<f64> {
        self.temperature_celsius.map(|c| c * 9.0 / 5.0 + 32.0)
    }
}
