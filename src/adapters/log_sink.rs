//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing monitor events to the `log` facade
//! (the ESP-IDF logger on the device, whatever logger the host installs
//! otherwise).

use log::{debug, info, warn};

use crate::app::events::MonitorEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`MonitorEvent`] to the console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &MonitorEvent) {
        match event {
            MonitorEvent::Sample(s) => match (s.temperature_celsius, s.temperature_fahrenheit()) {
                (Some(c), Some(f)) => info!(
                    "SAMPLE | #{} | T={:.2}\u{00b0}C ({:.1}\u{00b0}F) | Th={:.2}\u{00b0}C | \
                     alarm={:?} buzzer={} | {:?} {:.0}%",
                    s.cycle,
                    c,
                    f,
                    s.threshold_celsius,
                    s.alarm_state,
                    if s.buzzer_on { "ON" } else { "off" },
                    s.light,
                    s.light_fraction * 100.0,
                ),
                _ => info!(
                    "SAMPLE | #{} | T=--- | Th={:.2}\u{00b0}C | alarm={:?} buzzer={} | {:?} {:.0}%",
                    s.cycle,
                    s.threshold_celsius,
                    s.alarm_state,
                    if s.buzzer_on { "ON" } else { "off" },
                    s.light,
                    s.light_fraction * 100.0,
                ),
            },
            MonitorEvent::AlarmChanged { from, to } => {
                info!("ALARM | {:?} -> {:?}", from, to);
            }
            MonitorEvent::BuzzerChanged(on) => {
                info!("BUZZER | {}", if *on { "ON" } else { "off" });
            }
            // The loop already warns once per fault streak.
            MonitorEvent::ConversionFault(fault) => {
                debug!("FAULT | conversion: {}", fault);
            }
            MonitorEvent::IoFault(fault) => {
                warn!("FAULT | line: {}", fault);
            }
            MonitorEvent::Started(state) => {
                info!("START | alarm={:?}", state);
            }
            MonitorEvent::Stopped => {
                info!("STOP");
            }
        }
    }
}
