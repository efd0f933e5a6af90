//! Monitor service: the sampling loop.
//!
//! [`MonitorService`] owns the sensor hub, alarm controller and buzzer and
//! holds the last good readings between cycles. All I/O flows through the
//! [`DigitalPort`] and [`EventSink`] ports injected at call sites, so the
//! loop runs unchanged against real GPIO or a simulated converter.
//!
//! ```text
//!  DigitalPort ──▶ ┌─────────────────────────┐ ──▶ EventSink
//!                  │     MonitorService      │
//!  DigitalPort ◀── │  ADC · Convert · Alarm  │ ──▶ MonitorControls (snapshot)
//!                  └─────────────────────────┘
//! ```

use embedded_hal::delay::DelayNs;
use log::{debug, error, info, warn};

use crate::alarm::{AlarmController, AlarmState};
use crate::config::MonitorConfig;
use crate::drivers::button::ButtonPanel;
use crate::drivers::buzzer::Buzzer;
use crate::error::{Error, IoFault, Result};
use crate::sensors::SensorHub;

use super::controls::MonitorControls;
use super::events::{MonitorEvent, Snapshot};
use super::ports::{DigitalPort, EventSink};

// ───────────────────────────────────────────────────────────────
// MonitorService
// ───────────────────────────────────────────────────────────────

/// The sampling loop and everything it owns.
pub struct MonitorService<'a> {
    controls: &'a MonitorControls,
    sensors: SensorHub,
    alarm: AlarmController,
    buzzer: Buzzer,
    buttons: ButtonPanel,
    period_ms: u32,
    /// Last valid temperature (°C).
    temperature: Option<f64>,
    /// Threshold paired with `temperature` (°C).
    threshold: f64,
    /// `(min_c, max_c)` from the threshold map.
    threshold_range: (f64, f64),
    cycle: u64,
    /// Consecutive cycles without a valid temperature.
    fault_streak: u32,
}

impl<'a> MonitorService<'a> {
    /// Validate `config` and build the loop. Touches no hardware.
    pub fn new(config: &MonitorConfig, controls: &'a MonitorControls) -> Result<Self> {
        let initial = if config.start_armed {
            AlarmState::Armed
        } else {
            AlarmState::Disarmed
        };
        Ok(Self {
            controls,
            sensors: SensorHub::new(config)?,
            alarm: AlarmController::new(initial),
            buzzer: Buzzer::new(config.pins.buzzer),
            buttons: ButtonPanel::from_pins(&config.pins),
            period_ms: config.sample_period_ms,
            temperature: None,
            threshold: (config.threshold.min_c + config.threshold.max_c) / 2.0,
            threshold_range: (config.threshold.min_c, config.threshold.max_c),
            cycle: 0,
            fault_streak: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce the loop. Called by [`run`](Self::run); call it yourself
    /// when driving [`tick`](Self::tick) manually.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&MonitorEvent::Started(self.alarm.state()));
        info!(
            "Monitor started: alarm {:?}, period {} ms",
            self.alarm.state(),
            self.period_ms
        );
    }

    /// Run cycles every `sample_period_ms` until [`MonitorControls::stop`]
    /// is called or a line fails.
    ///
    /// On a clean stop the buzzer is silenced and the converter lines are
    /// parked before returning `Ok`. An I/O fault, during a cycle or while
    /// parking the lines, is reported once and returned; after a cycle
    /// fault the lines are still released on a best-effort basis.
    pub fn run(
        &mut self,
        port: &mut impl DigitalPort,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        self.start(sink);

        let outcome = loop {
            if self.controls.stop_requested() {
                break Ok(());
            }
            if let Err(e) = self.tick(port, sink) {
                break Err(e);
            }
            delay.delay_ms(self.period_ms);
        };

        let was_on = self.buzzer.is_on();
        let outcome = match outcome {
            Ok(()) => self.shutdown(port).map_err(Error::from),
            Err(e) => {
                if let Err(release) = self.shutdown(port) {
                    debug!("Line release after fault also failed: {}", release);
                }
                Err(e)
            }
        };

        match outcome {
            Ok(()) => {
                if was_on {
                    sink.emit(&MonitorEvent::BuzzerChanged(false));
                }
                sink.emit(&MonitorEvent::Stopped);
                info!("Monitor stopped after {} cycles", self.cycle);
                Ok(())
            }
            Err(e) => {
                error!("Monitor halted: {}", e);
                if let Error::Io(fault) = e {
                    sink.emit(&MonitorEvent::IoFault(fault));
                }
                Err(e)
            }
        }
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one cycle: buttons → commands → sample → convert → decide →
    /// buzzer → publish.
    ///
    /// Only I/O faults are returned; a conversion fault keeps the previous
    /// temperature and threshold and the cycle carries on with them.
    pub fn tick(
        &mut self,
        port: &mut impl DigitalPort,
        sink: &mut impl EventSink,
    ) -> Result<Snapshot> {
        self.cycle += 1;

        // 1. Manual buttons feed the same queue as remote commands.
        let controls = self.controls;
        self.buttons.poll(port, |cmd| controls.send(cmd))?;

        // 2. Apply every pending command before deciding.
        while let Some(cmd) = controls.next_command() {
            if let Some(from) = self.alarm.handle(cmd) {
                sink.emit(&MonitorEvent::AlarmChanged {
                    from,
                    to: self.alarm.state(),
                });
            }
        }

        // 3. Sample both channels.
        let reading = self.sensors.read_all(port)?;

        // 4. Keep the previous pair when the temperature does not convert.
        match reading.temperature {
            Ok(celsius) => {
                if self.fault_streak > 0 {
                    info!("Temperature valid again after {} cycles", self.fault_streak);
                }
                self.fault_streak = 0;
                self.temperature = Some(celsius);
                self.threshold = reading.threshold;
            }
            Err(fault) => {
                self.fault_streak = self.fault_streak.saturating_add(1);
                if self.fault_streak == 1 {
                    warn!("Temperature sample rejected (raw {}): {}", reading.raw.temperature, fault);
                    sink.emit(&MonitorEvent::ConversionFault(fault));
                } else {
                    debug!("Temperature sample rejected (raw {}): {}", reading.raw.temperature, fault);
                }
            }
        }

        // An operator-entered threshold takes precedence over the pot.
        if let Some(celsius) = controls.threshold_override() {
            self.threshold = celsius.clamp(self.threshold_range.0, self.threshold_range.1);
        }

        // 5. Decide and drive the buzzer.
        let on = self.alarm.decide(self.temperature, self.threshold);
        if self.buzzer.set(port, on)? {
            sink.emit(&MonitorEvent::BuzzerChanged(on));
        }

        // 6. Publish.
        let snapshot = Snapshot {
            temperature_celsius: self.temperature,
            threshold_celsius: self.threshold,
            alarm_state: self.alarm.state(),
            buzzer_on: on,
            light: reading.light,
            light_fraction: reading.light_fraction,
            raw: reading.raw,
            cycle: self.cycle,
        };
        controls.publish(snapshot);
        sink.emit(&MonitorEvent::Sample(snapshot));
        debug!(
            "cycle {} raw={}/{} T={:?} Th={:.2} buzzer={}",
            self.cycle, reading.raw.temperature, reading.raw.threshold, self.temperature, self.threshold, on
        );

        Ok(snapshot)
    }

    /// Silence the buzzer and park the converter lines. Both steps are
    /// attempted; the first failure is returned.
    pub fn shutdown(&mut self, port: &mut impl DigitalPort) -> core::result::Result<(), IoFault> {
        let buzzer = self.buzzer.off(port);
        let lines = self.sensors.adc().release(port);
        buzzer.and(lines)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn alarm_state(&self) -> AlarmState {
        self.alarm.state()
    }

    /// Cycles executed since construction.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }
}
