//! Shared handle between the sampling loop and its command producers.
//!
//! Uses `embassy-sync` primitives so the same type works as a `static` on
//! the MCU and behind a reference in host threads.
//!
//! ```text
//! ┌──────────────┐  AlarmCommand  ┌───────────────┐
//! │ Presentation │───────────────▶│ Sampling loop │
//! │  / buttons   │◀───────────────│  (one worker) │
//! └──────────────┘    Snapshot    └───────────────┘
//! ```
//!
//! Commands are queued and drained by the loop at the start of every cycle,
//! so a command is applied whole, before the next buzzer decision.

use core::cell::Cell;
use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, TrySendError};
use log::warn;

use super::commands::AlarmCommand;
use super::events::Snapshot;

/// Channel depth for queued operator commands.
const CMD_DEPTH: usize = 8;

pub struct MonitorControls {
    commands: Channel<CriticalSectionRawMutex, AlarmCommand, CMD_DEPTH>,
    stop: AtomicBool,
    latest: Mutex<CriticalSectionRawMutex, Cell<Option<Snapshot>>>,
    /// Operator-entered threshold (°C) replacing the pot reading.
    threshold_override: Mutex<CriticalSectionRawMutex, Cell<Option<f64>>>,
}

impl MonitorControls {
    pub const fn new() -> Self {
        Self {
            commands: Channel::new(),
            stop: AtomicBool::new(false),
            latest: Mutex::new(Cell::new(None)),
            threshold_override: Mutex::new(Cell::new(None)),
        }
    }

    // ── Command entry points ──────────────────────────────────

    pub fn arm(&self) {
        self.send(AlarmCommand::Arm);
    }

    pub fn disarm(&self) {
        self.send(AlarmCommand::Disarm);
    }

    pub fn toggle(&self) {
        self.send(AlarmCommand::Toggle);
    }

    /// Use `celsius` as the threshold from the next cycle on, instead of the
    /// potentiometer, until [`clear_threshold`](Self::clear_threshold).
    /// The loop clamps it into the configured range. Non-finite values are
    /// ignored.
    pub fn set_threshold(&self, celsius: f64) {
        if !celsius.is_finite() {
            warn!("Ignoring non-finite threshold {}", celsius);
            return;
        }
        self.threshold_override.lock(|cell| cell.set(Some(celsius)));
    }

    /// Hand the threshold back to the potentiometer.
    pub fn clear_threshold(&self) {
        self.threshold_override.lock(|cell| cell.set(None));
    }

    /// Queue a command for the next cycle. When the queue is full the
    /// oldest pending command is dropped so the newest one always lands.
    pub fn send(&self, cmd: AlarmCommand) {
        if let Err(TrySendError::Full(cmd)) = self.commands.try_send(cmd) {
            if let Ok(dropped) = self.commands.try_receive() {
                warn!("Command queue full, dropping {:?}", dropped);
            }
            if self.commands.try_send(cmd).is_err() {
                warn!("Command queue full, dropping {:?}", cmd);
            }
        }
    }

    /// Ask the loop to finish. It silences the buzzer and releases the
    /// lines before returning.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    pub fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    // ── Snapshot ──────────────────────────────────────────────

    /// Latest published snapshot; `None` before the first cycle.
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.latest.lock(Cell::get)
    }

    // ── Loop side ─────────────────────────────────────────────

    pub(crate) fn next_command(&self) -> Option<AlarmCommand> {
        self.commands.try_receive().ok()
    }

    pub(crate) fn threshold_override(&self) -> Option<f64> {
        self.threshold_override.lock(Cell::get)
    }

    pub(crate) fn publish(&self, snapshot: Snapshot) {
        self.latest.lock(|cell| cell.set(Some(snapshot)));
    }
}

impl Default for MonitorControls {
    fn default() -> Self {
        Self::new()
    }
}
