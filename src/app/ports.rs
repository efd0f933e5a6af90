//! Port traits: the boundary between the monitor core and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MonitorService (domain)
//! ```
//!
//! Driven adapters (GPIO, event sinks) implement these traits. The
//! [`MonitorService`](super::service::MonitorService) consumes them via
//! generics, so the core never touches hardware directly.

use crate::error::IoFault;

// ───────────────────────────────────────────────────────────────
// Digital I/O port (driven adapter: domain ↔ GPIO lines)
// ───────────────────────────────────────────────────────────────

/// Raw access to individual digital lines, addressed by GPIO number.
///
/// Implementations hold no protocol state. A write must take effect before
/// the next read, and writes must not be reordered or coalesced: the ADC
/// protocol relies on edge ordering alone, with no inter-edge delay.
pub trait DigitalPort {
    /// Drive an output line. `true` = HIGH.
    fn set_line(&mut self, pin: u8, high: bool) -> Result<(), IoFault>;

    /// Sample an input line. `true` = HIGH.
    fn read_line(&mut self, pin: u8) -> Result<bool, IoFault>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → presentation / logging)
// ───────────────────────────────────────────────────────────────

/// The core emits structured [`MonitorEvent`](super::events::MonitorEvent)s
/// through this port. Adapters decide where they go (log, display, ...).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::MonitorEvent);
}
