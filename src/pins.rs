//! Default pin assignments for the reference board.
//!
//! Single source of truth for [`PinMap::default`](crate::config::PinMap).
//! Numbers are GPIO numbers as the board's HAL names them.

// ---------------------------------------------------------------------------
// ADC0832 serial interface
// ---------------------------------------------------------------------------

/// Converter clock (output).
pub const ADC_CLK_GPIO: u8 = 16;
/// Converter serial data out → MCU input.
pub const ADC_DO_GPIO: u8 = 26;
/// MCU output → converter serial data in (mux address).
pub const ADC_DI_GPIO: u8 = 19;
/// Converter chip-select, active low (output).
pub const ADC_CS_GPIO: u8 = 13;

// ---------------------------------------------------------------------------
// Alarm output
// ---------------------------------------------------------------------------

/// Buzzer (or indicator LED) drive, active HIGH.
pub const BUZZER_GPIO: u8 = 21;

// ---------------------------------------------------------------------------
// Manual override buttons (active-low with pull-up). Not wired by default;
// the device binary opts in.
// ---------------------------------------------------------------------------

pub const ARM_BUTTON_GPIO: u8 = 25;
pub const DISARM_BUTTON_GPIO: u8 = 27;
