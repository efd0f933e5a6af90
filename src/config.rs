//! System configuration parameters
//!
//! Calibration constants, pin assignments and timing for the monitor.
//! Everything here is supplied once at construction time; nothing is
//! persisted.

use serde::{Deserialize, Serialize};

use crate::drivers::adc0832::Channel;
use crate::error::{Error, Result};
use crate::pins;

/// Thermistor divider and Beta-model constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    /// ADC reference / divider supply voltage.
    pub v_ref: f64,
    /// Fixed divider resistor (ohms).
    pub r_fixed_ohms: f64,
    /// Thermistor resistance at `t0_celsius` (ohms).
    pub r0_ohms: f64,
    /// Reference temperature for `r0_ohms` (°C).
    pub t0_celsius: f64,
    /// Beta coefficient (K).
    pub beta: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            v_ref: 3.3,
            r_fixed_ohms: 10_000.0,
            r0_ohms: 10_000.0,
            t0_celsius: 25.0,
            beta: 3950.0,
        }
    }
}

/// Which way the potentiometer turns the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PotDirection {
    /// Raw `pot_min` maps to `min_c`; increasing raw raises the threshold.
    Rising,
    /// Raw `pot_min` maps to `max_c`; increasing raw lowers the threshold.
    Falling,
}

/// Potentiometer → alarm threshold mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdMap {
    pub pot_min: u8,
    pub pot_max: u8,
    pub min_c: f64,
    pub max_c: f64,
    pub direction: PotDirection,
}

impl Default for ThresholdMap {
    fn default() -> Self {
        Self {
            pot_min: 0,
            pot_max: 255,
            min_c: -50.0,
            max_c: 50.0,
            direction: PotDirection::Falling,
        }
    }
}

/// Photoresistor classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightConfig {
    /// Raw codes strictly below this are `Light`.
    pub cut_point: u8,
    /// Converter channel the photoresistor divider is wired to.
    pub channel: Channel,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            cut_point: 128,
            channel: Channel::Ch0,
        }
    }
}

/// GPIO numbers for every line the core touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinMap {
    pub clock: u8,
    pub data_in: u8,
    pub data_out: u8,
    pub chip_select: u8,
    pub buzzer: u8,
    pub arm_button: Option<u8>,
    pub disarm_button: Option<u8>,
    /// Buttons read LOW when pressed (pull-up wiring).
    pub buttons_active_low: bool,
}

impl Default for PinMap {
    fn default() -> Self {
        Self {
            clock: pins::ADC_CLK_GPIO,
            data_in: pins::ADC_DI_GPIO,
            data_out: pins::ADC_DO_GPIO,
            chip_select: pins::ADC_CS_GPIO,
            buzzer: pins::BUZZER_GPIO,
            arm_button: None,
            disarm_button: None,
            buttons_active_low: true,
        }
    }
}

impl PinMap {
    /// Every pin number in use, buttons included when present.
    fn all(&self) -> heapless::Vec<u8, 7> {
        let mut v = heapless::Vec::new();
        for pin in [self.clock, self.data_in, self.data_out, self.chip_select, self.buzzer] {
            let _ = v.push(pin);
        }
        for pin in [self.arm_button, self.disarm_button].into_iter().flatten() {
            let _ = v.push(pin);
        }
        v
    }
}

/// Core monitor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    pub calibration: Calibration,
    pub threshold: ThresholdMap,
    pub light: LightConfig,
    pub pins: PinMap,
    /// Sampling period (milliseconds).
    pub sample_period_ms: u32,
    /// Whether the alarm starts armed.
    pub start_armed: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            calibration: Calibration::default(),
            threshold: ThresholdMap::default(),
            light: LightConfig::default(),
            pins: PinMap::default(),
            sample_period_ms: 200, // 5 Hz
            start_armed: false,
        }
    }
}

impl MonitorConfig {
    /// Parse a JSON configuration document and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed JSON config"))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the conversions cannot work with. Nothing is clamped.
    pub fn validate(&self) -> Result<()> {
        let c = &self.calibration;
        if !(c.v_ref.is_finite() && c.v_ref > 0.0) {
            return Err(Error::Config("v_ref must be positive"));
        }
        if !(c.r_fixed_ohms.is_finite() && c.r_fixed_ohms > 0.0) {
            return Err(Error::Config("r_fixed_ohms must be positive"));
        }
        if !(c.r0_ohms.is_finite() && c.r0_ohms > 0.0) {
            return Err(Error::Config("r0_ohms must be positive"));
        }
        if !(c.beta.is_finite() && c.beta > 0.0) {
            return Err(Error::Config("beta must be positive"));
        }
        if !(c.t0_celsius.is_finite() && c.t0_celsius > -273.15) {
            return Err(Error::Config("t0_celsius must be above absolute zero"));
        }

        let t = &self.threshold;
        if t.pot_max <= t.pot_min {
            return Err(Error::Config("pot_max must be greater than pot_min"));
        }
        if !(t.min_c.is_finite() && t.max_c.is_finite() && t.min_c < t.max_c) {
            return Err(Error::Config("threshold min_c must be below max_c"));
        }

        if self.sample_period_ms == 0 {
            return Err(Error::Config("sample_period_ms must be non-zero"));
        }

        let all = self.pins.all();
        for (i, pin) in all.iter().enumerate() {
            if all[i + 1..].contains(pin) {
                return Err(Error::Config("pin assigned to more than one line"));
            }
        }
        Ok(())
    }
}
