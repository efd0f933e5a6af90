//! Sensor subsystem: conversions and the aggregating [`SensorHub`].
//!
//! The hub owns the converter driver and the calibration, reads both
//! channels once per tick and produces a [`SensorReading`] for the
//! sampling loop. Conversion faults are returned in the reading, not
//! raised: only an I/O fault stops a tick.

pub mod light;
pub mod thermistor;
pub mod threshold;

use crate::app::events::RawCodes;
use crate::app::ports::DigitalPort;
use crate::config::{Calibration, LightConfig, MonitorConfig, ThresholdMap};
use crate::drivers::adc0832::{AdcDriver, AdcPins, Channel};
use crate::error::{ConversionFault, Result};
use light::Light;

/// Everything derived from one pair of converter samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    pub raw: RawCodes,
    /// Thermistor temperature, or why this sample has none.
    pub temperature: core::result::Result<f64, ConversionFault>,
    pub threshold: f64,
    pub light: Light,
    pub light_fraction: f64,
}

/// Converter driver plus every calibration constant.
pub struct SensorHub {
    adc: AdcDriver,
    calibration: Calibration,
    threshold: ThresholdMap,
    light: LightConfig,
}

impl SensorHub {
    /// Validates `config` first; the conversions assume a usable map and
    /// calibration.
    pub fn new(config: &MonitorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            adc: AdcDriver::new(AdcPins::from(&config.pins)),
            calibration: config.calibration,
            threshold: config.threshold,
            light: config.light,
        })
    }

    pub fn adc(&self) -> &AdcDriver {
        &self.adc
    }

    /// Sample both channels and convert.
    pub fn read_all(&self, port: &mut impl DigitalPort) -> Result<SensorReading> {
        let temp_raw = self.adc.read(port, Channel::Ch0)?;
        let pot_raw = self.adc.read(port, Channel::Ch1)?;
        Ok(self.convert(temp_raw, pot_raw))
    }

    /// Pure conversion of one sample pair.
    pub fn convert(&self, temp_raw: u8, pot_raw: u8) -> SensorReading {
        let light_raw = match self.light.channel {
            Channel::Ch0 => temp_raw,
            Channel::Ch1 => pot_raw,
        };
        SensorReading {
            raw: RawCodes {
                temperature: temp_raw,
                threshold: pot_raw,
            },
            temperature: thermistor::raw_to_celsius(temp_raw, &self.calibration),
            threshold: threshold::raw_to_threshold(pot_raw, &self.threshold),
            light: light::classify(light_raw, &self.light),
            light_fraction: light::fraction(light_raw),
        }
    }
}
