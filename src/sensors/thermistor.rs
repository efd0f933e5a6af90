//! NTC thermistor temperature (10 kOhm @ 25 C, B = 3950 by default).
//!
//! Wired as the low side of a voltage divider with a fixed resistor to
//! `v_ref`, read on converter channel 0. The simplified Beta
//! (Steinhart-Hart) equation converts resistance to temperature:
//!
//! ```text
//! V = v_ref · raw / 255
//! R = r_fixed · V / (v_ref − V)
//! 1/T = 1/(t0 + 273.15) + ln(R / r0) / beta
//! ```
//!
//! Pure functions only: the same code and calibration always give the
//! same result, and a code with no physical meaning is an error, never NaN.

use crate::config::Calibration;
use crate::error::ConversionFault;

const KELVIN_OFFSET: f64 = 273.15;
const ADC_FULL_SCALE: f64 = 255.0;

/// Divider voltage for a raw code.
pub fn raw_to_voltage(raw: u8, cal: &Calibration) -> f64 {
    cal.v_ref * f64::from(raw) / ADC_FULL_SCALE
}

/// Thermistor resistance for a raw code.
pub fn raw_to_resistance(raw: u8, cal: &Calibration) -> Result<f64, ConversionFault> {
    let v = raw_to_voltage(raw, cal);
    if v >= cal.v_ref {
        return Err(ConversionFault::SaturatedInput);
    }
    let r = cal.r_fixed_ohms * v / (cal.v_ref - v);
    if r <= 0.0 || !r.is_finite() {
        return Err(ConversionFault::NonPositiveResistance);
    }
    Ok(r)
}

/// Beta-model temperature for a resistance.
pub fn resistance_to_celsius(r_ohms: f64, cal: &Calibration) -> Result<f64, ConversionFault> {
    if r_ohms <= 0.0 {
        return Err(ConversionFault::NonPositiveResistance);
    }
    let inv_t = 1.0 / (cal.t0_celsius + KELVIN_OFFSET) + (r_ohms / cal.r0_ohms).ln() / cal.beta;
    if !inv_t.is_finite() || inv_t <= 0.0 {
        return Err(ConversionFault::OutOfModelRange);
    }
    Ok(1.0 / inv_t - KELVIN_OFFSET)
}

/// Raw code straight to Celsius.
pub fn raw_to_celsius(raw: u8, cal: &Calibration) -> Result<f64, ConversionFault> {
    resistance_to_celsius(raw_to_resistance(raw, cal)?, cal)
}
