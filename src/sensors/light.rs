//! Photoresistor light level.
//!
//! The divider puts the LDR on the high side, so the raw code falls as the
//! room gets brighter. A single cut point classifies the reading; there is
//! no smoothing or hysteresis.

use crate::config::LightConfig;

/// Instantaneous room brightness class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Light {
    Light,
    Dark,
}

/// Classify a raw code: strictly below the cut point is `Light`.
pub fn classify(raw: u8, cfg: &LightConfig) -> Light {
    if raw < cfg.cut_point {
        Light::Light
    } else {
        Light::Dark
    }
}

/// Normalised brightness: 1.0 at code 0, 0.0 at code 255.
pub fn fraction(raw: u8) -> f64 {
    1.0 - f64::from(raw) / 255.0
}
