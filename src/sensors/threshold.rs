//! Potentiometer → alarm threshold.
//!
//! Linear interpolation of the raw code from `[pot_min, pot_max]` onto the
//! Celsius range, then a clamp so codes outside the pot's calibrated span
//! can never push the threshold out of `[min_c, max_c]`.

use crate::config::{PotDirection, ThresholdMap};

/// Map a raw potentiometer code to a threshold in °C.
///
/// The result always lies between `map.min_c` and `map.max_c`. A map that
/// would fail [`MonitorConfig::validate`](crate::config::MonitorConfig::validate)
/// never panics here: reversed bounds are reordered and an empty pot span
/// yields the lower bound.
pub fn raw_to_threshold(raw: u8, map: &ThresholdMap) -> f64 {
    let lo = map.min_c.min(map.max_c);
    let hi = map.min_c.max(map.max_c);
    if map.pot_max <= map.pot_min {
        return lo;
    }
    let (out_at_min, out_at_max) = match map.direction {
        PotDirection::Rising => (lo, hi),
        PotDirection::Falling => (hi, lo),
    };
    let in_min = f64::from(map.pot_min);
    let in_max = f64::from(map.pot_max);
    let mapped = (f64::from(raw) - in_min) * (out_at_max - out_at_min) / (in_max - in_min) + out_at_min;
    mapped.max(lo).min(hi)
}
