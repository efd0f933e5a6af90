//! Thermistor alarm library.
//!
//! Bit-banged ADC0832 sampling, thermistor and potentiometer conversion,
//! the armed/disarmed alarm and the sampling loop that ties them together.
//! Everything here is HAL-agnostic; the ESP-IDF binary in `main.rs` wires
//! it to real pins.

#![deny(unused_must_use)]

pub mod adapters;
pub mod alarm;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod pins;
pub mod sensors;
