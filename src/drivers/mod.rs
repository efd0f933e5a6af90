//! Line-level drivers: the bit-banged converter, buzzer output and buttons.

pub mod adc0832;
pub mod button;
pub mod buzzer;
