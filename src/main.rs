//! Thermalarm firmware entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │   HalPort (esp-idf PinDriver)        LogEventSink        │
//! │                                                          │
//! │   ───────────── Port Trait Boundary ──────────────       │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │         MonitorService (pure logic)                │  │
//! │  │  ADC0832 · Thermistor · Threshold · Alarm          │  │
//! │  └────────────────────────────────────────────────────┘  │
//! │                                                          │
//! │   MonitorControls (static): commands · stop · snapshot   │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyInputPin, AnyOutputPin, Input, InputPin, Output, OutputPin, PinDriver, Pull};
use esp_idf_hal::peripherals::Peripherals;
use log::info;

use thermalarm::adapters::hal_port::HalPort;
use thermalarm::adapters::log_sink::LogEventSink;
use thermalarm::app::controls::MonitorControls;
use thermalarm::app::service::MonitorService;
use thermalarm::config::MonitorConfig;
use thermalarm::pins;

type OutLine = PinDriver<'static, AnyOutputPin, Output>;
type InLine = PinDriver<'static, AnyInputPin, Input>;

/// Shared with anything that wants to arm, disarm or read the latest sample.
static CONTROLS: MonitorControls = MonitorControls::new();

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("Thermalarm v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let mut config = MonitorConfig::default();
    config.pins.arm_button = Some(pins::ARM_BUTTON_GPIO);
    config.pins.disarm_button = Some(pins::DISARM_BUTTON_GPIO);
    config.validate()?;

    // ── 3. GPIO ───────────────────────────────────────────────
    let p = Peripherals::take()?;
    let gpio = p.pins;

    let mut arm = PinDriver::input(gpio.gpio25.downgrade_input())?;
    arm.set_pull(Pull::Up)?;
    let mut disarm = PinDriver::input(gpio.gpio27.downgrade_input())?;
    disarm.set_pull(Pull::Up)?;

    let mut port: HalPort<OutLine, InLine> = HalPort::new()
        .with_output(pins::ADC_CLK_GPIO, PinDriver::output(gpio.gpio16.downgrade_output())?)?
        .with_output(pins::ADC_DI_GPIO, PinDriver::output(gpio.gpio19.downgrade_output())?)?
        .with_output(pins::ADC_CS_GPIO, PinDriver::output(gpio.gpio13.downgrade_output())?)?
        .with_output(pins::BUZZER_GPIO, PinDriver::output(gpio.gpio21.downgrade_output())?)?
        .with_input(pins::ADC_DO_GPIO, PinDriver::input(gpio.gpio26.downgrade_input())?)?
        .with_input(pins::ARM_BUTTON_GPIO, arm)?
        .with_input(pins::DISARM_BUTTON_GPIO, disarm)?;

    // ── 4. Run ────────────────────────────────────────────────
    let mut service = MonitorService::new(&config, &CONTROLS)?;
    let mut sink = LogEventSink::new();
    let mut delay = FreeRtos;

    service.run(&mut port, &mut delay, &mut sink)?;
    Ok(())
}
