//! Integration tests for the sample → convert → decide → buzzer pipeline,
//! driven against the simulated converter.

use crate::mock_hw::{RecordingSink, ShortSleep, SimPort, StopAfter};

use thermalarm::alarm::AlarmState;
use thermalarm::app::controls::MonitorControls;
use thermalarm::app::events::MonitorEvent;
use thermalarm::app::service::MonitorService;
use thermalarm::config::MonitorConfig;
use thermalarm::drivers::adc0832::AdcPins;
use thermalarm::error::{ConversionFault, Error, IoFault};
use thermalarm::sensors::light::Light;

const ROOM_TEMP_C: f64 = 24.8236;
const MID_THRESHOLD_C: f64 = -0.196_078;

fn sim(config: &MonitorConfig, ch0: u8, ch1: u8) -> SimPort {
    let mut port = SimPort::new(AdcPins::from(&config.pins));
    port.set_samples(ch0, ch1);
    port
}

fn armed() -> MonitorConfig {
    MonitorConfig {
        start_armed: true,
        ..MonitorConfig::default()
    }
}

fn with_buttons() -> MonitorConfig {
    let mut config = MonitorConfig::default();
    config.pins.arm_button = Some(25);
    config.pins.disarm_button = Some(27);
    config
}

// ── Single cycle ──────────────────────────────────────────────

#[test]
fn mid_scale_cycle_reads_room_temperature_and_sounds_when_armed() {
    let config = armed();
    let controls = MonitorControls::new();
    let mut svc = MonitorService::new(&config, &controls).unwrap();
    let mut port = sim(&config, 128, 128);
    let mut sink = RecordingSink::new();

    let snap = svc.tick(&mut port, &mut sink).unwrap();

    let t = snap.temperature_celsius.expect("valid temperature");
    assert!((t - ROOM_TEMP_C).abs() < 1e-3, "got {t}");
    assert!((snap.threshold_celsius - MID_THRESHOLD_C).abs() < 1e-4);
    assert!(snap.buzzer_on);
    assert!(port.level(config.pins.buzzer));
    assert_eq!(snap.raw.temperature, 128);
    assert_eq!(snap.raw.threshold, 128);
    assert_eq!(snap.cycle, 1);
    assert_eq!(port.conversions(), 2);

    assert_eq!(controls.snapshot(), Some(snap));
    assert_eq!(
        sink.events,
        vec![MonitorEvent::BuzzerChanged(true), MonitorEvent::Sample(snap)]
    );
}

#[test]
fn disarmed_never_sounds() {
    let config = MonitorConfig::default();
    let controls = MonitorControls::new();
    let mut svc = MonitorService::new(&config, &controls).unwrap();
    // Lowest threshold, warm room.
    let mut port = sim(&config, 128, 255);
    let mut sink = RecordingSink::new();

    for _ in 0..3 {
        let snap = svc.tick(&mut port, &mut sink).unwrap();
        assert!(!snap.buzzer_on);
        assert_eq!(snap.alarm_state, AlarmState::Disarmed);
    }
    assert!(!port.level(config.pins.buzzer));
    assert_eq!(sink.count(|e| matches!(e, MonitorEvent::BuzzerChanged(_))), 0);
}

#[test]
fn armed_below_threshold_stays_silent() {
    let mut config = armed();
    // Every pot code maps into 40–41 °C, well above room temperature.
    config.threshold.min_c = 40.0;
    config.threshold.max_c = 41.0;
    let controls = MonitorControls::new();
    let mut svc = MonitorService::new(&config, &controls).unwrap();
    let mut port = sim(&config, 128, 128);
    let mut sink = RecordingSink::new();

    let snap = svc.tick(&mut port, &mut sink).unwrap();
    assert!(snap.temperature_celsius.unwrap() < snap.threshold_celsius);
    assert!(!snap.buzzer_on);
}

#[test]
fn light_channel_follows_config() {
    let config = MonitorConfig::default();
    let controls = MonitorControls::new();
    let mut svc = MonitorService::new(&config, &controls).unwrap();
    let mut sink = RecordingSink::new();

    let mut port = sim(&config, 10, 200);
    assert_eq!(svc.tick(&mut port, &mut sink).unwrap().light, Light::Light);

    port.set_samples(250, 10);
    assert_eq!(svc.tick(&mut port, &mut sink).unwrap().light, Light::Dark);
}

// ── Conversion faults ─────────────────────────────────────────

#[test]
fn saturated_sample_keeps_previous_reading() {
    let config = armed();
    let controls = MonitorControls::new();
    let mut svc = MonitorService::new(&config, &controls).unwrap();
    let mut port = sim(&config, 128, 128);
    let mut sink = RecordingSink::new();

    let good = svc.tick(&mut port, &mut sink).unwrap();

    port.set_samples(255, 0);
    let held = svc.tick(&mut port, &mut sink).unwrap();

    assert_eq!(held.temperature_celsius, good.temperature_celsius);
    assert_eq!(held.threshold_celsius, good.threshold_celsius);
    assert!(held.buzzer_on);
    assert_eq!(held.raw.temperature, 255);
    assert_eq!(held.raw.threshold, 0);
    assert_eq!(held.cycle, 2);
    assert!(sink
        .events
        .contains(&MonitorEvent::ConversionFault(ConversionFault::SaturatedInput)));

    // Recovery picks up the new threshold again.
    port.set_samples(128, 0);
    let fresh = svc.tick(&mut port, &mut sink).unwrap();
    assert!((fresh.threshold_celsius - 50.0).abs() < 1e-9);
    assert!(!fresh.buzzer_on);
}

#[test]
fn no_valid_reading_yet_is_silent_even_when_armed() {
    let config = armed();
    let controls = MonitorControls::new();
    let mut svc = MonitorService::new(&config, &controls).unwrap();
    let mut port = sim(&config, 0, 128);
    let mut sink = RecordingSink::new();

    let snap = svc.tick(&mut port, &mut sink).unwrap();

    assert_eq!(snap.temperature_celsius, None);
    assert_eq!(snap.threshold_celsius, 0.0);
    assert!(!snap.buzzer_on);
    assert_eq!(
        sink.events[0],
        MonitorEvent::ConversionFault(ConversionFault::NonPositiveResistance)
    );
}

#[test]
fn stuck_sensor_reports_one_fault_per_streak() {
    let config = MonitorConfig::default();
    let controls = MonitorControls::new();
    let mut svc = MonitorService::new(&config, &controls).unwrap();
    let mut port = sim(&config, 255, 128);
    let mut sink = RecordingSink::new();
    let faults = |sink: &RecordingSink| sink.count(|e| matches!(e, MonitorEvent::ConversionFault(_)));

    for _ in 0..5 {
        svc.tick(&mut port, &mut sink).unwrap();
    }
    assert_eq!(faults(&sink), 1);
    assert_eq!(sink.samples(), 5);

    // A good reading ends the streak; the next fault is reported again.
    port.set_samples(128, 128);
    svc.tick(&mut port, &mut sink).unwrap();
    port.set_samples(0, 128);
    for _ in 0..3 {
        svc.tick(&mut port, &mut sink).unwrap();
    }
    assert_eq!(faults(&sink), 2);
}

// ── Commands ──────────────────────────────────────────────────

#[test]
fn queued_arm_applies_before_the_decision() {
    let config = MonitorConfig::default();
    let controls = MonitorControls::new();
    let mut svc = MonitorService::new(&config, &controls).unwrap();
    let mut port = sim(&config, 128, 128);
    let mut sink = RecordingSink::new();

    controls.arm();
    let snap = svc.tick(&mut port, &mut sink).unwrap();

    assert_eq!(snap.alarm_state, AlarmState::Armed);
    assert!(snap.buzzer_on);
    assert_eq!(
        sink.events[0],
        MonitorEvent::AlarmChanged {
            from: AlarmState::Disarmed,
            to: AlarmState::Armed,
        }
    );
}

#[test]
fn latest_command_wins() {
    let config = MonitorConfig::default();
    let controls = MonitorControls::new();
    let mut svc = MonitorService::new(&config, &controls).unwrap();
    let mut port = sim(&config, 128, 128);
    let mut sink = RecordingSink::new();

    controls.arm();
    controls.disarm();
    let snap = svc.tick(&mut port, &mut sink).unwrap();
    assert_eq!(snap.alarm_state, AlarmState::Disarmed);
    assert!(!snap.buzzer_on);

    controls.toggle();
    controls.toggle();
    controls.toggle();
    assert_eq!(svc.tick(&mut port, &mut sink).unwrap().alarm_state, AlarmState::Armed);
}

#[test]
fn disarm_silences_on_the_next_cycle() {
    let config = armed();
    let controls = MonitorControls::new();
    let mut svc = MonitorService::new(&config, &controls).unwrap();
    let mut port = sim(&config, 128, 128);
    let mut sink = RecordingSink::new();

    assert!(svc.tick(&mut port, &mut sink).unwrap().buzzer_on);
    controls.disarm();
    assert!(!svc.tick(&mut port, &mut sink).unwrap().buzzer_on);
    assert!(!port.level(config.pins.buzzer));
    assert!(sink.events.contains(&MonitorEvent::BuzzerChanged(false)));
}

#[test]
fn buttons_arm_and_disarm_on_press() {
    let config = with_buttons();
    let controls = MonitorControls::new();
    let mut svc = MonitorService::new(&config, &controls).unwrap();
    let mut port = sim(&config, 128, 128);
    let mut sink = RecordingSink::new();
    port.set_input(25, true);
    port.set_input(27, true);

    assert_eq!(svc.tick(&mut port, &mut sink).unwrap().alarm_state, AlarmState::Disarmed);

    // Press and hold arm: one transition only.
    port.set_input(25, false);
    assert_eq!(svc.tick(&mut port, &mut sink).unwrap().alarm_state, AlarmState::Armed);
    assert_eq!(svc.tick(&mut port, &mut sink).unwrap().alarm_state, AlarmState::Armed);
    port.set_input(25, true);

    port.set_input(27, false);
    assert_eq!(svc.tick(&mut port, &mut sink).unwrap().alarm_state, AlarmState::Disarmed);

    assert_eq!(sink.count(|e| matches!(e, MonitorEvent::AlarmChanged { .. })), 2);
}

#[test]
fn entered_threshold_overrides_pot_until_cleared() {
    let config = armed();
    let controls = MonitorControls::new();
    let mut svc = MonitorService::new(&config, &controls).unwrap();
    let mut port = sim(&config, 128, 128);
    let mut sink = RecordingSink::new();

    assert!(svc.tick(&mut port, &mut sink).unwrap().buzzer_on);

    controls.set_threshold(30.0);
    let snap = svc.tick(&mut port, &mut sink).unwrap();
    assert_eq!(snap.threshold_celsius, 30.0);
    assert!(!snap.buzzer_on);

    // Clamped into the configured range.
    controls.set_threshold(500.0);
    assert_eq!(svc.tick(&mut port, &mut sink).unwrap().threshold_celsius, 50.0);

    controls.clear_threshold();
    let snap = svc.tick(&mut port, &mut sink).unwrap();
    assert!((snap.threshold_celsius - MID_THRESHOLD_C).abs() < 1e-4);
    assert!(snap.buzzer_on);
}

// ── Run loop lifecycle ────────────────────────────────────────

#[test]
fn stop_silences_buzzer_and_releases_lines() {
    let config = armed();
    let controls = MonitorControls::new();
    let mut svc = MonitorService::new(&config, &controls).unwrap();
    let mut port = sim(&config, 128, 128);
    let mut sink = RecordingSink::new();
    let mut delay = StopAfter::new(&controls, 3);

    svc.run(&mut port, &mut delay, &mut sink).unwrap();

    assert_eq!(svc.cycle(), 3);
    assert_eq!(delay.waits_ms, vec![config.sample_period_ms; 3]);
    assert_eq!(sink.samples(), 3);

    let pins = config.pins;
    assert!(!port.level(pins.buzzer));
    assert!(port.level(pins.chip_select));
    assert!(!port.level(pins.clock));
    assert!(!port.level(pins.data_in));

    assert_eq!(sink.events.first(), Some(&MonitorEvent::Started(AlarmState::Armed)));
    let tail = &sink.events[sink.events.len() - 2..];
    assert_eq!(tail, &[MonitorEvent::BuzzerChanged(false), MonitorEvent::Stopped]);
}

#[test]
fn stop_before_run_takes_no_sample() {
    let config = MonitorConfig::default();
    let controls = MonitorControls::new();
    let mut svc = MonitorService::new(&config, &controls).unwrap();
    let mut port = sim(&config, 128, 128);
    let mut sink = RecordingSink::new();
    let mut delay = StopAfter::new(&controls, 1);

    controls.stop();
    svc.run(&mut port, &mut delay, &mut sink).unwrap();

    assert_eq!(svc.cycle(), 0);
    assert_eq!(port.conversions(), 0);
    assert!(delay.waits_ms.is_empty());
    assert_eq!(controls.snapshot(), None);
    assert_eq!(
        sink.events,
        vec![MonitorEvent::Started(AlarmState::Disarmed), MonitorEvent::Stopped]
    );
}

#[test]
fn line_failure_ends_loop_and_is_reported_once() {
    let config = MonitorConfig::default();
    let controls = MonitorControls::new();
    let mut svc = MonitorService::new(&config, &controls).unwrap();
    let mut port = sim(&config, 128, 128);
    let mut sink = RecordingSink::new();
    let mut delay = StopAfter::new(&controls, 100);

    // Dies in the middle of the first cycle's second conversion.
    port.fail_after(40);
    let result = svc.run(&mut port, &mut delay, &mut sink);

    assert_eq!(result, Err(Error::Io(IoFault::Unavailable)));
    assert_eq!(sink.count(|e| matches!(e, MonitorEvent::IoFault(_))), 1);
    assert_eq!(sink.samples(), 0);
    assert!(!sink.events.contains(&MonitorEvent::Stopped));
    assert_eq!(controls.snapshot(), None);
}

#[test]
fn failure_while_parking_lines_is_reported_once() {
    let config = armed();
    let controls = MonitorControls::new();
    let mut svc = MonitorService::new(&config, &controls).unwrap();
    let mut port = sim(&config, 128, 128);
    let mut sink = RecordingSink::new();
    let mut delay = StopAfter::new(&controls, 1);

    // One full cycle (two conversions plus the buzzer write), then the
    // port dies before shutdown.
    port.fail_after(75);
    let result = svc.run(&mut port, &mut delay, &mut sink);

    assert_eq!(result, Err(Error::Io(IoFault::Unavailable)));
    assert_eq!(svc.cycle(), 1);
    assert_eq!(sink.samples(), 1);
    assert_eq!(
        sink.events.last(),
        Some(&MonitorEvent::IoFault(IoFault::Unavailable))
    );
    assert_eq!(sink.count(|e| matches!(e, MonitorEvent::IoFault(_))), 1);
    assert!(!sink.events.contains(&MonitorEvent::Stopped));
}

#[test]
fn shutdown_releases_lines_even_if_buzzer_fails() {
    let config = armed();
    let controls = MonitorControls::new();
    let mut svc = MonitorService::new(&config, &controls).unwrap();
    let mut port = sim(&config, 128, 128);
    let mut sink = RecordingSink::new();

    svc.tick(&mut port, &mut sink).unwrap();
    // The channel-1 address leaves DI high.
    assert!(port.level(config.pins.data_in));

    port.fail_pin(config.pins.buzzer);
    assert_eq!(svc.shutdown(&mut port), Err(IoFault::Unavailable));

    assert!(port.level(config.pins.chip_select));
    assert!(!port.level(config.pins.clock));
    assert!(!port.level(config.pins.data_in));
}

#[test]
fn buzzer_line_failure_is_an_io_fault() {
    let config = armed();
    let controls = MonitorControls::new();
    let mut svc = MonitorService::new(&config, &controls).unwrap();
    let mut port = sim(&config, 128, 128);
    let mut sink = RecordingSink::new();

    port.fail_pin(config.pins.buzzer);
    assert_eq!(
        svc.tick(&mut port, &mut sink),
        Err(Error::Io(IoFault::Unavailable))
    );
}

#[test]
fn commands_from_another_thread_reach_the_loop() {
    let config = MonitorConfig::default();
    let controls = MonitorControls::new();
    let mut svc = MonitorService::new(&config, &controls).unwrap();
    let mut port = sim(&config, 128, 128);
    let mut sink = RecordingSink::new();
    let mut delay = ShortSleep::new(5_000);

    let result = std::thread::scope(|s| {
        s.spawn(|| {
            while controls.snapshot().is_none() {
                std::thread::yield_now();
            }
            controls.arm();
            while !controls.snapshot().is_some_and(|snap| snap.buzzer_on) {
                std::thread::yield_now();
            }
            controls.stop();
        });
        svc.run(&mut port, &mut delay, &mut sink)
    });

    assert_eq!(result, Ok(()));
    assert_eq!(svc.alarm_state(), AlarmState::Armed);
    assert!(!port.level(config.pins.buzzer));
    assert_eq!(sink.events.last(), Some(&MonitorEvent::Stopped));
}
