//! Integration tests for the full control path:
//! host bytes → receive pump → mailbox → Controller → outputs / telemetry.
//!
//! A small rig advances simulated time in 1 ms steps, running the
//! sampling tick every 100 ms and the receive pump every 10 ms, the same
//! cadence the firmware timers use.

use greenhouse::app::events::AppEvent;
use greenhouse::app::service::Controller;
use greenhouse::config::{ControlConfig, SystemConfig};
use greenhouse::sampler::Sampler;
use greenhouse::serial::command::Command;
use greenhouse::serial::line::{CommandMailbox, ReceiveTask};
use greenhouse::serial::telemetry::{FRAME_LEN, FrameScanner, TelemetryFrame};
use greenhouse::state::SharedState;

use super::mock_hw::{MockAdc, MockHardware, MockLink, MockWatchdog, RecordingSink};

struct Rig<'a> {
    shared: &'a SharedState,
    sampler: Sampler,
    adc: MockAdc,
    rx: ReceiveTask<'a, MockLink>,
    ctl: Controller<'a>,
    hw: MockHardware,
    link: MockLink,
    dog: MockWatchdog,
    sink: RecordingSink,
    now_ms: u32,
}

impl<'a> Rig<'a> {
    fn new(shared: &'a SharedState, mailbox: &'a CommandMailbox, adc: MockAdc) -> Self {
        let system = SystemConfig::default();
        Self {
            shared,
            sampler: Sampler::new(&system),
            adc,
            rx: ReceiveTask::new(MockLink::new(), mailbox),
            ctl: Controller::new(shared, mailbox, &system),
            hw: MockHardware::new(),
            link: MockLink::new(),
            dog: MockWatchdog::default(),
            sink: RecordingSink::new(),
            now_ms: 0,
        }
    }

    fn host_sends(&mut self, bytes: &[u8]) {
        self.rx.transport_mut().host_sends(bytes);
    }

    fn step(&mut self) {
        self.now_ms += 1;
        if self.now_ms % 100 == 0 {
            self.sampler.on_tick(&mut self.adc, self.shared);
        }
        if self.now_ms % 10 == 0 {
            self.rx.pump();
        }
        self.ctl.poll(
            self.now_ms,
            &mut self.hw,
            &mut self.link,
            &mut self.dog,
            &mut self.sink,
        );
    }

    fn run_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            self.step();
        }
    }

    fn frames(&self) -> Vec<TelemetryFrame> {
        FrameScanner::new().extend(&self.link.tx)
    }
}

// ── Telemetry ─────────────────────────────────────────────────

#[test]
fn reference_frame_on_the_wire() {
    let shared = SharedState::with_config(ControlConfig {
        light_threshold: 500,
        photoperiod_enabled: true,
        daily_light_goal_secs: 100_000,
        ..ControlConfig::default()
    });
    shared.readings.publish(greenhouse::filter::FilteredReadings {
        light: 1000,
        temperature: 2000,
        moisture: 3000,
    });
    for _ in 0..90_000 {
        shared.count_light_second();
    }

    let mailbox = CommandMailbox::new();
    let mut ctl = Controller::new(&shared, &mailbox, &SystemConfig::default());
    let (mut hw, mut link, mut dog, mut sink) = (
        MockHardware::new(),
        MockLink::new(),
        MockWatchdog::default(),
        RecordingSink::new(),
    );

    ctl.poll(1000, &mut hw, &mut link, &mut dog, &mut sink);

    assert_eq!(
        link.tx,
        [0x03, 0xE8, 0x07, 0xD0, 0x0B, 0xB8, 0x01, 0x00, 0x01, 0x5F, 0x90, 0x76, 0xAA]
    );
    assert!(hw.grow_light_on());
    assert_eq!(link.flushes, 1);
    assert_eq!(dog.feeds, 1);
}

#[test]
fn one_frame_per_second_first_at_one_second() {
    let shared = SharedState::new();
    let mailbox = CommandMailbox::new();
    let mut rig = Rig::new(&shared, &mailbox, MockAdc::new(1000, 2000, 3000));

    rig.run_ms(999);
    assert!(rig.link.tx.is_empty());
    rig.run_ms(1);
    assert_eq!(rig.link.tx.len(), FRAME_LEN);

    rig.run_ms(4000);
    assert_eq!(rig.frames().len(), 5);
    assert_eq!(rig.dog.feeds, 5);
}

#[test]
fn telemetry_write_failure_still_feeds_watchdog() {
    let shared = SharedState::new();
    let mailbox = CommandMailbox::new();
    let mut rig = Rig::new(&shared, &mailbox, MockAdc::default());
    rig.link.fail_writes = true;

    rig.run_ms(3000);
    assert_eq!(rig.dog.feeds, 3);
    assert_eq!(rig.ctl.frames_sent(), 0);
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::TelemetryWriteFailed)),
        3
    );
}

#[test]
fn telemetry_tracks_filtered_values_after_window_fills() {
    let shared = SharedState::new();
    let mailbox = CommandMailbox::new();
    let mut rig = Rig::new(&shared, &mailbox, MockAdc::new(1000, 2000, 3000));

    // 32 ticks fill the window; the next frame carries exact values.
    rig.run_ms(4000);
    let last = *rig.frames().last().unwrap();
    assert_eq!((last.light, last.temperature, last.moisture), (1000, 2000, 3000));
}

// ── Commands ──────────────────────────────────────────────────

#[test]
fn set_humid_over_the_wire_switches_pump_at_strict_boundary() {
    let shared = SharedState::new();
    let mailbox = CommandMailbox::new();
    let mut rig = Rig::new(&shared, &mailbox, MockAdc::default());

    rig.host_sends(b"SET,HUMID,1234\n");
    rig.run_ms(10);
    assert_eq!(shared.config.snapshot().moisture_setpoint, 1234);

    shared.readings.publish(greenhouse::filter::FilteredReadings {
        light: 0,
        temperature: 4095,
        moisture: 1235,
    });
    rig.ctl
        .poll(rig.now_ms, &mut rig.hw, &mut rig.link, &mut rig.dog, &mut rig.sink);
    assert!(rig.hw.pump_on());

    shared.readings.publish(greenhouse::filter::FilteredReadings {
        light: 0,
        temperature: 4095,
        moisture: 1234,
    });
    rig.ctl
        .poll(rig.now_ms, &mut rig.hw, &mut rig.link, &mut rig.dog, &mut rig.sink);
    assert!(!rig.hw.pump_on());
}

#[test]
fn reset_timer_zeroes_counter_and_nothing_else() {
    let shared = SharedState::new();
    let mailbox = CommandMailbox::new();
    // Bright sun: every second counts.
    let mut rig = Rig::new(&shared, &mailbox, MockAdc::new(100, 2000, 3000));

    rig.host_sends(b"SET,TEMP,1700\r\n");
    rig.run_ms(5000);
    assert_eq!(shared.light_seconds_today(), 5);
    let before = shared.config.snapshot();

    rig.host_sends(b"RESET,TIMER_LUZ\n");
    rig.run_ms(10);
    assert_eq!(shared.light_seconds_today(), 0);
    assert_eq!(shared.config.snapshot(), before);
}

#[test]
fn malformed_input_changes_nothing_and_leaves_mailbox_empty() {
    let shared = SharedState::new();
    let mailbox = CommandMailbox::new();
    let mut rig = Rig::new(&shared, &mailbox, MockAdc::default());

    rig.host_sends(b"GARBAGE\n");
    rig.run_ms(20);
    rig.host_sends(b"set,humid,5\n");
    rig.run_ms(20);
    rig.host_sends(b"\xFF\x00\x01\n");
    rig.run_ms(20);

    assert_eq!(shared.config.snapshot(), ControlConfig::default());
    assert!(!mailbox.is_pending());
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::CommandIgnored { .. })),
        3
    );
}

#[test]
fn one_command_per_pump_window_while_pending() {
    let shared = SharedState::new();
    let mailbox = CommandMailbox::new();
    let mut rig = Rig::new(&shared, &mailbox, MockAdc::default());

    // Both lines complete inside one pump; the second is dropped.
    rig.host_sends(b"SET,LDR,111\nSET,LDR,222\n");
    rig.run_ms(10);
    assert_eq!(shared.config.light_threshold(), 111);
    assert_eq!(mailbox.dropped(), 1);

    // Sent in separate pump windows, both land.
    rig.host_sends(b"SET,LDR,333\n");
    rig.run_ms(10);
    rig.host_sends(b"SET,LDR,444\n");
    rig.run_ms(10);
    assert_eq!(shared.config.light_threshold(), 444);
}

#[test]
fn applied_commands_are_reported() {
    let shared = SharedState::new();
    let mailbox = CommandMailbox::new();
    let mut rig = Rig::new(&shared, &mailbox, MockAdc::default());

    rig.host_sends(Command::SetDailyLightGoal(3600).encode().as_bytes());
    rig.run_ms(10);
    assert!(
        rig.sink
            .events
            .contains(&AppEvent::CommandApplied(Command::SetDailyLightGoal(3600)))
    );
}

// ── Photoperiod + grow light ──────────────────────────────────

#[test]
fn grow_light_runs_until_daily_goal_then_stops() {
    let shared = SharedState::new();
    let mailbox = CommandMailbox::new();
    // Dark room.
    let mut rig = Rig::new(&shared, &mailbox, MockAdc::new(4095, 2000, 3000));

    // Let the window fill so the room reads dark, then start a fresh day.
    rig.run_ms(3200);
    rig.host_sends(b"SET,META_LUZ,5\n");
    rig.run_ms(10);
    rig.host_sends(b"RESET,TIMER_LUZ\n");
    rig.run_ms(10);
    rig.host_sends(b"SET,FOTO,1\n");
    rig.run_ms(10);
    assert_eq!(shared.light_seconds_today(), 0);
    assert!(rig.hw.grow_light_on());

    // The lamp itself counts as light.
    rig.run_ms(6000);
    assert_eq!(shared.light_seconds_today(), 5);
    assert!(!rig.hw.grow_light_on());

    // Frames at 4 s..7 s report the lamp; at 8 s the goal is met first.
    let lamp_frames = rig
        .sink
        .count(|e| matches!(e, AppEvent::TelemetrySent(f) if f.grow_light_on));
    assert_eq!(lamp_frames, 4);
}

#[test]
fn fan_follows_temperature_with_inverted_sensor() {
    let shared = SharedState::new();
    let mailbox = CommandMailbox::new();
    // Code 1000 < setpoint 1600: hotter than the setpoint.
    let mut rig = Rig::new(&shared, &mailbox, MockAdc::new(4095, 1000, 3000));

    rig.run_ms(3300);
    assert!(rig.hw.fan_on());

    rig.adc.temperature = 2500;
    rig.run_ms(3300);
    assert!(!rig.hw.fan_on());
}
