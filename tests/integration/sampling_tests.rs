//! Integration tests for the sampling tick: ADC → filters → shared state
//! → photoperiod accounting.

use greenhouse::config::{ControlConfig, SystemConfig};
use greenhouse::filter::WINDOW;
use greenhouse::sampler::{Sampler, SamplingTask};
use greenhouse::sensors::{AnalogSensors, Channel, sim_set_adc};
use greenhouse::serial::command::dispatch;
use greenhouse::state::SharedState;

use super::mock_hw::MockAdc;

fn fill_window(sampler: &mut Sampler, adc: &mut MockAdc, shared: &SharedState) {
    for _ in 0..WINDOW {
        sampler.on_tick(adc, shared);
    }
}

#[test]
fn window_property_holds_after_n_ticks() {
    let shared = SharedState::new();
    let mut sampler = Sampler::new(&SystemConfig::default());
    let mut adc = MockAdc::new(4000, 17, 2222);

    // Any earlier history is fully displaced after exactly N ticks.
    for _ in 0..7 {
        sampler.on_tick(&mut MockAdc::new(123, 4095, 0), &shared);
    }
    fill_window(&mut sampler, &mut adc, &shared);

    let r = shared.readings.snapshot();
    assert_eq!((r.light, r.temperature, r.moisture), (4000, 17, 2222));
    assert_eq!(sampler.filters().light().running_sum(), 4000 * WINDOW as u32);
}

#[test]
fn light_boundary_inclusive_at_threshold() {
    for (code, expected) in [(1999, 10), (2000, 10), (2001, 0)] {
        let shared = SharedState::new();
        let mut sampler = Sampler::new(&SystemConfig::default());
        let mut adc = MockAdc::new(code, 0, 0);

        // Fill, then start a clean day on a second boundary.
        fill_window(&mut sampler, &mut adc, &shared);
        for _ in WINDOW..40 {
            sampler.on_tick(&mut adc, &shared);
        }
        dispatch(b"RESET,TIMER_LUZ", &shared);

        for _ in 0..100 {
            sampler.on_tick(&mut adc, &shared);
        }
        assert_eq!(
            shared.light_seconds_today(),
            expected,
            "filtered light {code} against threshold 2000"
        );
    }
}

#[test]
fn exactly_one_second_per_ten_ticks() {
    let shared = SharedState::with_config(ControlConfig {
        light_threshold: 4095,
        ..ControlConfig::default()
    });
    let mut sampler = Sampler::new(&SystemConfig::default());
    let mut adc = MockAdc::new(0, 0, 0);

    for tick in 1..=95u32 {
        sampler.on_tick(&mut adc, &shared);
        assert_eq!(shared.light_seconds_today(), tick / 10, "after tick {tick}");
    }
}

#[test]
fn threshold_change_takes_effect_on_next_second() {
    let shared = SharedState::new();
    let mut sampler = Sampler::new(&SystemConfig::default());
    let mut adc = MockAdc::new(3000, 0, 0);
    fill_window(&mut sampler, &mut adc, &shared);
    for _ in WINDOW..40 {
        sampler.on_tick(&mut adc, &shared);
    }
    dispatch(b"RESET,TIMER_LUZ", &shared);

    for _ in 0..10 {
        sampler.on_tick(&mut adc, &shared);
    }
    assert_eq!(shared.light_seconds_today(), 0, "3000 is dark at threshold 2000");

    dispatch(b"SET,LDR,3000", &shared);
    for _ in 0..10 {
        sampler.on_tick(&mut adc, &shared);
    }
    assert_eq!(shared.light_seconds_today(), 1);
}

#[test]
fn sampling_task_reads_the_simulated_adc() {
    static SHARED: SharedState = SharedState::new();
    sim_set_adc(Channel::Light, 640);
    sim_set_adc(Channel::Temperature, 1280);
    sim_set_adc(Channel::Moisture, 3200);

    let mut task = SamplingTask::new(
        Sampler::new(&SystemConfig::default()),
        AnalogSensors::new(),
        &SHARED,
    );
    for _ in 0..WINDOW {
        task.tick();
    }

    let r = SHARED.readings.snapshot();
    assert_eq!((r.light, r.temperature, r.moisture), (640, 1280, 3200));
    assert_eq!(task.sampler().ticks(), WINDOW as u32);
}
