//! Greenhouse Controller Firmware: Main Entry Point
//!
//! Three execution contexts, one shared state:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │  esp_timer task                                                │
//! │    sample  (100 ms) ── SamplingTask ──▶ SharedState.readings   │
//! │                                      └─▶ light_seconds_today   │
//! │    uart_rx ( 10 ms) ── ReceiveTask  ──▶ CommandMailbox         │
//! │                                                                │
//! │  ──────────────── SharedState / CommandMailbox ─────────────   │
//! │                                                                │
//! │  main task (cooperative super-loop, 1 ms yield)                │
//! │    Controller::poll: command → outputs → telemetry + TWDT feed │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use log::info;
use static_cell::StaticCell;

use greenhouse::adapters::hardware::HardwareAdapter;
use greenhouse::adapters::log_sink::LogEventSink;
use greenhouse::adapters::time::Esp32TimeAdapter;
use greenhouse::adapters::uart::UartTransport;
use greenhouse::app::ports::ClockPort;
use greenhouse::app::service::Controller;
use greenhouse::config::SystemConfig;
use greenhouse::drivers::hw_timer::start_periodic;
use greenhouse::drivers::watchdog::Watchdog;
use greenhouse::drivers::hw_init;
use greenhouse::error::Error;
use greenhouse::sampler::{Sampler, SamplingTask};
use greenhouse::sensors::AnalogSensors;
use greenhouse::serial::line::{CommandMailbox, ReceiveTask};
use greenhouse::state::SharedState;

// ── Cross-context statics ─────────────────────────────────────

static SHARED: SharedState = SharedState::new();
static MAILBOX: CommandMailbox = CommandMailbox::new();

static SAMPLING_TASK: StaticCell<SamplingTask<AnalogSensors>> = StaticCell::new();
static RECEIVE_TASK: StaticCell<ReceiveTask<'static, UartTransport>> = StaticCell::new();

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Greenhouse v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let system = SystemConfig::default();
    info!("System config: {}", serde_json::to_string(&system)?);
    info!("Control config: {}", serde_json::to_string(&SHARED.config.snapshot())?);

    // ── 2. Peripherals: ADC, outputs (all low), UART ──────────
    hw_init::init_peripherals(system.uart_baud).map_err(Error::from)?;
    let mut hw = HardwareAdapter::new();

    // ── 3. Watchdog ───────────────────────────────────────────
    let mut watchdog = Watchdog::new(system.watchdog_timeout_ms);

    // ── 4. Asynchronous producers ─────────────────────────────
    let sampling = SAMPLING_TASK.init(SamplingTask::new(
        Sampler::new(&system),
        AnalogSensors::new(),
        &SHARED,
    ));
    let _sample_timer = start_periodic(c"sample", system.sample_period_ms, sampling)?;

    let receiver = RECEIVE_TASK.init(ReceiveTask::new(UartTransport::new(), &MAILBOX));
    let _rx_timer = start_periodic(c"uart_rx", system.rx_poll_period_ms, receiver)?;

    // ── 5. Main loop ──────────────────────────────────────────
    let clock = Esp32TimeAdapter::new();
    let mut uart = UartTransport::new();
    let mut sink = LogEventSink::new();
    let mut controller = Controller::new(&SHARED, &MAILBOX, &system);

    info!("System ready. Entering control loop.");

    loop {
        controller.poll(clock.now_ms(), &mut hw, &mut uart, &mut watchdog, &mut sink);
        FreeRtos::delay_ms(system.loop_yield_ms);
    }
}
