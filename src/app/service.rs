//! Application service: the main-loop core.
//!
//! [`Controller`] runs one cooperative pass per call to [`poll`]. All I/O
//! flows through port traits injected at the call site, so the whole pass
//! is testable with mock adapters.
//!
//! ```text
//!  CommandMailbox ──▶ ┌────────────────────────┐ ──▶ ActuatorPort
//!                     │       Controller       │ ──▶ Transport (telemetry)
//!   SharedState  ◀──▶ │ command · policy · tlm │ ──▶ LivenessPort
//!                     └────────────────────────┘ ──▶ EventSink
//! ```
//!
//! [`poll`]: Controller::poll

use log::{info, warn};

use crate::config::{SensorPolarity, SystemConfig};
use crate::control::policy::{self, ActuatorCommands};
use crate::serial::command;
use crate::serial::line::CommandMailbox;
use crate::serial::telemetry::{TelemetryFrame, TelemetryGate, FRAME_LEN};
use crate::state::SharedState;

use super::events::AppEvent;
use super::ports::{ActuatorPort, EventSink, LivenessPort, Transport};

// ───────────────────────────────────────────────────────────────
// Controller
// ───────────────────────────────────────────────────────────────

/// Main-loop state: everything the pass needs that is not shared with the
/// interrupt-like contexts.
pub struct Controller<'a> {
    shared: &'a SharedState,
    mailbox: &'a CommandMailbox,
    polarity: SensorPolarity,
    gate: TelemetryGate,
    outputs: ActuatorCommands,
    reported_drops: u32,
    passes: u64,
    frames_sent: u32,
}

impl<'a> Controller<'a> {
    pub fn new(shared: &'a SharedState, mailbox: &'a CommandMailbox, system: &SystemConfig) -> Self {
        Self {
            shared,
            mailbox,
            polarity: system.polarity,
            gate: TelemetryGate::new(system.telemetry_interval_ms),
            outputs: ActuatorCommands::default(),
            reported_drops: 0,
            passes: 0,
            frames_sent: 0,
        }
    }

    // ── Per-pass orchestration ────────────────────────────────

    /// Run one main-loop pass: command → outputs → telemetry.
    ///
    /// A command received in this pass is always visible to the policy
    /// evaluated in the same pass.
    pub fn poll(
        &mut self,
        now_ms: u32,
        hw: &mut impl ActuatorPort,
        serial: &mut impl Transport,
        watchdog: &mut impl LivenessPort,
        sink: &mut impl EventSink,
    ) {
        self.passes += 1;

        // 1. Pending command line
        self.process_command(sink);

        // 2. Actuator policy
        self.drive_outputs(hw, sink);

        // 3. Telemetry + liveness
        if self.gate.poll(now_ms) {
            self.send_telemetry(serial, sink);
            watchdog.feed();
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Outputs as driven on the last pass.
    pub fn outputs(&self) -> ActuatorCommands {
        self.outputs
    }

    /// Passes executed since boot.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Telemetry frames written successfully.
    pub fn frames_sent(&self) -> u32 {
        self.frames_sent
    }

    /// Frame for the current state, exactly as the next emission would
    /// build it.
    pub fn build_telemetry(&self) -> TelemetryFrame {
        let readings = self.shared.readings.snapshot();
        TelemetryFrame {
            light: readings.light,
            temperature: readings.temperature,
            moisture: readings.moisture,
            grow_light_on: self.shared.outputs.grow_light_on(),
            light_seconds: self.shared.light_seconds_today(),
        }
    }

    // ── Internal ──────────────────────────────────────────────

    fn process_command(&mut self, sink: &mut impl EventSink) {
        let dropped = self.mailbox.dropped();
        if dropped != self.reported_drops {
            warn!(
                "{} command line(s) dropped while one was pending",
                dropped.wrapping_sub(self.reported_drops)
            );
            self.reported_drops = dropped;
            sink.emit(&AppEvent::CommandsDropped { total: dropped });
        }

        let Some(line) = self.mailbox.take() else {
            return;
        };

        match command::dispatch(line.as_bytes(), self.shared) {
            Some(cmd) => {
                info!("Command applied: {}", cmd);
                sink.emit(&AppEvent::CommandApplied(cmd));
            }
            None => {
                sink.emit(&AppEvent::CommandIgnored { len: line.len() });
            }
        }
    }

    fn drive_outputs(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        let next = policy::evaluate(
            &self.shared.readings.snapshot(),
            &self.shared.config.snapshot(),
            self.shared.light_seconds_today(),
            &self.polarity,
        );

        hw.set_pump(next.pump);
        hw.set_fan(next.fan);
        hw.set_grow_light(next.grow_light);
        self.shared.outputs.publish(next);

        if next != self.outputs {
            sink.emit(&AppEvent::OutputsChanged {
                from: self.outputs,
                to: next,
            });
            self.outputs = next;
        }
    }

    fn send_telemetry(&mut self, serial: &mut impl Transport, sink: &mut impl EventSink) {
        let frame = self.build_telemetry();
        let bytes = frame.encode();

        let written = serial.write(&bytes).and_then(|n| serial.flush().map(|()| n));
        match written {
            Ok(FRAME_LEN) => {
                self.frames_sent = self.frames_sent.wrapping_add(1);
                sink.emit(&AppEvent::TelemetrySent(frame));
            }
            Ok(n) => {
                warn!("Telemetry short write ({}/{} bytes)", n, FRAME_LEN);
                sink.emit(&AppEvent::TelemetryWriteFailed);
            }
            Err(e) => {
                warn!("Telemetry write failed: {}", e);
                sink.emit(&AppEvent::TelemetryWriteFailed);
            }
        }
    }
}
