//! Mock hardware adapters for integration tests.
//!
//! Records every actuator call and every byte written to the link so
//! tests can assert on the full history without touching real GPIO.

use std::collections::VecDeque;

use greenhouse::app::events::AppEvent;
use greenhouse::app::ports::{ActuatorPort, EventSink, LivenessPort, SensorPort, Transport};
use greenhouse::sensors::Channel;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    Pump(bool),
    Fan(bool),
    GrowLight(bool),
}

// ── MockHardware ──────────────────────────────────────────────

#[derive(Default)]
pub struct MockHardware {
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self::default()
    }

    fn last(&self, pick: fn(&ActuatorCall) -> Option<bool>) -> bool {
        self.calls.iter().rev().find_map(pick).unwrap_or(false)
    }

    pub fn pump_on(&self) -> bool {
        self.last(|c| match c {
            ActuatorCall::Pump(on) => Some(*on),
            _ => None,
        })
    }

    pub fn fan_on(&self) -> bool {
        self.last(|c| match c {
            ActuatorCall::Fan(on) => Some(*on),
            _ => None,
        })
    }

    pub fn grow_light_on(&self) -> bool {
        self.last(|c| match c {
            ActuatorCall::GrowLight(on) => Some(*on),
            _ => None,
        })
    }
}

impl ActuatorPort for MockHardware {
    fn set_pump(&mut self, on: bool) {
        self.calls.push(ActuatorCall::Pump(on));
    }

    fn set_fan(&mut self, on: bool) {
        self.calls.push(ActuatorCall::Fan(on));
    }

    fn set_grow_light(&mut self, on: bool) {
        self.calls.push(ActuatorCall::GrowLight(on));
    }
}

// ── MockAdc ───────────────────────────────────────────────────

/// Returns a fixed code per channel; tests change them between ticks.
#[derive(Default)]
pub struct MockAdc {
    pub light: u16,
    pub temperature: u16,
    pub moisture: u16,
}

#[allow(dead_code)]
impl MockAdc {
    pub fn new(light: u16, temperature: u16, moisture: u16) -> Self {
        Self {
            light,
            temperature,
            moisture,
        }
    }
}

impl SensorPort for MockAdc {
    fn read(&mut self, channel: Channel) -> u16 {
        match channel {
            Channel::Light => self.light,
            Channel::Temperature => self.temperature,
            Channel::Moisture => self.moisture,
        }
    }
}

// ── MockLink ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkDown;

impl core::fmt::Display for LinkDown {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("link down")
    }
}

/// Serial link double: `rx` is what the host sent, `tx` what we wrote.
#[derive(Default)]
pub struct MockLink {
    pub rx: VecDeque<u8>,
    pub tx: Vec<u8>,
    pub fail_writes: bool,
    pub flushes: u32,
}

#[allow(dead_code)]
impl MockLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn host_sends(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes.iter().copied());
    }
}

impl Transport for MockLink {
    type Error = LinkDown;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, LinkDown> {
        let n = buf.len().min(self.rx.len());
        for slot in buf.iter_mut().take(n) {
            *slot = self.rx.pop_front().unwrap_or(0);
        }
        Ok(n)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, LinkDown> {
        if self.fail_writes {
            return Err(LinkDown);
        }
        self.tx.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), LinkDown> {
        self.flushes += 1;
        Ok(())
    }

    fn available(&self) -> bool {
        !self.rx.is_empty()
    }
}

// ── MockWatchdog ──────────────────────────────────────────────

#[derive(Default)]
pub struct MockWatchdog {
    pub feeds: u32,
}

impl LivenessPort for MockWatchdog {
    fn feed(&mut self) {
        self.feeds += 1;
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
