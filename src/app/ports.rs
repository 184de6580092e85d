//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Controller / Sampler (domain)
//! ```
//!
//! Driven adapters (ADC, output pins, watchdog, clock, event sinks)
//! implement these traits. The domain consumes them via generics, so the
//! control core never touches hardware directly.

use crate::sensors::Channel;

pub use crate::serial::transport::Transport;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port used by the sampling tick.
///
/// Called from the timer context: implementations must not block or log.
pub trait SensorPort {
    /// One raw conversion (12-bit code, 0–4095).
    fn read(&mut self, channel: Channel) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the three binary outputs.
///
/// Driven on every main-loop pass whether or not the level changed.
pub trait ActuatorPort {
    fn set_pump(&mut self, on: bool);
    fn set_fan(&mut self, on: bool);
    fn set_grow_light(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Liveness port (driven adapter: domain → watchdog)
// ───────────────────────────────────────────────────────────────

/// Proof of progress for the hardware watchdog.
pub trait LivenessPort {
    fn feed(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock. Wraps after ~49.7 days.
pub trait ClockPort {
    fn now_ms(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
