//! Outbound application events.
//!
//! The [`Controller`](super::service::Controller) emits these through the
//! [`EventSink`](super::ports::EventSink) port. They are diagnostics only;
//! nothing here goes back out on the command link.

use crate::control::policy::ActuatorCommands;
use crate::serial::command::Command;
use crate::serial::telemetry::TelemetryFrame;

/// Structured events emitted by the control core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// A command line was recognised and applied.
    CommandApplied(Command),

    /// A command line matched no pattern and was ignored.
    CommandIgnored { len: usize },

    /// Lines lost because one was already pending (`total` since boot).
    CommandsDropped { total: u32 },

    /// At least one actuator output changed level.
    OutputsChanged {
        from: ActuatorCommands,
        to: ActuatorCommands,
    },

    /// A telemetry frame went out.
    TelemetrySent(TelemetryFrame),

    /// Writing the telemetry frame failed (the watchdog is still fed).
    TelemetryWriteFailed,
}
