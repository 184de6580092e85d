//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART0 console in production, never the host link).

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "off" }
}

/// Adapter that logs every [`AppEvent`] to the console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::TelemetrySent(t) => {
                info!(
                    "TELEM | light={} temp={} moist={} | lamp={} | lit={}s",
                    t.light,
                    t.temperature,
                    t.moisture,
                    on_off(t.grow_light_on),
                    t.light_seconds,
                );
            }
            AppEvent::TelemetryWriteFailed => {
                warn!("TELEM | write failed");
            }
            AppEvent::CommandApplied(cmd) => {
                info!("CMD   | {}", cmd);
            }
            AppEvent::CommandIgnored { len } => {
                debug!("CMD   | ignored {}-byte line", len);
            }
            AppEvent::CommandsDropped { total } => {
                warn!("CMD   | {} line(s) dropped since boot", total);
            }
            AppEvent::OutputsChanged { from, to } => {
                info!(
                    "OUT   | pump {}->{} fan {}->{} lamp {}->{}",
                    on_off(from.pump),
                    on_off(to.pump),
                    on_off(from.fan),
                    on_off(to.fan),
                    on_off(from.grow_light),
                    on_off(to.grow_light),
                );
            }
        }
    }
}
