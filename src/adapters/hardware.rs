//! Hardware adapter: bridges the actuator outputs to [`ActuatorPort`].
//!
//! Owns the three output drivers. The ADC side lives in
//! [`AnalogSensors`](crate::sensors::AnalogSensors) because it belongs to
//! the sampling timer context, not the main loop.

use crate::app::ports::ActuatorPort;
use crate::control::policy::ActuatorCommands;
use crate::drivers::outputs::{ActuatorOutput, GpioOutput};
use crate::pins;

/// Concrete adapter that combines all actuator outputs behind the port.
pub struct HardwareAdapter {
    pump: ActuatorOutput<GpioOutput>,
    fan: ActuatorOutput<GpioOutput>,
    grow_light: ActuatorOutput<GpioOutput>,
}

impl Default for HardwareAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl HardwareAdapter {
    /// Take the output pins (configured by `hw_init`), all driven low.
    pub fn new() -> Self {
        Self {
            pump: ActuatorOutput::new("pump", GpioOutput::new(pins::PUMP_GPIO)),
            fan: ActuatorOutput::new("fan", GpioOutput::new(pins::FAN_GPIO)),
            grow_light: ActuatorOutput::new("grow_light", GpioOutput::new(pins::GROW_LIGHT_GPIO)),
        }
    }

    /// Levels as last driven.
    pub fn levels(&self) -> ActuatorCommands {
        ActuatorCommands {
            pump: self.pump.is_on(),
            fan: self.fan.is_on(),
            grow_light: self.grow_light.is_on(),
        }
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn set_pump(&mut self, on: bool) {
        self.pump.set(on);
    }

    fn set_fan(&mut self, on: bool) {
        self.fan.set(on);
    }

    fn set_grow_light(&mut self, on: bool) {
        self.grow_light.set(on);
    }
}
