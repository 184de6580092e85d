//! Binary actuator outputs (fan relay, pump relay, grow-light MOSFET).
//!
//! Each output is an `embedded-hal` [`OutputPin`] wrapped in an
//! [`ActuatorOutput`] that remembers the last commanded level.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: [`GpioOutput`] writes the pin via hw_init helpers.
//! On host/test: the same helper is a no-op, so only the tracked level moves.

use embedded_hal::digital::{ErrorType, OutputPin, PinState};
use log::warn;

use crate::drivers::hw_init;

/// Raw GPIO already configured as an output by `hw_init`.
pub struct GpioOutput {
    gpio: i32,
}

impl GpioOutput {
    pub const fn new(gpio: i32) -> Self {
        Self { gpio }
    }
}

impl ErrorType for GpioOutput {
    type Error = core::convert::Infallible;
}

impl OutputPin for GpioOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.gpio, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.gpio, true);
        Ok(())
    }
}

/// One on/off actuator.
pub struct ActuatorOutput<P: OutputPin> {
    pin: P,
    name: &'static str,
    on: bool,
}

impl<P: OutputPin> ActuatorOutput<P> {
    /// Wrap `pin`, driving it low.
    pub fn new(name: &'static str, mut pin: P) -> Self {
        if let Err(e) = pin.set_low() {
            warn!("{}: initial set_low failed: {:?}", name, e);
        }
        Self {
            pin,
            name,
            on: false,
        }
    }

    /// Drive the pin. Written every call, changed or not.
    pub fn set(&mut self, on: bool) {
        match self.pin.set_state(PinState::from(on)) {
            Ok(()) => self.on = on,
            Err(e) => warn!("{}: pin write failed: {:?}", self.name, e),
        }
    }

    /// Last level successfully driven.
    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}
