//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements    | Connects to              |
//! |------------|---------------|--------------------------|
//! | `hardware` | ActuatorPort  | Fan / pump / lamp GPIOs  |
//! | `log_sink` | EventSink     | Serial log console       |
//! | `time`     | ClockPort     | ESP32 system timer       |
//! | `uart`     | Transport     | UART1 host link          |
//!
//! The ADC side ([`SensorPort`](crate::app::ports::SensorPort)) is
//! implemented by [`AnalogSensors`](crate::sensors::AnalogSensors).

pub mod hardware;
pub mod log_sink;
pub mod time;
#[cfg(target_os = "espidf")]
pub mod uart;
