//! GPIO / peripheral pin assignments for the greenhouse controller board.
//!
//! Single source of truth. Every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Sensors: Analog (ADC1, 12 dB attenuation, 12-bit)
// ---------------------------------------------------------------------------

/// LDR on the low side of a divider: brighter → lower code.
/// ADC1 channel 0 (GPIO 1 on ESP32-S3).
pub const LIGHT_ADC_GPIO: i32 = 1;
pub const LIGHT_ADC1_CHANNEL: u32 = 0;

/// 10 kΩ NTC divider: hotter → lower code.
/// ADC1 channel 1 (GPIO 2 on ESP32-S3).
pub const TEMP_ADC_GPIO: i32 = 2;
pub const TEMP_ADC1_CHANNEL: u32 = 1;

/// Capacitive soil-moisture probe: drier → higher code.
/// ADC1 channel 2 (GPIO 3 on ESP32-S3).
pub const MOISTURE_ADC_GPIO: i32 = 3;
pub const MOISTURE_ADC1_CHANNEL: u32 = 2;

// ---------------------------------------------------------------------------
// Actuators: Digital outputs (relay / MOSFET, active HIGH)
// ---------------------------------------------------------------------------

/// Exhaust fan relay.
pub const FAN_GPIO: i32 = 10;
/// Irrigation pump relay.
pub const PUMP_GPIO: i32 = 11;
/// Grow-light MOSFET.
pub const GROW_LIGHT_GPIO: i32 = 12;

// ---------------------------------------------------------------------------
// UART1: host link (commands in, telemetry out)
// ---------------------------------------------------------------------------

/// UART0 stays the ESP-IDF log console; binary telemetry must not share it.
pub const UART_PORT: i32 = 1;
pub const UART_TX_GPIO: i32 = 17;
pub const UART_RX_GPIO: i32 = 18;
/// Driver RX ring buffer (bytes). Must exceed 128 (hardware FIFO size).
pub const UART_RX_BUFFER: i32 = 256;
