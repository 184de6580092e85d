//! System configuration parameters
//!
//! Two layers:
//! - [`ControlConfig`]: the setpoints the host can change at runtime over
//!   the serial command link. Volatile; every boot starts from defaults.
//! - [`SystemConfig`]: build-time timing and wiring constants of the
//!   control loop.

use serde::{Deserialize, Serialize};

/// Runtime-tunable control setpoints.
///
/// All values are raw ADC codes (or seconds); no calibration is applied
/// and no bounds are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlConfig {
    /// Soil-moisture code above which the pump runs.
    pub moisture_setpoint: u16,
    /// Temperature code below which the fan runs.
    pub temperature_setpoint: u16,
    /// Light code at or below which ambient light counts as "sun".
    pub light_threshold: u16,
    /// Whether the grow light may supplement natural light.
    pub photoperiod_enabled: bool,
    /// Daily light budget in seconds (sun + grow light).
    pub daily_light_goal_secs: u32,
}

impl ControlConfig {
    /// Boot-time defaults.
    pub const DEFAULT: Self = Self {
        moisture_setpoint: 3000,
        temperature_setpoint: 1600,
        light_threshold: 2000,
        photoperiod_enabled: false,
        daily_light_goal_secs: 14 * 3600,
    };
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// How a raw sensor code relates to the physical quantity it measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Polarity {
    /// Larger code = more of the quantity.
    Direct,
    /// Smaller code = more of the quantity (e.g. LDR on the low side).
    Inverted,
}

impl Polarity {
    /// `true` when `raw` represents strictly more of the quantity than
    /// `reference`.
    pub fn reads_above(self, raw: u16, reference: u16) -> bool {
        match self {
            Self::Direct => raw > reference,
            Self::Inverted => raw < reference,
        }
    }

    /// `true` when `raw` represents strictly less of the quantity than
    /// `reference`.
    pub fn reads_below(self, raw: u16, reference: u16) -> bool {
        self.reads_above(reference, raw)
    }
}

/// Per-channel wiring polarity.
///
/// The stock board has all three sensors inverted: a lower light code is
/// brighter, a lower temperature code is hotter (NTC on the low side of the
/// divider) and a higher moisture code is drier (capacitive probe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorPolarity {
    pub light: Polarity,
    pub temperature: Polarity,
    pub moisture: Polarity,
}

impl Default for SensorPolarity {
    fn default() -> Self {
        Self {
            light: Polarity::Inverted,
            temperature: Polarity::Inverted,
            moisture: Polarity::Inverted,
        }
    }
}

/// Build-time loop configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Timing ---
    /// Sampling timer period (milliseconds).
    pub sample_period_ms: u32,
    /// Sampling ticks that make up one photoperiod second.
    pub ticks_per_second: u8,
    /// Telemetry frame interval (milliseconds).
    pub telemetry_interval_ms: u32,
    /// Main-loop yield between passes (milliseconds).
    pub loop_yield_ms: u32,
    /// Receive pump period (milliseconds).
    pub rx_poll_period_ms: u32,

    // --- Safety ---
    /// Watchdog timeout; the main loop must emit telemetry within it.
    pub watchdog_timeout_ms: u32,

    // --- Serial ---
    pub uart_baud: u32,

    // --- Wiring ---
    pub polarity: SensorPolarity,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            sample_period_ms: 100,
            ticks_per_second: 10,
            telemetry_interval_ms: 1000,
            loop_yield_ms: 1,
            rx_poll_period_ms: 10,
            watchdog_timeout_ms: 2000,
            uart_baud: 9600,
            polarity: SensorPolarity::default(),
        }
    }
}
