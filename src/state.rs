//! Cross-context shared state.
//!
//! Three execution contexts touch this state: the sampling timer, the
//! receive pump and the main loop. Every field is a single primitive-width
//! atomic with exactly one writer context, so readers never observe a torn
//! value and no lock ever stalls the sampling tick. Composite snapshots are
//! per-field consistent only.
//!
//! | Field                   | Writer                       | Readers           |
//! |-------------------------|------------------------------|-------------------|
//! | `readings`              | sampling tick                | main loop         |
//! | `light_seconds_today`   | sampling tick (+1), main (0) | main loop         |
//! | `config`                | main loop (command dispatch) | tick, main loop   |
//! | `outputs`               | main loop                    | tick, main loop   |

use core::sync::atomic::{AtomicBool, AtomicU16, AtomicU32, Ordering};

use crate::config::ControlConfig;
use crate::control::policy::ActuatorCommands;
use crate::filter::FilteredReadings;

/// Latest filtered value of each channel.
pub struct SharedReadings {
    light: AtomicU16,
    temperature: AtomicU16,
    moisture: AtomicU16,
}

impl SharedReadings {
    const fn new() -> Self {
        Self {
            light: AtomicU16::new(0),
            temperature: AtomicU16::new(0),
            moisture: AtomicU16::new(0),
        }
    }

    pub fn publish(&self, r: FilteredReadings) {
        self.light.store(r.light, Ordering::Relaxed);
        self.temperature.store(r.temperature, Ordering::Relaxed);
        self.moisture.store(r.moisture, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> FilteredReadings {
        FilteredReadings {
            light: self.light.load(Ordering::Relaxed),
            temperature: self.temperature.load(Ordering::Relaxed),
            moisture: self.moisture.load(Ordering::Relaxed),
        }
    }

    pub fn light(&self) -> u16 {
        self.light.load(Ordering::Relaxed)
    }
}

/// [`ControlConfig`] split into one atomic per field.
pub struct SharedConfig {
    moisture_setpoint: AtomicU16,
    temperature_setpoint: AtomicU16,
    light_threshold: AtomicU16,
    photoperiod_enabled: AtomicBool,
    daily_light_goal_secs: AtomicU32,
}

impl SharedConfig {
    const fn new(c: ControlConfig) -> Self {
        Self {
            moisture_setpoint: AtomicU16::new(c.moisture_setpoint),
            temperature_setpoint: AtomicU16::new(c.temperature_setpoint),
            light_threshold: AtomicU16::new(c.light_threshold),
            photoperiod_enabled: AtomicBool::new(c.photoperiod_enabled),
            daily_light_goal_secs: AtomicU32::new(c.daily_light_goal_secs),
        }
    }

    pub fn snapshot(&self) -> ControlConfig {
        ControlConfig {
            moisture_setpoint: self.moisture_setpoint.load(Ordering::Relaxed),
            temperature_setpoint: self.temperature_setpoint.load(Ordering::Relaxed),
            light_threshold: self.light_threshold.load(Ordering::Relaxed),
            photoperiod_enabled: self.photoperiod_enabled.load(Ordering::Relaxed),
            daily_light_goal_secs: self.daily_light_goal_secs.load(Ordering::Relaxed),
        }
    }

    pub fn light_threshold(&self) -> u16 {
        self.light_threshold.load(Ordering::Relaxed)
    }

    pub fn set_moisture_setpoint(&self, v: u16) {
        self.moisture_setpoint.store(v, Ordering::Relaxed);
    }

    pub fn set_temperature_setpoint(&self, v: u16) {
        self.temperature_setpoint.store(v, Ordering::Relaxed);
    }

    pub fn set_light_threshold(&self, v: u16) {
        self.light_threshold.store(v, Ordering::Relaxed);
    }

    pub fn set_photoperiod_enabled(&self, v: bool) {
        self.photoperiod_enabled.store(v, Ordering::Relaxed);
    }

    pub fn set_daily_light_goal_secs(&self, v: u32) {
        self.daily_light_goal_secs.store(v, Ordering::Relaxed);
    }
}

/// Last level driven onto each actuator output.
///
/// Stands in for reading back the output pin: the sampling tick needs the
/// grow-light state for its photoperiod decision.
pub struct SharedOutputs {
    pump: AtomicBool,
    fan: AtomicBool,
    grow_light: AtomicBool,
}

impl SharedOutputs {
    const fn new() -> Self {
        Self {
            pump: AtomicBool::new(false),
            fan: AtomicBool::new(false),
            grow_light: AtomicBool::new(false),
        }
    }

    pub fn publish(&self, c: ActuatorCommands) {
        self.pump.store(c.pump, Ordering::Relaxed);
        self.fan.store(c.fan, Ordering::Relaxed);
        self.grow_light.store(c.grow_light, Ordering::Release);
    }

    pub fn snapshot(&self) -> ActuatorCommands {
        ActuatorCommands {
            pump: self.pump.load(Ordering::Relaxed),
            fan: self.fan.load(Ordering::Relaxed),
            grow_light: self.grow_light.load(Ordering::Acquire),
        }
    }

    pub fn grow_light_on(&self) -> bool {
        self.grow_light.load(Ordering::Acquire)
    }
}

/// Process-wide state shared between the interrupt-like contexts and the
/// main loop. `const`-constructible so it can live in a `static`.
pub struct SharedState {
    pub readings: SharedReadings,
    pub config: SharedConfig,
    pub outputs: SharedOutputs,
    light_seconds_today: AtomicU32,
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedState {
    pub const fn new() -> Self {
        Self::with_config(ControlConfig::DEFAULT)
    }

    pub const fn with_config(config: ControlConfig) -> Self {
        Self {
            readings: SharedReadings::new(),
            config: SharedConfig::new(config),
            outputs: SharedOutputs::new(),
            light_seconds_today: AtomicU32::new(0),
        }
    }

    /// Cumulative lit seconds since boot or the last reset command.
    pub fn light_seconds_today(&self) -> u32 {
        self.light_seconds_today.load(Ordering::Relaxed)
    }

    /// One more lit second. Called only by the photoperiod accountant.
    pub fn count_light_second(&self) {
        self.light_seconds_today.fetch_add(1, Ordering::Relaxed);
    }

    /// Start a new day. Called only by the command dispatcher.
    pub fn reset_light_seconds(&self) {
        self.light_seconds_today.store(0, Ordering::Relaxed);
    }
}
