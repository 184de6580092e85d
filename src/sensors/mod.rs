//! Analog sensor front end: LDR, NTC and capacitive soil probe.
//!
//! All three sensors are read as raw 12-bit ADC codes; no calibration curve
//! is applied anywhere in the firmware.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 via the oneshot API (initialised by hw_init).
//! On host/test: reads from static `AtomicU16`s for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

use crate::app::ports::SensorPort;
#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

/// Analog input channels, in sampling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Light,
    Temperature,
    Moisture,
}

impl Channel {
    #[cfg(target_os = "espidf")]
    fn adc1_channel(self) -> u32 {
        match self {
            Self::Light => hw_init::ADC1_CH_LIGHT,
            Self::Temperature => hw_init::ADC1_CH_TEMP,
            Self::Moisture => hw_init::ADC1_CH_MOISTURE,
        }
    }
}

#[cfg(not(target_os = "espidf"))]
static SIM_LIGHT_ADC: AtomicU16 = AtomicU16::new(0);
#[cfg(not(target_os = "espidf"))]
static SIM_TEMP_ADC: AtomicU16 = AtomicU16::new(0);
#[cfg(not(target_os = "espidf"))]
static SIM_MOISTURE_ADC: AtomicU16 = AtomicU16::new(0);

#[cfg(not(target_os = "espidf"))]
fn sim_slot(channel: Channel) -> &'static AtomicU16 {
    match channel {
        Channel::Light => &SIM_LIGHT_ADC,
        Channel::Temperature => &SIM_TEMP_ADC,
        Channel::Moisture => &SIM_MOISTURE_ADC,
    }
}

/// Inject the raw code the simulated ADC returns for `channel`.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_adc(channel: Channel, raw: u16) {
    sim_slot(channel).store(raw, Ordering::Relaxed);
}

/// The three analog sensors behind [`SensorPort`].
///
/// Owned by the sampling tick; nothing else touches the ADC.
pub struct AnalogSensors {
    reads: u32,
}

impl Default for AnalogSensors {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalogSensors {
    pub fn new() -> Self {
        Self { reads: 0 }
    }

    /// Total channel conversions since boot.
    pub fn reads(&self) -> u32 {
        self.reads
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self, channel: Channel) -> u16 {
        hw_init::adc1_read(channel.adc1_channel())
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self, channel: Channel) -> u16 {
        sim_slot(channel).load(Ordering::Relaxed)
    }
}

impl SensorPort for AnalogSensors {
    fn read(&mut self, channel: Channel) -> u16 {
        self.reads = self.reads.wrapping_add(1);
        self.read_adc(channel)
    }
}
