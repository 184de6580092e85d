//! Periodic sampling tick.
//!
//! Invoked every 100 ms from the hardware timer, independent of main-loop
//! progress. One tick does, in this order:
//!
//! 1. read light, temperature and moisture from the ADC;
//! 2. update the three moving averages;
//! 3. publish the filtered values to [`SharedState`];
//! 4. run the photoperiod accountant against the *fresh* light average and
//!    the grow-light output as currently driven.
//!
//! Step 4 depends on steps 2–3, so the order is fixed. Nothing here logs or
//! blocks.

use crate::app::ports::SensorPort;
use crate::config::SystemConfig;
use crate::filter::{FilterBank, FilteredReadings, RawSample};
use crate::photoperiod::PhotoperiodAccountant;
use crate::sensors::Channel;
use crate::state::SharedState;

/// Filter bank plus photoperiod accountant: everything the tick mutates.
pub struct Sampler {
    filters: FilterBank,
    photoperiod: PhotoperiodAccountant,
    ticks: u32,
}

impl Sampler {
    pub fn new(system: &SystemConfig) -> Self {
        Self {
            filters: FilterBank::new(),
            photoperiod: PhotoperiodAccountant::new(
                system.ticks_per_second,
                system.polarity.light,
            ),
            ticks: 0,
        }
    }

    /// Run one sampling tick against `adc`, publishing into `shared`.
    pub fn on_tick(&mut self, adc: &mut impl SensorPort, shared: &SharedState) -> FilteredReadings {
        self.ticks = self.ticks.wrapping_add(1);

        let sample = RawSample {
            light: adc.read(Channel::Light),
            temperature: adc.read(Channel::Temperature),
            moisture: adc.read(Channel::Moisture),
        };

        let readings = self.filters.push(sample);
        shared.readings.publish(readings);

        let lit = self.photoperiod.on_tick(
            readings.light,
            shared.config.light_threshold(),
            shared.outputs.grow_light_on(),
        );
        if lit == Some(true) {
            shared.count_light_second();
        }

        readings
    }

    /// Ticks since boot (wraps).
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn filters(&self) -> &FilterBank {
        &self.filters
    }
}

/// Everything the sampling timer callback needs, bundled so it can be
/// handed to the timer as a single `'static` context.
pub struct SamplingTask<A: SensorPort> {
    sampler: Sampler,
    adc: A,
    shared: &'static SharedState,
}

impl<A: SensorPort> SamplingTask<A> {
    pub fn new(sampler: Sampler, adc: A, shared: &'static SharedState) -> Self {
        Self {
            sampler,
            adc,
            shared,
        }
    }

    /// Timer callback body.
    pub fn tick(&mut self) {
        self.sampler.on_tick(&mut self.adc, self.shared);
    }

    pub fn sampler(&self) -> &Sampler {
        &self.sampler
    }
}
