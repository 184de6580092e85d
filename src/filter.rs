//! Incremental moving-average filter for the three analog channels.
//!
//! Each channel keeps a ring of the last [`WINDOW`] raw samples and their
//! running sum, so an update costs one subtract, one add and one shift no
//! matter how long the window is. All three rings share one write index.
//!
//! History starts zeroed, so the average under-reports for the first
//! [`WINDOW`] samples after boot (3.2 s at 10 Hz). That ramp-up is
//! expected and deliberately left visible.

use serde::Serialize;

/// log2 of the window length. Downstream thresholds were tuned against a
/// 32-sample window; changing this changes the filter's time constant.
pub const WINDOW_SHIFT: u32 = 5;

/// Samples per moving-average window.
pub const WINDOW: usize = 1 << WINDOW_SHIFT;

/// One raw ADC sample per channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawSample {
    pub light: u16,
    pub temperature: u16,
    pub moisture: u16,
}

/// Latest moving average per channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilteredReadings {
    pub light: u16,
    pub temperature: u16,
    pub moisture: u16,
}

/// Ring buffer + running sum for one channel.
#[derive(Debug, Clone)]
pub struct ChannelFilter {
    history: [u16; WINDOW],
    sum: u32,
    filtered: u16,
}

impl Default for ChannelFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelFilter {
    pub const fn new() -> Self {
        Self {
            history: [0; WINDOW],
            sum: 0,
            filtered: 0,
        }
    }

    /// Replace the sample at `index` and return the new average.
    ///
    /// `sum` never exceeds `WINDOW * u16::MAX`, so it cannot overflow `u32`.
    pub fn update(&mut self, index: usize, sample: u16) -> u16 {
        self.sum = self.sum - u32::from(self.history[index]) + u32::from(sample);
        self.history[index] = sample;
        self.filtered = (self.sum >> WINDOW_SHIFT) as u16;
        self.filtered
    }

    pub fn filtered(&self) -> u16 {
        self.filtered
    }

    pub fn running_sum(&self) -> u32 {
        self.sum
    }

    /// Sum of the ring recomputed from scratch (test support).
    pub fn history_sum(&self) -> u32 {
        self.history.iter().map(|&s| u32::from(s)).sum()
    }
}

/// The three channel filters and their shared circular index.
#[derive(Debug, Clone, Default)]
pub struct FilterBank {
    light: ChannelFilter,
    temperature: ChannelFilter,
    moisture: ChannelFilter,
    index: usize,
}

impl FilterBank {
    pub const fn new() -> Self {
        Self {
            light: ChannelFilter::new(),
            temperature: ChannelFilter::new(),
            moisture: ChannelFilter::new(),
            index: 0,
        }
    }

    /// Feed one sample per channel and return the refreshed averages.
    pub fn push(&mut self, sample: RawSample) -> FilteredReadings {
        let readings = FilteredReadings {
            light: self.light.update(self.index, sample.light),
            temperature: self.temperature.update(self.index, sample.temperature),
            moisture: self.moisture.update(self.index, sample.moisture),
        };
        self.index = (self.index + 1) % WINDOW;
        readings
    }

    pub fn readings(&self) -> FilteredReadings {
        FilteredReadings {
            light: self.light.filtered(),
            temperature: self.temperature.filtered(),
            moisture: self.moisture.filtered(),
        }
    }

    /// Next ring slot to be overwritten.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn light(&self) -> &ChannelFilter {
        &self.light
    }

    pub fn temperature(&self) -> &ChannelFilter {
        &self.temperature
    }

    pub fn moisture(&self) -> &ChannelFilter {
        &self.moisture
    }
}
