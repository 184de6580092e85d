//! Daily light-exposure accounting.
//!
//! Runs inside the sampling tick. Every `ticks_per_second` ticks (10 at the
//! 100 ms period) it decides whether the last second was lit, by the sun
//! or by the grow light, and if so the caller adds one second to the daily
//! counter. The second boundary is derived from the tick count rather than
//! a free-running clock, so a missed tick stretches the second.

use crate::config::Polarity;

/// `true` when the filtered light code counts as natural light.
///
/// Inclusive at the threshold: with the stock inverted LDR, 2000 at a
/// threshold of 2000 is "sun".
pub fn is_bright(filtered_light: u16, threshold: u16, polarity: Polarity) -> bool {
    !polarity.reads_below(filtered_light, threshold)
}

/// Sub-second tick counter plus the lit/unlit decision.
#[derive(Debug, Clone)]
pub struct PhotoperiodAccountant {
    ticks_per_second: u8,
    subsecond_ticks: u8,
    polarity: Polarity,
}

impl PhotoperiodAccountant {
    pub fn new(ticks_per_second: u8, polarity: Polarity) -> Self {
        Self {
            ticks_per_second: ticks_per_second.max(1),
            subsecond_ticks: 0,
            polarity,
        }
    }

    /// Count one sampling tick.
    ///
    /// Returns `None` between second boundaries. On a boundary returns
    /// `Some(lit)`, where `lit` means the caller must add exactly one second
    /// to the daily counter.
    pub fn on_tick(&mut self, filtered_light: u16, threshold: u16, grow_light_on: bool) -> Option<bool> {
        self.subsecond_ticks += 1;
        if self.subsecond_ticks < self.ticks_per_second {
            return None;
        }
        self.subsecond_ticks = 0;

        let sun = is_bright(filtered_light, threshold, self.polarity);
        Some(grow_light_on || sun)
    }

    /// Ticks counted toward the current second (0..ticks_per_second).
    pub fn subsecond_ticks(&self) -> u8 {
        self.subsecond_ticks
    }
}
