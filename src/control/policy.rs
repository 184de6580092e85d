//! Actuator decision logic
//!
//! A pure function of the filtered readings, the control setpoints and the
//! daily light counter. Evaluated on every main-loop pass; it keeps no
//! state of its own.
//!
//! No hysteresis: an input sitting exactly on a setpoint can make an output
//! chatter from one pass to the next. A deadband per setpoint is the
//! obvious improvement once the host protocol can carry it.

use serde::Serialize;

use crate::config::{ControlConfig, SensorPolarity};
use crate::filter::FilteredReadings;
use crate::photoperiod::is_bright;

/// Desired level of each binary output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ActuatorCommands {
    pub pump: bool,
    pub fan: bool,
    pub grow_light: bool,
}

/// Decide all three outputs.
pub fn evaluate(
    readings: &FilteredReadings,
    config: &ControlConfig,
    light_seconds_today: u32,
    polarity: &SensorPolarity,
) -> ActuatorCommands {
    // Soil drier than the setpoint.
    let pump = polarity
        .moisture
        .reads_below(readings.moisture, config.moisture_setpoint);

    // Air hotter than the setpoint.
    let fan = polarity
        .temperature
        .reads_above(readings.temperature, config.temperature_setpoint);

    // Supplement only while the budget is open and the sun is not enough.
    let grow_light = config.photoperiod_enabled
        && light_seconds_today < config.daily_light_goal_secs
        && !is_bright(readings.light, config.light_threshold, polarity.light);

    ActuatorCommands {
        pump,
        fan,
        grow_light,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn readings(light: u16, temperature: u16, moisture: u16) -> FilteredReadings {
        FilteredReadings {
            light,
            temperature,
            moisture,
        }
    }

    fn eval(r: FilteredReadings, c: &ControlConfig, secs: u32) -> ActuatorCommands {
        evaluate(&r, c, secs, &SensorPolarity::default())
    }

    #[test]
    fn pump_uses_strict_greater_than() {
        let c = ControlConfig {
            moisture_setpoint: 1234,
            ..Default::default()
        };
        assert!(eval(readings(0, 4095, 1235), &c, 0).pump);
        assert!(!eval(readings(0, 4095, 1234), &c, 0).pump);
        assert!(!eval(readings(0, 4095, 1233), &c, 0).pump);
    }

    #[test]
    fn fan_uses_strict_less_than() {
        let c = ControlConfig {
            temperature_setpoint: 1600,
            ..Default::default()
        };
        assert!(eval(readings(0, 1599, 0), &c, 0).fan);
        assert!(!eval(readings(0, 1600, 0), &c, 0).fan);
    }

    #[test]
    fn grow_light_needs_photoperiod_enabled() {
        let c = ControlConfig::default();
        assert!(!c.photoperiod_enabled);
        assert!(!eval(readings(4000, 0, 0), &c, 0).grow_light);
    }

    #[test]
    fn grow_light_supplements_only_in_the_dark() {
        let c = ControlConfig {
            photoperiod_enabled: true,
            light_threshold: 2000,
            ..Default::default()
        };
        assert!(eval(readings(2001, 0, 0), &c, 0).grow_light);
        assert!(!eval(readings(2000, 0, 0), &c, 0).grow_light);
        assert!(!eval(readings(500, 0, 0), &c, 0).grow_light);
    }

    #[test]
    fn grow_light_off_once_goal_met() {
        let c = ControlConfig {
            photoperiod_enabled: true,
            daily_light_goal_secs: 100,
            ..Default::default()
        };
        assert!(eval(readings(4000, 0, 0), &c, 99).grow_light);
        assert!(!eval(readings(4000, 0, 0), &c, 100).grow_light);
        assert!(!eval(readings(4000, 0, 0), &c, 101).grow_light);
    }

    #[test]
    fn direct_polarity_reverses_pump_and_fan() {
        let polarity = SensorPolarity {
            light: crate::config::Polarity::Direct,
            temperature: crate::config::Polarity::Direct,
            moisture: crate::config::Polarity::Direct,
        };
        let c = ControlConfig::default();
        let out = evaluate(&readings(0, 1601, 2999), &c, 0, &polarity);
        assert!(out.pump, "direct probe: lower code is drier");
        assert!(out.fan, "direct sensor: higher code is hotter");
    }
}
