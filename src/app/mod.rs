//! Application core: control logic, zero I/O.
//!
//! This module holds the main-loop pass of the greenhouse controller:
//! command dispatch, actuator policy and telemetry pacing. All interaction
//! with hardware happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
