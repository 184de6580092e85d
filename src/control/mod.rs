//! Control laws driving the greenhouse actuators.

pub mod policy;
