//! Greenhouse controller firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod filter;
pub mod photoperiod;
pub mod sampler;
pub mod serial;
pub mod state;

mod pins;

// Hardware-facing modules; the ESP-IDF implementations are guarded by
// cfg attributes inside, with host stubs alongside.
pub mod adapters;
pub mod control;
pub mod drivers;
pub mod sensors;
