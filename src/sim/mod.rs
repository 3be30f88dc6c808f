//! Simulated controller
//!
//! A `Robot` implementation that keeps the tool registry in memory and
//! answers requests the way the real controller does. Used by tests and by
//! the `toolrack` binary.

mod controller;
mod handlers;

pub use controller::{Fault, SimulatedController};

use std::time::Duration;

use crate::config::Config;

/// Build a simulator seeded from configuration
pub fn from_config(config: &Config) -> SimulatedController {
    SimulatedController::new()
        .with_serial_number(config.controller.serial_number.clone())
        .with_timeout(Duration::from_millis(config.controller.request_timeout_ms))
        .with_mode(config.controller.mode)
        .with_tools(config.tools.clone())
}
