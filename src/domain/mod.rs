//! Domain types for toolrack
//!
//! - ToolParams / ToolProfile: what a tool is, physically
//! - ControlMode: the controller state that gates configuration changes

pub mod mode;
pub mod params;

pub use mode::ControlMode;
pub use params::{FLANGE, ToolParams, ToolProfile, is_flange};
