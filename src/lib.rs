//! toolrack - tool profile management for a connected robot
//!
//! A tool profile describes the end-effector mounted on the robot flange
//! (mass, center of mass, inertia, TCP). The controller owns the set of
//! profiles and the active one; this crate lists, inspects and changes them
//! through blocking request/reply calls on a borrowed `Robot` handle.
//!
//! ```rust,ignore
//! use toolrack::{Tool, ToolMutation, ToolParams, ToolRegistry};
//!
//! let tool = Tool::new(&robot);
//! tool.add("Gripper", &ToolParams::default())?;
//! tool.switch("Gripper")?;
//! assert_eq!(tool.current_name()?, "Gripper");
//! ```

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod guard;
pub mod protocol;
pub mod robot;
pub mod sim;

pub use client::{Tool, ToolMutation, ToolRegistry};
pub use domain::{ControlMode, FLANGE, ToolParams, ToolProfile};
pub use error::{Result, ToolError, TransportError};
pub use robot::Robot;
