//! Tool parameters and named tool profiles
//!
//! `ToolParams` is the physical description the controller's dynamics model
//! uses for the mounted end-effector. The client never inspects or partially
//! edits it: params are sent and received as a whole.

use serde::{Deserialize, Serialize};

/// Name of the reserved profile meaning "no tool attached"
pub const FLANGE: &str = "Flange";

/// Returns true if `name` is the reserved Flange profile (case-sensitive)
pub fn is_flange(name: &str) -> bool {
    name == FLANGE
}

/// Physical parameters of an end-effector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolParams {
    /// Total mass in kg
    pub mass: f64,

    /// Center of mass in the flange frame: [x, y, z] in m
    pub com: [f64; 3],

    /// Inertia tensor about the CoM: [Ixx, Iyy, Izz, Ixy, Ixz, Iyz] in kg*m^2
    pub inertia: [f64; 6],

    /// Tool center point relative to the flange: [x, y, z, qw, qx, qy, qz]
    pub tcp_location: [f64; 7],
}

impl Default for ToolParams {
    /// Parameters of the bare flange
    fn default() -> Self {
        Self {
            mass: 0.0,
            com: [0.0; 3],
            inertia: [0.0; 6],
            tcp_location: [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
        }
    }
}

impl ToolParams {
    pub fn new(mass: f64, com: [f64; 3], inertia: [f64; 6], tcp_location: [f64; 7]) -> Self {
        Self {
            mass,
            com,
            inertia,
            tcp_location,
        }
    }

    /// TCP translation part, in m
    pub fn tcp_position(&self) -> [f64; 3] {
        [self.tcp_location[0], self.tcp_location[1], self.tcp_location[2]]
    }

    /// TCP orientation part as a [qw, qx, qy, qz] quaternion
    pub fn tcp_orientation(&self) -> [f64; 4] {
        [
            self.tcp_location[3],
            self.tcp_location[4],
            self.tcp_location[5],
            self.tcp_location[6],
        ]
    }
}

/// A named tool and its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolProfile {
    pub name: String,
    #[serde(default)]
    pub params: ToolParams,
}

impl ToolProfile {
    pub fn new(name: impl Into<String>, params: ToolParams) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    /// The reserved profile every controller starts with
    pub fn flange() -> Self {
        Self::new(FLANGE, ToolParams::default())
    }

    pub fn is_flange(&self) -> bool {
        is_flange(&self.name)
    }
}
