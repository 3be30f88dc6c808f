//! Robot control modes
//!
//! The controller is always in exactly one mode. Tool profiles may only be
//! changed while it is `Idle`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Operating mode of the robot controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ControlMode {
    /// Mode could not be determined
    #[default]
    Unknown,
    /// Not executing any command; configuration changes allowed
    Idle,
    RtJointTorque,
    RtJointImpedance,
    NrtJointImpedance,
    RtJointPosition,
    NrtJointPosition,
    NrtPlanExecution,
    NrtPrimitiveExecution,
    RtCartesianMotionForce,
    NrtCartesianMotionForce,
}

impl ControlMode {
    pub const ALL: [ControlMode; 11] = [
        ControlMode::Unknown,
        ControlMode::Idle,
        ControlMode::RtJointTorque,
        ControlMode::RtJointImpedance,
        ControlMode::NrtJointImpedance,
        ControlMode::RtJointPosition,
        ControlMode::NrtJointPosition,
        ControlMode::NrtPlanExecution,
        ControlMode::NrtPrimitiveExecution,
        ControlMode::RtCartesianMotionForce,
        ControlMode::NrtCartesianMotionForce,
    ];

    /// Returns true if the robot is idle
    pub fn is_idle(&self) -> bool {
        matches!(self, ControlMode::Idle)
    }

    /// Returns true for modes driven by a real-time command stream
    pub fn is_real_time(&self) -> bool {
        matches!(
            self,
            ControlMode::RtJointTorque
                | ControlMode::RtJointImpedance
                | ControlMode::RtJointPosition
                | ControlMode::RtCartesianMotionForce
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ControlMode::Unknown => "UNKNOWN",
            ControlMode::Idle => "IDLE",
            ControlMode::RtJointTorque => "RT_JOINT_TORQUE",
            ControlMode::RtJointImpedance => "RT_JOINT_IMPEDANCE",
            ControlMode::NrtJointImpedance => "NRT_JOINT_IMPEDANCE",
            ControlMode::RtJointPosition => "RT_JOINT_POSITION",
            ControlMode::NrtJointPosition => "NRT_JOINT_POSITION",
            ControlMode::NrtPlanExecution => "NRT_PLAN_EXECUTION",
            ControlMode::NrtPrimitiveExecution => "NRT_PRIMITIVE_EXECUTION",
            ControlMode::RtCartesianMotionForce => "RT_CARTESIAN_MOTION_FORCE",
            ControlMode::NrtCartesianMotionForce => "NRT_CARTESIAN_MOTION_FORCE",
        }
    }
}

impl fmt::Display for ControlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_idle_is_idle() {
        let idle: Vec<_> = ControlMode::ALL.iter().filter(|m| m.is_idle()).collect();
        assert_eq!(idle, vec![&ControlMode::Idle]);
    }

    #[test]
    fn test_real_time_modes() {
        assert!(ControlMode::RtJointTorque.is_real_time());
        assert!(ControlMode::RtCartesianMotionForce.is_real_time());
        assert!(!ControlMode::NrtJointPosition.is_real_time());
        assert!(!ControlMode::Idle.is_real_time());
    }

    #[test]
    fn test_default_is_unknown() {
        assert_eq!(ControlMode::default(), ControlMode::Unknown);
    }

    #[test]
    fn test_display_matches_serde_name() {
        for mode in ControlMode::ALL {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode));
        }
    }

    #[test]
    fn test_deserialize_from_yaml_name() {
        let mode: ControlMode = serde_yaml::from_str("NRT_PLAN_EXECUTION").unwrap();
        assert_eq!(mode, ControlMode::NrtPlanExecution);
    }
}
