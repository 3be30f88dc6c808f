//! Local precondition checks for mutating tool operations.
//!
//! All checks here are synchronous and never touch the channel. The
//! controller enforces the same rules server-side; checking locally lets a
//! call fail without sending a request.

use crate::domain::{ControlMode, ToolParams, is_flange};
use crate::error::{Result, ToolError};
use crate::robot::Robot;

/// Mode every mutating tool operation requires
pub const REQUIRED_MODE: ControlMode = ControlMode::Idle;

/// Reject the operation unless the robot is currently idle.
///
/// The mode is read from the robot on every call; nothing is cached.
pub fn require_idle<R: Robot + ?Sized>(robot: &R, operation: &str) -> Result<()> {
    let mode = robot.control_mode();
    if mode != REQUIRED_MODE {
        tracing::debug!(operation, %mode, "Rejected outside of IDLE mode");
        return Err(ToolError::InvalidOperation(format!(
            "{} requires {} mode, robot is in {} mode",
            operation, REQUIRED_MODE, mode
        )));
    }
    Ok(())
}

/// Reject empty tool names.
pub fn require_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ToolError::InvalidArgument("Tool name must not be empty".to_string()));
    }
    Ok(())
}

/// Reject adding a tool under the Flange name.
///
/// Flange is always registered, so this is a name conflict like any other
/// duplicate add.
pub fn require_new_name(name: &str) -> Result<()> {
    if is_flange(name) {
        return Err(ToolError::InvalidArgument(format!("Tool [{}] already exists", name)));
    }
    Ok(())
}

/// Reject parameters holding NaN or infinite values.
///
/// JSON has no encoding for them; serde_json would silently send `null`.
pub fn require_finite(params: &ToolParams) -> Result<()> {
    let fields: [(&str, &[f64]); 4] = [
        ("mass", std::slice::from_ref(&params.mass)),
        ("com", &params.com),
        ("inertia", &params.inertia),
        ("tcp_location", &params.tcp_location),
    ];
    for (field, values) in fields {
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(ToolError::InvalidArgument(format!(
                "Tool parameter {}[{}] is not a finite number",
                field, index
            )));
        }
    }
    Ok(())
}

/// Reject updating or removing the Flange profile.
pub fn require_not_flange(name: &str, operation: &str) -> Result<()> {
    if is_flange(name) {
        return Err(ToolError::InvalidOperation(format!(
            "{} cannot target the reserved tool [{}]",
            operation, name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::protocol::{ToolReply, ToolRequest};
    use std::sync::Mutex;

    struct ModeOnlyRobot {
        mode: Mutex<ControlMode>,
    }

    impl ModeOnlyRobot {
        fn new(mode: ControlMode) -> Self {
            Self { mode: Mutex::new(mode) }
        }
    }

    impl Robot for ModeOnlyRobot {
        fn control_mode(&self) -> ControlMode {
            *self.mode.lock().unwrap()
        }

        fn send_request(&self, _request: ToolRequest) -> std::result::Result<ToolReply, TransportError> {
            panic!("guard must never send a request");
        }
    }

    #[test]
    fn test_idle_passes() {
        let robot = ModeOnlyRobot::new(ControlMode::Idle);
        assert!(require_idle(&robot, "Add").is_ok());
    }

    #[test]
    fn test_every_other_mode_fails() {
        for mode in ControlMode::ALL.into_iter().filter(|m| !m.is_idle()) {
            let robot = ModeOnlyRobot::new(mode);
            let err = require_idle(&robot, "Switch").unwrap_err();
            assert!(matches!(err, ToolError::InvalidOperation(_)), "mode {}", mode);
        }
    }

    #[test]
    fn test_mode_is_read_each_time() {
        let robot = ModeOnlyRobot::new(ControlMode::NrtJointPosition);
        assert!(require_idle(&robot, "Update").is_err());

        *robot.mode.lock().unwrap() = ControlMode::Idle;
        assert!(require_idle(&robot, "Update").is_ok());
    }

    #[test]
    fn test_error_names_operation_and_mode() {
        let robot = ModeOnlyRobot::new(ControlMode::RtJointTorque);
        let err = require_idle(&robot, "Remove").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Remove"));
        assert!(msg.contains("RT_JOINT_TORQUE"));
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(matches!(require_name(""), Err(ToolError::InvalidArgument(_))));
        assert!(require_name("Probe").is_ok());
        assert!(require_name(" ").is_ok());
    }

    #[test]
    fn test_flange_is_reserved() {
        assert!(matches!(
            require_not_flange("Flange", "Remove"),
            Err(ToolError::InvalidOperation(_))
        ));
        assert!(require_not_flange("flange", "Remove").is_ok());
        assert!(require_not_flange("Probe", "Remove").is_ok());
    }

    #[test]
    fn test_flange_name_is_taken() {
        assert!(matches!(require_new_name("Flange"), Err(ToolError::InvalidArgument(_))));
        assert!(require_new_name("Probe").is_ok());
    }

    #[test]
    fn test_finite_params_pass() {
        assert!(require_finite(&ToolParams::default()).is_ok());
    }

    #[test]
    fn test_non_finite_params_rejected() {
        let mut nan_mass = ToolParams::default();
        nan_mass.mass = f64::NAN;
        let err = require_finite(&nan_mass).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument(_)));
        assert!(err.to_string().contains("mass"));

        let mut inf_tcp = ToolParams::default();
        inf_tcp.tcp_location[4] = f64::NEG_INFINITY;
        let err = require_finite(&inf_tcp).unwrap_err();
        assert!(err.to_string().contains("tcp_location[4]"));

        let mut inf_inertia = ToolParams::default();
        inf_inertia.inertia[0] = f64::INFINITY;
        assert!(require_finite(&inf_inertia).is_err());
    }
}
