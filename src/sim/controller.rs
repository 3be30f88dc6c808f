//! In-memory robot controller
//!
//! `SimulatedController` implements `Robot` without any hardware: requests are
//! answered by the handlers in `sim::handlers` against an in-memory registry.
//! Faults can be injected to exercise transport failure paths, and every
//! request that reaches the controller is logged.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use crate::domain::{ControlMode, FLANGE, ToolProfile, is_flange};
use crate::error::TransportError;
use crate::protocol::{ToolReply, ToolRequest};
use crate::robot::Robot;

use super::handlers;

/// Transport fault to inject into every subsequent request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// No reply arrives before the transport timeout
    Timeout,
    /// The channel is closed
    Disconnected,
    /// The transport receives bytes it cannot decode
    CorruptFrame,
    /// A reply arrives whose result has the wrong shape
    MalformedReply,
    /// A reply arrives for a different request
    MismatchedId,
}

/// Registry and mode state owned by the controller
#[derive(Debug)]
pub(crate) struct ControllerState {
    pub(crate) tools: Vec<ToolProfile>,
    pub(crate) active: String,
    pub(crate) mode: ControlMode,
}

impl ControllerState {
    pub(crate) fn new(mode: ControlMode) -> Self {
        Self {
            tools: vec![ToolProfile::flange()],
            active: FLANGE.to_string(),
            mode,
        }
    }

    pub(crate) fn find(&self, name: &str) -> Option<&ToolProfile> {
        self.tools.iter().find(|t| t.name == name)
    }

    pub(crate) fn find_mut(&mut self, name: &str) -> Option<&mut ToolProfile> {
        self.tools.iter_mut().find(|t| t.name == name)
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.tools.iter().position(|t| t.name == name)
    }
}

#[derive(Debug)]
struct Inner {
    state: ControllerState,
    fault: Option<Fault>,
    next_mode: Option<ControlMode>,
    log: Vec<ToolRequest>,
}

/// Simulated robot controller
#[derive(Debug)]
pub struct SimulatedController {
    serial_number: String,
    timeout: Duration,
    inner: Mutex<Inner>,
}

impl Default for SimulatedController {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedController {
    /// Idle controller with only the Flange tool
    pub fn new() -> Self {
        Self {
            serial_number: "Simulator-000000".to_string(),
            timeout: Duration::from_millis(5000),
            inner: Mutex::new(Inner {
                state: ControllerState::new(ControlMode::Idle),
                fault: None,
                next_mode: None,
                log: Vec::new(),
            }),
        }
    }

    pub fn with_serial_number(mut self, serial_number: impl Into<String>) -> Self {
        self.serial_number = serial_number.into();
        self
    }

    /// Timeout reported when `Fault::Timeout` is injected
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_mode(self, mode: ControlMode) -> Self {
        self.set_control_mode(mode);
        self
    }

    /// Seed tools after Flange. Flange and repeated names are skipped.
    pub fn with_tools(self, tools: impl IntoIterator<Item = ToolProfile>) -> Self {
        {
            let mut inner = self.lock();
            for tool in tools {
                if is_flange(&tool.name) || inner.state.find(&tool.name).is_some() {
                    log::warn!("Skipping seed tool [{}]: name already present", tool.name);
                    continue;
                }
                inner.state.tools.push(tool);
            }
        }
        self
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Recover from poisoning: the state is plain data and stays consistent
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    pub fn set_control_mode(&self, mode: ControlMode) {
        self.lock().state.mode = mode;
    }

    /// Switch mode when the next request arrives, before it is handled
    pub fn change_mode_on_next_request(&self, mode: ControlMode) {
        self.lock().next_mode = Some(mode);
    }

    pub fn inject_fault(&self, fault: Fault) {
        self.lock().fault = Some(fault);
    }

    pub fn clear_fault(&self) {
        self.lock().fault = None;
    }

    /// Number of requests that reached the controller
    pub fn request_count(&self) -> usize {
        self.lock().log.len()
    }

    /// Requests that reached the controller, oldest first
    pub fn requests(&self) -> Vec<ToolRequest> {
        self.lock().log.clone()
    }

    /// Current registry contents, bypassing the request channel
    pub fn snapshot(&self) -> Vec<ToolProfile> {
        self.lock().state.tools.clone()
    }

    /// Active tool name, bypassing the request channel
    pub fn active_tool(&self) -> String {
        self.lock().state.active.clone()
    }
}

impl Robot for SimulatedController {
    fn control_mode(&self) -> ControlMode {
        self.lock().state.mode
    }

    fn send_request(&self, request: ToolRequest) -> Result<ToolReply, TransportError> {
        let mut inner = self.lock();
        inner.log.push(request.clone());

        if let Some(mode) = inner.next_mode.take() {
            inner.state.mode = mode;
        }

        match inner.fault {
            Some(Fault::Timeout) => return Err(TransportError::Timeout(self.timeout)),
            Some(Fault::Disconnected) => return Err(TransportError::Disconnected),
            Some(Fault::CorruptFrame) => {
                return Err(TransportError::Malformed("frame checksum mismatch".to_string()));
            }
            Some(Fault::MalformedReply) => {
                return Ok(ToolReply::success(request.id, serde_json::json!("\u{fffd}")));
            }
            Some(Fault::MismatchedId) => {
                return Ok(ToolReply::accepted(request.id.wrapping_add(1)));
            }
            None => {}
        }

        let reply = handlers::route(&request, &mut inner.state);
        tracing::debug!(
            method = %request.method,
            id = request.id,
            success = reply.is_success(),
            "Simulated controller handled request"
        );
        Ok(reply)
    }
}
