//! The robot collaborator
//!
//! A `Robot` owns an established, authenticated session with the controller.
//! Tool clients borrow it; they never open, close or own the channel. Other
//! subsystems may share the same handle, so implementations must correlate
//! each reply with its request themselves.

use crate::domain::ControlMode;
use crate::error::TransportError;
use crate::protocol::{ToolReply, ToolRequest};

/// Connected robot handle consumed by the tool clients
pub trait Robot: Send + Sync {
    /// Current control mode, read from local state without a round-trip
    fn control_mode(&self) -> ControlMode;

    /// Send a request and block until the matching reply arrives or the
    /// transport times out
    fn send_request(&self, request: ToolRequest) -> Result<ToolReply, TransportError>;
}

impl<R: Robot + ?Sized> Robot for &R {
    fn control_mode(&self) -> ControlMode {
        (**self).control_mode()
    }

    fn send_request(&self, request: ToolRequest) -> Result<ToolReply, TransportError> {
        (**self).send_request(request)
    }
}

impl<R: Robot + ?Sized> Robot for std::sync::Arc<R> {
    fn control_mode(&self) -> ControlMode {
        (**self).control_mode()
    }

    fn send_request(&self, request: ToolRequest) -> Result<ToolReply, TransportError> {
        (**self).send_request(request)
    }
}
