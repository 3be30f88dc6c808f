//! Protocol dispatcher shared by the read and write clients.
//!
//! Builds a `ToolRequest`, blocks on the robot's send/receive primitive and
//! turns the reply into either a typed result or a `ToolError`:
//! - transport failures and anything that doesn't look like a valid reply
//!   to *this* request become `CommunicationFailure`
//! - explicit controller rejections become `InvalidOperation` or
//!   `InvalidArgument` according to their error code

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Result, ToolError};
use crate::protocol::messages::{Ack, ControllerError, ErrorCode, ToolRequest};
use crate::robot::Robot;

/// Map a controller rejection onto the caller-facing error taxonomy.
pub fn translate_rejection(error: &ControllerError) -> ToolError {
    match error.code {
        ErrorCode::TOOL_NOT_FOUND | ErrorCode::TOOL_EXISTS | ErrorCode::INVALID_PARAMS => {
            ToolError::InvalidArgument(error.message.clone())
        }
        ErrorCode::WRONG_MODE | ErrorCode::RESERVED_TOOL => {
            ToolError::InvalidOperation(error.message.clone())
        }
        code => ToolError::CommunicationFailure(format!(
            "controller error {}: {}",
            code, error.message
        )),
    }
}

/// Request/reply machinery bound to one borrowed robot handle.
pub struct Dispatcher<'a, R: Robot + ?Sized> {
    robot: &'a R,
    next_id: AtomicU64,
}

impl<'a, R: Robot + ?Sized> Dispatcher<'a, R> {
    pub fn new(robot: &'a R) -> Self {
        Self {
            robot,
            next_id: AtomicU64::new(1),
        }
    }

    /// The borrowed robot handle.
    pub fn robot(&self) -> &'a R {
        self.robot
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Send a request without parameters and decode the reply.
    pub fn query<T: DeserializeOwned>(&self, method: &str) -> Result<T> {
        self.call(method, Value::Object(Default::default()))
    }

    /// Send a request with typed parameters and decode the reply.
    pub fn call_with<P: Serialize, T: DeserializeOwned>(&self, method: &str, params: &P) -> Result<T> {
        let params = serde_json::to_value(params).map_err(|e| {
            ToolError::CommunicationFailure(format!("Failed to serialize {} params: {}", method, e))
        })?;
        self.call(method, params)
    }

    /// Send a mutating request and wait until the controller accepts it.
    ///
    /// Acceptance means the controller began applying the change, not that
    /// subsequent reads already observe it.
    pub fn deliver<P: Serialize>(&self, method: &str, params: &P) -> Result<()> {
        let ack: Ack = self.call_with(method, params)?;
        if !ack.accepted {
            return Err(ToolError::CommunicationFailure(format!(
                "{} was not acknowledged by the controller",
                method
            )));
        }
        Ok(())
    }

    /// Send a request and decode the reply's result.
    pub fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let result = self.exchange(method, params)?;
        serde_json::from_value(result).map_err(|e| {
            tracing::warn!(method, error = %e, "Reply result has unexpected shape");
            ToolError::CommunicationFailure(format!("Malformed {} reply: {}", method, e))
        })
    }

    fn exchange(&self, method: &str, params: Value) -> Result<Value> {
        let id = self.next_id();
        let request = ToolRequest::new(id, method, params);
        tracing::debug!(method, id, "Dispatching tool request");

        let reply = self.robot.send_request(request).map_err(|e| {
            tracing::warn!(method, id, error = %e, "Tool request failed in transport");
            ToolError::from(e)
        })?;

        if reply.id != id {
            tracing::warn!(method, id, reply_id = reply.id, "Reply does not match request");
            return Err(ToolError::CommunicationFailure(format!(
                "Reply id {} does not match request id {}",
                reply.id, id
            )));
        }

        match (reply.result, reply.error) {
            (_, Some(error)) => {
                tracing::debug!(method, id, code = error.code, "Controller rejected request");
                Err(translate_rejection(&error))
            }
            (Some(result), None) => Ok(result),
            (None, None) => Err(ToolError::CommunicationFailure(format!(
                "Reply to {} carries neither result nor error",
                method
            ))),
        }
    }
}
