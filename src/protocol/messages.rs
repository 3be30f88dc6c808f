//! Payloads exchanged with the robot controller over the tool channel.
//!
//! Each call is one `ToolRequest` answered by exactly one `ToolReply` with
//! the same id. The `Robot` collaborator owns framing and encoding on the
//! wire; this module only fixes the shape of what it carries.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::ToolParams;

/// A single tool method call addressed to the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolRequest {
    /// Per-handle sequence number, echoed back in the reply.
    pub id: u64,
    /// One of the `tool.*` names in `Methods`.
    pub method: String,
    /// Method arguments; an empty object for queries without arguments.
    #[serde(default)]
    pub params: Value,
}

impl ToolRequest {
    pub fn new(id: u64, method: impl Into<String>, params: Value) -> Self {
        Self {
            id,
            method: method.into(),
            params,
        }
    }

    /// Query with an empty argument object (tool.list, tool.name).
    pub fn no_params(id: u64, method: impl Into<String>) -> Self {
        Self::new(id, method, Value::Object(Default::default()))
    }

    /// True for add, switch, update and remove.
    pub fn is_mutating(&self) -> bool {
        Methods::is_mutating(&self.method)
    }
}

/// The controller's answer to one `ToolRequest`.
///
/// Exactly one of `result` and `error` is expected; a reply carrying neither
/// is treated as a communication failure by the dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolReply {
    /// Id of the request being answered.
    pub id: u64,
    /// Method-specific payload, see the `*Result` types below.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Set when the controller refused the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ControllerError>,
}

impl ToolReply {
    pub fn success(id: u64, result: Value) -> Self {
        Self {
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: u64, error: ControllerError) -> Self {
        Self {
            id,
            result: None,
            error: Some(error),
        }
    }

    /// `{"accepted": true}`, the answer to every successful mutation.
    pub fn accepted(id: u64) -> Self {
        Self::success(id, serde_json::json!({ "accepted": true }))
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Why the controller refused a tool request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerError {
    /// One of the `ErrorCode` values; unknown codes are still carried through.
    pub code: i32,
    pub message: String,
    /// Structured detail, e.g. required and current mode for `WRONG_MODE`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ControllerError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(code: i32, message: impl Into<String>, data: Value) -> Self {
        Self {
            code,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Request envelope is unusable, e.g. params is not an object.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::INVALID_REQUEST, message)
    }

    pub fn method_not_found(method: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::METHOD_NOT_FOUND,
            format!("Unknown method: {}", method.into()),
        )
    }

    /// Missing or ill-typed `name` / `params` argument.
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::INVALID_PARAMS, message)
    }

    pub fn tool_not_found(name: &str) -> Self {
        Self::new(
            ErrorCode::TOOL_NOT_FOUND,
            format!("Tool [{}] does not exist", name),
        )
    }

    /// Mutation attempted outside the required control mode.
    pub fn wrong_mode(required: &str, current: &str) -> Self {
        Self::with_data(
            ErrorCode::WRONG_MODE,
            format!("Robot is in {} mode, {} is required", current, required),
            serde_json::json!({
                "required": required,
                "current": current,
            }),
        )
    }

    pub fn tool_exists(name: &str) -> Self {
        Self::new(
            ErrorCode::TOOL_EXISTS,
            format!("Tool [{}] already exists", name),
        )
    }

    /// Update or remove aimed at Flange.
    pub fn reserved_tool(name: &str) -> Self {
        Self::new(
            ErrorCode::RESERVED_TOOL,
            format!("Tool [{}] is reserved and cannot be modified", name),
        )
    }
}

/// Rejection codes the controller may send.
///
/// The negative range is the generic envelope family; the 1xxx range is
/// specific to tool management.
pub struct ErrorCode;

impl ErrorCode {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
    /// No tool registered under the requested name.
    pub const TOOL_NOT_FOUND: i32 = 1001;
    /// Robot not in IDLE for a mutating request.
    pub const WRONG_MODE: i32 = 1002;
    /// Add with a name that is already registered, Flange included.
    pub const TOOL_EXISTS: i32 = 1003;
    /// Update or remove aimed at Flange.
    pub const RESERVED_TOOL: i32 = 1004;
}

/// Method names on the tool channel.
pub struct Methods;

impl Methods {
    // Queries
    pub const TOOL_LIST: &'static str = "tool.list";
    pub const TOOL_NAME: &'static str = "tool.name";
    pub const TOOL_EXIST: &'static str = "tool.exist";
    pub const TOOL_PARAMS: &'static str = "tool.params";

    // Mutations
    pub const TOOL_ADD: &'static str = "tool.add";
    pub const TOOL_SWITCH: &'static str = "tool.switch";
    pub const TOOL_UPDATE: &'static str = "tool.update";
    pub const TOOL_REMOVE: &'static str = "tool.remove";

    pub fn is_mutating(method: &str) -> bool {
        matches!(
            method,
            Self::TOOL_ADD | Self::TOOL_SWITCH | Self::TOOL_UPDATE | Self::TOOL_REMOVE
        )
    }
}

/// Params carrying a tool name (tool.exist, tool.params, tool.switch, tool.remove).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameParams {
    pub name: String,
}

/// Params carrying a tool name and its parameters (tool.add, tool.update).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileParams {
    pub name: String,
    pub params: ToolParams,
}

/// Result of tool.list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResult {
    pub names: Vec<String>,
}

/// Result of tool.name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameResult {
    pub name: String,
}

/// Result of tool.exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExistsResult {
    pub exists: bool,
}

/// Result of tool.params.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamsResult {
    pub params: ToolParams,
}

/// Acknowledgement of a mutating request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ack {
    pub accepted: bool,
}
