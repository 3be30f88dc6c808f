//! Request handlers for the simulated controller
//!
//! One handler per tool.* method. Each enforces the registry invariants the
//! real controller enforces and answers with a `ToolReply`.

use serde_json::{Value, json};

use crate::domain::{FLANGE, ToolParams, ToolProfile, is_flange};
use crate::protocol::{ControllerError, Methods, ToolReply, ToolRequest};

use super::controller::ControllerState;

/// Route a request to its handler.
pub(crate) fn route(request: &ToolRequest, state: &mut ControllerState) -> ToolReply {
    let id = request.id;
    let params = &request.params;

    if !params.is_object() {
        return ToolReply::error(id, ControllerError::invalid_request("Request params must be an object"));
    }

    if request.is_mutating() && !state.mode.is_idle() {
        return ToolReply::error(id, ControllerError::wrong_mode("IDLE", state.mode.as_str()));
    }

    match request.method.as_str() {
        Methods::TOOL_LIST => handle_tool_list(id, state),
        Methods::TOOL_NAME => handle_tool_name(id, state),
        Methods::TOOL_EXIST => handle_tool_exist(id, params, state),
        Methods::TOOL_PARAMS => handle_tool_params(id, params, state),
        Methods::TOOL_ADD => handle_tool_add(id, params, state),
        Methods::TOOL_SWITCH => handle_tool_switch(id, params, state),
        Methods::TOOL_UPDATE => handle_tool_update(id, params, state),
        Methods::TOOL_REMOVE => handle_tool_remove(id, params, state),
        other => ToolReply::error(id, ControllerError::method_not_found(other)),
    }
}

fn name_param<'p>(id: u64, params: &'p Value) -> Result<&'p str, ToolReply> {
    match params["name"].as_str() {
        Some(name) => Ok(name),
        None => Err(ToolReply::error(
            id,
            ControllerError::invalid_params("Missing 'name' parameter"),
        )),
    }
}

fn tool_params_param(id: u64, params: &Value) -> Result<ToolParams, ToolReply> {
    serde_json::from_value(params["params"].clone()).map_err(|e| {
        ToolReply::error(
            id,
            ControllerError::invalid_params(format!("Invalid 'params' parameter: {}", e)),
        )
    })
}

/// Handle tool.list - names of all tools in registry order
pub(crate) fn handle_tool_list(id: u64, state: &ControllerState) -> ToolReply {
    let names: Vec<&str> = state.tools.iter().map(|t| t.name.as_str()).collect();
    ToolReply::success(id, json!({ "names": names }))
}

/// Handle tool.name - name of the active tool
pub(crate) fn handle_tool_name(id: u64, state: &ControllerState) -> ToolReply {
    ToolReply::success(id, json!({ "name": state.active }))
}

/// Handle tool.exist - whether a tool exists
pub(crate) fn handle_tool_exist(id: u64, params: &Value, state: &ControllerState) -> ToolReply {
    let name = match name_param(id, params) {
        Ok(name) => name,
        Err(reply) => return reply,
    };
    ToolReply::success(id, json!({ "exists": state.find(name).is_some() }))
}

/// Handle tool.params - params of the named tool, or of the active one when no name is given
pub(crate) fn handle_tool_params(id: u64, params: &Value, state: &ControllerState) -> ToolReply {
    let name = params["name"].as_str().unwrap_or(state.active.as_str());
    match state.find(name) {
        Some(tool) => ToolReply::success(id, json!({ "params": tool.params })),
        None => ToolReply::error(id, ControllerError::tool_not_found(name)),
    }
}

/// Handle tool.add - append a new tool
pub(crate) fn handle_tool_add(id: u64, params: &Value, state: &mut ControllerState) -> ToolReply {
    let name = match name_param(id, params) {
        Ok(name) => name,
        Err(reply) => return reply,
    };
    let tool_params = match tool_params_param(id, params) {
        Ok(p) => p,
        Err(reply) => return reply,
    };

    if name.is_empty() {
        return ToolReply::error(id, ControllerError::invalid_params("Tool name must not be empty"));
    }
    // Flange is always registered, so this also rejects adding it
    if state.find(name).is_some() {
        return ToolReply::error(id, ControllerError::tool_exists(name));
    }

    state.tools.push(ToolProfile::new(name, tool_params));
    tracing::debug!(tool = name, "Simulated controller added tool");
    ToolReply::accepted(id)
}

/// Handle tool.switch - change the active tool
pub(crate) fn handle_tool_switch(id: u64, params: &Value, state: &mut ControllerState) -> ToolReply {
    let name = match name_param(id, params) {
        Ok(name) => name,
        Err(reply) => return reply,
    };
    if state.find(name).is_none() {
        return ToolReply::error(id, ControllerError::tool_not_found(name));
    }

    state.active = name.to_string();
    tracing::debug!(tool = name, "Simulated controller switched tool");
    ToolReply::accepted(id)
}

/// Handle tool.update - replace the params of an existing tool
pub(crate) fn handle_tool_update(id: u64, params: &Value, state: &mut ControllerState) -> ToolReply {
    let name = match name_param(id, params) {
        Ok(name) => name,
        Err(reply) => return reply,
    };
    let tool_params = match tool_params_param(id, params) {
        Ok(p) => p,
        Err(reply) => return reply,
    };
    if is_flange(name) {
        return ToolReply::error(id, ControllerError::reserved_tool(name));
    }

    match state.find_mut(name) {
        Some(tool) => {
            tool.params = tool_params;
            tracing::debug!(tool = name, "Simulated controller updated tool");
            ToolReply::accepted(id)
        }
        None => ToolReply::error(id, ControllerError::tool_not_found(name)),
    }
}

/// Handle tool.remove - delete a tool, falling back to Flange if it was active
pub(crate) fn handle_tool_remove(id: u64, params: &Value, state: &mut ControllerState) -> ToolReply {
    let name = match name_param(id, params) {
        Ok(name) => name,
        Err(reply) => return reply,
    };
    if is_flange(name) {
        return ToolReply::error(id, ControllerError::reserved_tool(name));
    }

    let Some(index) = state.position(name) else {
        return ToolReply::error(id, ControllerError::tool_not_found(name));
    };
    state.tools.remove(index);
    if state.active == name {
        state.active = FLANGE.to_string();
    }
    tracing::debug!(tool = name, "Simulated controller removed tool");
    ToolReply::accepted(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ControlMode;
    use crate::protocol::ErrorCode;

    fn state() -> ControllerState {
        ControllerState::new(ControlMode::Idle)
    }

    fn request(method: &str, params: Value) -> ToolRequest {
        ToolRequest::new(1, method, params)
    }

    fn code(reply: &ToolReply) -> Option<i32> {
        reply.error.as_ref().map(|e| e.code)
    }

    #[test]
    fn test_unknown_method() {
        let reply = route(&request("tool.rename", json!({})), &mut state());
        assert_eq!(code(&reply), Some(ErrorCode::METHOD_NOT_FOUND));
    }

    #[test]
    fn test_null_params_is_invalid_request() {
        let reply = route(&request(Methods::TOOL_LIST, Value::Null), &mut state());
        assert_eq!(code(&reply), Some(ErrorCode::INVALID_REQUEST));

        let reply = route(&request(Methods::TOOL_REMOVE, json!(["Probe"])), &mut state());
        assert_eq!(code(&reply), Some(ErrorCode::INVALID_REQUEST));
    }

    #[test]
    fn test_missing_name_is_invalid_params() {
        let reply = route(&request(Methods::TOOL_EXIST, json!({})), &mut state());
        assert_eq!(code(&reply), Some(ErrorCode::INVALID_PARAMS));
    }

    #[test]
    fn test_add_requires_params() {
        let reply = route(&request(Methods::TOOL_ADD, json!({"name": "Probe"})), &mut state());
        assert_eq!(code(&reply), Some(ErrorCode::INVALID_PARAMS));
    }

    #[test]
    fn test_add_flange_is_duplicate() {
        let params = json!({"name": "Flange", "params": ToolParams::default()});
        let mut state = state();
        let reply = route(&request(Methods::TOOL_ADD, params), &mut state);
        assert_eq!(code(&reply), Some(ErrorCode::TOOL_EXISTS));
        assert_eq!(state.tools.len(), 1);
    }

    #[test]
    fn test_add_and_duplicate() {
        let mut state = state();
        let params = json!({"name": "Probe", "params": ToolParams::default()});

        let first = route(&request(Methods::TOOL_ADD, params.clone()), &mut state);
        assert!(first.is_success());
        let second = route(&request(Methods::TOOL_ADD, params), &mut state);
        assert_eq!(code(&second), Some(ErrorCode::TOOL_EXISTS));
        assert_eq!(state.tools.len(), 2);
    }

    #[test]
    fn test_mutation_outside_idle() {
        let mut state = ControllerState::new(ControlMode::NrtJointPosition);
        let reply = route(&request(Methods::TOOL_SWITCH, json!({"name": "Flange"})), &mut state);
        assert_eq!(code(&reply), Some(ErrorCode::WRONG_MODE));
    }

    #[test]
    fn test_query_outside_idle() {
        let mut state = ControllerState::new(ControlMode::NrtJointPosition);
        let reply = route(&request(Methods::TOOL_LIST, json!({})), &mut state);
        assert!(reply.is_success());
    }

    #[test]
    fn test_params_without_name_uses_active() {
        let mut state = state();
        let reply = route(&request(Methods::TOOL_PARAMS, json!({})), &mut state);
        let params: ToolParams = serde_json::from_value(reply.result.unwrap()["params"].clone()).unwrap();
        assert_eq!(params, ToolParams::default());
    }

    #[test]
    fn test_remove_active_reverts_to_flange() {
        let mut state = state();
        state.tools.push(ToolProfile::new("Probe", ToolParams::default()));
        state.active = "Probe".to_string();

        let reply = route(&request(Methods::TOOL_REMOVE, json!({"name": "Probe"})), &mut state);
        assert!(reply.is_success());
        assert_eq!(state.active, FLANGE);
        assert!(state.find("Probe").is_none());
    }

    #[test]
    fn test_remove_inactive_keeps_active() {
        let mut state = state();
        state.tools.push(ToolProfile::new("Probe", ToolParams::default()));
        state.tools.push(ToolProfile::new("Gripper", ToolParams::default()));
        state.active = "Gripper".to_string();

        route(&request(Methods::TOOL_REMOVE, json!({"name": "Probe"})), &mut state);
        assert_eq!(state.active, "Gripper");
    }

    #[test]
    fn test_remove_and_update_flange_rejected() {
        let mut state = state();
        let remove = route(&request(Methods::TOOL_REMOVE, json!({"name": "Flange"})), &mut state);
        assert_eq!(code(&remove), Some(ErrorCode::RESERVED_TOOL));

        let params = json!({"name": "Flange", "params": ToolParams::default()});
        let update = route(&request(Methods::TOOL_UPDATE, params), &mut state);
        assert_eq!(code(&update), Some(ErrorCode::RESERVED_TOOL));
        assert!(state.find(FLANGE).is_some());
    }
}
