//! Read path: list, current name, existence and parameter queries

use super::{Tool, ToolRegistry};
use crate::domain::{FLANGE, ToolParams};
use crate::error::Result;
use crate::protocol::{ExistsResult, ListResult, Methods, NameParams, NameResult, ParamsResult};
use crate::robot::Robot;

impl<R: Robot + ?Sized> ToolRegistry for Tool<'_, R> {
    fn list(&self) -> Result<Vec<String>> {
        let result: ListResult = self.dispatcher.query(Methods::TOOL_LIST)?;
        Ok(result.names)
    }

    fn current_name(&self) -> Result<String> {
        let result: NameResult = self.dispatcher.query(Methods::TOOL_NAME)?;
        // An empty name means no tool was ever switched to
        if result.name.is_empty() {
            return Ok(FLANGE.to_string());
        }
        Ok(result.name)
    }

    fn exists(&self, name: &str) -> Result<bool> {
        let params = NameParams { name: name.to_string() };
        let result: ExistsResult = self.dispatcher.call_with(Methods::TOOL_EXIST, &params)?;
        Ok(result.exists)
    }

    fn params(&self) -> Result<ToolParams> {
        let result: ParamsResult = self.dispatcher.query(Methods::TOOL_PARAMS)?;
        Ok(result.params)
    }

    fn params_of(&self, name: &str) -> Result<ToolParams> {
        let params = NameParams { name: name.to_string() };
        let result: ParamsResult = self.dispatcher.call_with(Methods::TOOL_PARAMS, &params)?;
        Ok(result.params)
    }
}
