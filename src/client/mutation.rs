//! Write path: add, switch, update and remove
//!
//! Every call runs the same three phases: mode guard, local identity and
//! value checks, then blocking delivery.

use super::{Tool, ToolMutation};
use crate::domain::ToolParams;
use crate::error::Result;
use crate::guard::{require_finite, require_idle, require_name, require_new_name, require_not_flange};
use crate::protocol::{Methods, NameParams, ProfileParams};
use crate::robot::Robot;

impl<R: Robot + ?Sized> ToolMutation for Tool<'_, R> {
    fn add(&self, name: &str, params: &ToolParams) -> Result<()> {
        require_idle(self.robot(), "Add")?;
        require_name(name)?;
        require_new_name(name)?;
        require_finite(params)?;

        let request = ProfileParams {
            name: name.to_string(),
            params: params.clone(),
        };
        self.dispatcher.deliver(Methods::TOOL_ADD, &request)?;
        tracing::info!(tool = name, "Tool add delivered");
        Ok(())
    }

    fn switch(&self, name: &str) -> Result<()> {
        require_idle(self.robot(), "Switch")?;
        require_name(name)?;

        let request = NameParams { name: name.to_string() };
        self.dispatcher.deliver(Methods::TOOL_SWITCH, &request)?;
        tracing::info!(tool = name, "Tool switch delivered");
        Ok(())
    }

    fn update(&self, name: &str, params: &ToolParams) -> Result<()> {
        require_idle(self.robot(), "Update")?;
        require_name(name)?;
        require_not_flange(name, "Update")?;
        require_finite(params)?;

        let request = ProfileParams {
            name: name.to_string(),
            params: params.clone(),
        };
        self.dispatcher.deliver(Methods::TOOL_UPDATE, &request)?;
        tracing::info!(tool = name, "Tool update delivered");
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<()> {
        require_idle(self.robot(), "Remove")?;
        require_name(name)?;
        require_not_flange(name, "Remove")?;

        let request = NameParams { name: name.to_string() };
        self.dispatcher.deliver(Methods::TOOL_REMOVE, &request)?;
        tracing::info!(tool = name, "Tool remove delivered");
        Ok(())
    }
}
