//! Tool configuration clients
//!
//! Two capability sets over one concrete type:
//! - `ToolRegistry`: read-only queries, legal in any control mode
//! - `ToolMutation`: add/switch/update/remove, legal only in IDLE mode
//!
//! `Tool` borrows the robot handle, so the handle always outlives it. No
//! registry state is kept between calls: every query goes to the controller.

mod mutation;
mod registry;

use crate::domain::ToolParams;
use crate::error::Result;
use crate::protocol::Dispatcher;
use crate::robot::Robot;

/// Read access to the controller's tool registry
pub trait ToolRegistry {
    /// Names of all configured tools, in controller order
    fn list(&self) -> Result<Vec<String>>;

    /// Name of the active tool ("Flange" when none was switched to)
    fn current_name(&self) -> Result<String>;

    /// Whether a tool with this exact name exists
    fn exists(&self, name: &str) -> Result<bool>;

    /// Parameters of the active tool
    fn params(&self) -> Result<ToolParams>;

    /// Parameters of a named tool; `InvalidArgument` if it does not exist
    fn params_of(&self, name: &str) -> Result<ToolParams>;
}

/// Write access to the controller's tool registry
///
/// Each call returns once the controller accepted the request. The change
/// may not be visible to reads yet; issue a read to confirm it.
pub trait ToolMutation {
    /// Add a new tool; the name must not be taken
    fn add(&self, name: &str, params: &ToolParams) -> Result<()>;

    /// Make an existing tool the active one
    fn switch(&self, name: &str) -> Result<()>;

    /// Replace all parameters of an existing tool
    fn update(&self, name: &str, params: &ToolParams) -> Result<()>;

    /// Delete an existing tool other than Flange
    fn remove(&self, name: &str) -> Result<()>;
}

/// Tool interface bound to a connected robot
pub struct Tool<'a, R: Robot + ?Sized> {
    dispatcher: Dispatcher<'a, R>,
}

impl<'a, R: Robot + ?Sized> Tool<'a, R> {
    /// Create the interface. Sends nothing.
    pub fn new(robot: &'a R) -> Self {
        Self {
            dispatcher: Dispatcher::new(robot),
        }
    }

    /// The borrowed robot handle
    pub fn robot(&self) -> &'a R {
        self.dispatcher.robot()
    }
}
