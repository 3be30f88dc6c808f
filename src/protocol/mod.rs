//! Protocol layer - typed tool requests and the dispatcher that sends them
//!
//! This module provides:
//! - Message types for requests, replies and controller rejections
//! - Method and error code constants
//! - The dispatcher shared by the read and write clients

pub mod dispatcher;
pub mod messages;

pub use dispatcher::{Dispatcher, translate_rejection};
pub use messages::{
    Ack, ControllerError, ErrorCode, ExistsResult, ListResult, Methods, NameParams, NameResult,
    ParamsResult, ProfileParams, ToolReply, ToolRequest,
};
