//! HTTP request handling
//!
//! This module turns an inbound request (method and body) into a registry
//! command and the command's outcome into a status code and body.

pub mod batch;
pub mod command;
pub mod create;
pub mod list;
pub mod response;

pub use command::{Command, RequestError};
pub use response::{Reply, StatusMode};
