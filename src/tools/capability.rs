//! Typed capability sets
//!
//! Each agent exposes its tools as an enum implementing [`Capability`]. A raw
//! [`ToolCall`] is parsed into exactly one variant with typed arguments, so a
//! tool that does not belong to the agent never reaches its handler.

use serde::de::DeserializeOwned;

use super::tool::{ToolCall, ToolDefinition};
use crate::core::{FrameworkError, FrameworkResult};

/// Closed set of tools an agent can run
pub trait Capability: Sized {
    /// Definitions for every variant
    fn definitions() -> Vec<ToolDefinition>;

    /// Parse a call into a variant
    ///
    /// Returns `UnknownTool` for names outside the set and
    /// `InvalidToolInput` when arguments do not match.
    fn parse(agent: &str, call: &ToolCall) -> FrameworkResult<Self>;
}

/// Deserialize a named parameter from the call arguments
pub fn parse_param<T: DeserializeOwned>(call: &ToolCall, param: &str) -> FrameworkResult<T> {
    let arguments = call.arguments_object();
    let value = arguments
        .get(param)
        .cloned()
        .ok_or_else(|| FrameworkError::invalid_input(&call.name, format!("missing '{}'", param)))?;

    serde_json::from_value(value)
        .map_err(|e| FrameworkError::invalid_input(&call.name, format!("'{}': {}", param, e)))
}

/// Error for a tool name outside the agent's set
pub fn unknown_tool(agent: &str, call: &ToolCall) -> FrameworkError {
    FrameworkError::UnknownTool {
        agent: agent.to_string(),
        tool: call.name.clone(),
    }
}
