//! Tool system for intake agents
//!
//! This module provides:
//! - `ToolCall` / `ToolOutcome` - what the generator asks for and what a tool yields
//! - `ToolDefinition` - tool description handed to the generator
//! - `Capability` trait - closed, typed tool set of one agent

mod capability;
mod tool;

pub use capability::{parse_param, unknown_tool, Capability};
pub use tool::{ToolCall, ToolDefinition, ToolInputSchema, ToolOutcome, ToolResult};
