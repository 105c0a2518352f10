//! Reply generator trait
//!
//! Abstracts the language-model call so the session driver can run against a
//! hosted model, a human operator, or a script.

use anyhow::Result;
use async_trait::async_trait;

use crate::history::HistoryItem;
use crate::tools::{ToolCall, ToolDefinition};

/// Everything the generator needs for one reply
#[derive(Debug, Clone)]
pub struct ReplyRequest {
    /// Name of the active agent
    pub agent: String,
    /// Rendered instructions of the active agent
    pub instructions: String,
    /// Tools the agent can call
    pub tools: Vec<ToolDefinition>,
    /// Active agent history, oldest first
    pub history: Vec<HistoryItem>,
    /// Whether the user may talk over this reply
    pub allow_interruptions: bool,
}

/// One generated assistant turn
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratedTurn {
    /// Spoken text, if any
    pub text: Option<String>,
    /// Tool calls, in the order they should run
    pub tool_calls: Vec<ToolCall>,
}

impl GeneratedTurn {
    /// Text-only turn
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            tool_calls: Vec::new(),
        }
    }

    /// Turn with a single tool call
    pub fn tool(call: ToolCall) -> Self {
        Self {
            text: None,
            tool_calls: vec![call],
        }
    }

    /// Whether the turn asks for tools
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// Produces assistant turns for the active agent
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    /// Generate the next assistant turn
    async fn generate(&self, request: ReplyRequest) -> Result<GeneratedTurn>;

    /// Generator name for logs
    fn name(&self) -> &str {
        "generator"
    }
}
