//! Events streamed from a running intake session

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Events broadcast FROM a session to its subscribers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEvent {
    // --- Agent lifecycle ---
    /// An agent became active and installed its context
    AgentEntered {
        /// Name of the agent
        agent: String,
        /// Items carried over from the previous agent
        carried: usize,
        /// Items actually merged after deduplication
        merged: usize,
    },

    /// Control moved from one agent to another
    Transferred {
        /// Agent that requested the transfer
        from: String,
        /// Agent that will be activated next
        to: String,
    },

    // --- Replies ---
    /// The driver asked the generator for a reply
    ReplyRequested {
        /// Agent generating the reply
        agent: String,
        /// Whether the user may interrupt this reply
        allow_interruptions: bool,
    },

    /// Text produced by the generator
    AssistantText {
        /// Agent that produced it
        agent: String,
        /// The text
        text: String,
    },

    /// Scripted utterance spoken by a tool
    Say {
        /// Agent speaking
        agent: String,
        /// The text
        text: String,
    },

    // --- Tool execution ---
    /// A tool call is about to run
    ToolStarted {
        /// Call ID
        id: String,
        /// Tool name
        name: String,
        /// Raw arguments from the model
        arguments: Value,
    },

    /// A tool call finished
    ToolFinished {
        /// Call ID
        id: String,
        /// Output returned to the model
        output: String,
        /// Whether the output is an error
        is_error: bool,
    },

    // --- Completion ---
    /// The intake was confirmed
    Completed {
        /// Session ID
        session_id: String,
    },

    /// Turn failed
    Error(String),
}

impl SessionEvent {
    /// Short label for logging
    pub fn label(&self) -> &'static str {
        match self {
            SessionEvent::AgentEntered { .. } => "agent_entered",
            SessionEvent::Transferred { .. } => "transferred",
            SessionEvent::ReplyRequested { .. } => "reply_requested",
            SessionEvent::AssistantText { .. } => "assistant_text",
            SessionEvent::Say { .. } => "say",
            SessionEvent::ToolStarted { .. } => "tool_started",
            SessionEvent::ToolFinished { .. } => "tool_finished",
            SessionEvent::Completed { .. } => "completed",
            SessionEvent::Error(_) => "error",
        }
    }
}
