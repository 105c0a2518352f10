//! Session phase

use serde::{Deserialize, Serialize};

/// Where a session is in its lifecycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Created, no agent activated yet
    NotStarted,

    /// Waiting for user input
    Idle,

    /// Waiting on the reply generator
    Generating {
        /// Agent the reply is for
        agent: String,
    },

    /// Running a tool call
    ExecutingTool {
        /// Name of the tool being executed
        tool_name: String,
        /// ID of the call
        call_id: String,
    },

    /// Handing control to another agent
    Transferring {
        /// Agent giving up control
        from: String,
        /// Agent receiving control
        to: String,
    },

    /// Intake finished
    Completed,

    /// Turn aborted
    Error {
        /// Error message
        message: String,
    },
}

impl SessionPhase {
    /// Check if the session can no longer accept input
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionPhase::Completed)
    }

    /// Create an error phase
    pub fn error(msg: impl Into<String>) -> Self {
        SessionPhase::Error {
            message: msg.into(),
        }
    }

    /// Create an executing tool phase
    pub fn executing_tool(name: impl Into<String>, id: impl Into<String>) -> Self {
        SessionPhase::ExecutingTool {
            tool_name: name.into(),
            call_id: id.into(),
        }
    }
}

impl Default for SessionPhase {
    fn default() -> Self {
        SessionPhase::NotStarted
    }
}
