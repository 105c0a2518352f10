//! Framework error types

use thiserror::Error;

/// Errors that can occur in the agent framework
#[derive(Error, Debug)]
pub enum FrameworkError {
    /// Transfer or lookup to an agent that was never registered
    #[error("Unknown agent: {0}")]
    UnknownAgent(String),

    /// Two agents registered under the same name
    #[error("Duplicate agent: {0}")]
    DuplicateAgent(String),

    /// A turn was requested before any agent was activated
    #[error("No active agent")]
    NoActiveAgent,

    /// The session already completed the intake
    #[error("Session already completed: {0}")]
    SessionCompleted(String),

    /// Stored intake record not found
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// Tool name not part of the active agent's capability set
    #[error("Unknown tool '{tool}' for agent '{agent}'")]
    UnknownTool {
        /// Agent the call was routed to
        agent: String,
        /// Name the model asked for
        tool: String,
    },

    /// Tool arguments did not match the typed input record
    #[error("Invalid input for tool '{tool}': {message}")]
    InvalidToolInput {
        /// Tool name
        tool: String,
        /// Parser message
        message: String,
    },

    /// The reply generator failed
    #[error("Generation failed: {0}")]
    Generation(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl FrameworkError {
    /// Create a generic error from a string
    pub fn other(msg: impl Into<String>) -> Self {
        FrameworkError::Other(msg.into())
    }

    /// Create an invalid tool input error
    pub fn invalid_input(tool: impl Into<String>, message: impl Into<String>) -> Self {
        FrameworkError::InvalidToolInput {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Whether this error is a configuration problem that must end the turn
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            FrameworkError::UnknownAgent(_)
                | FrameworkError::DuplicateAgent(_)
                | FrameworkError::NoActiveAgent
                | FrameworkError::InvalidConfig(_)
        )
    }

    /// Whether this error should be reported back to the model as a tool result
    pub fn is_tool_input(&self) -> bool {
        matches!(
            self,
            FrameworkError::UnknownTool { .. } | FrameworkError::InvalidToolInput { .. }
        )
    }
}

/// Result type alias for framework operations
pub type FrameworkResult<T> = Result<T, FrameworkError>;
