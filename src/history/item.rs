//! History items - the atomic unit of dialogue and tool history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Role of a message item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// Type tag of a history item, used for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Message,
    FunctionCall,
    FunctionCallOutput,
}

/// Payload of a history item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemContent {
    /// A chat message
    Message {
        role: Role,
        text: String,
    },

    /// A tool invocation requested by the model
    FunctionCall {
        call_id: String,
        name: String,
        arguments: Value,
    },

    /// The result of a tool invocation
    FunctionCallOutput {
        call_id: String,
        name: String,
        output: String,
        #[serde(default)]
        is_error: bool,
    },
}

/// One turn-level unit of a transcript
///
/// The `id` is assigned once at creation and survives cloning, so two copies
/// of the same item are recognised as duplicates by identity alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    /// Opaque unique identifier
    pub id: String,

    /// When the item was created
    pub created_at: DateTime<Utc>,

    /// The item payload
    #[serde(flatten)]
    pub content: ItemContent,
}

impl HistoryItem {
    /// Create an item with a fresh identifier
    pub fn new(content: ItemContent) -> Self {
        Self {
            id: format!("item_{}", Uuid::new_v4().simple()),
            created_at: Utc::now(),
            content,
        }
    }

    /// Create an item with an explicit identifier
    pub fn with_id(id: impl Into<String>, content: ItemContent) -> Self {
        Self {
            id: id.into(),
            created_at: Utc::now(),
            content,
        }
    }

    /// Create a message item
    pub fn message(role: Role, text: impl Into<String>) -> Self {
        Self::new(ItemContent::Message {
            role,
            text: text.into(),
        })
    }

    /// Create a system message
    pub fn system(text: impl Into<String>) -> Self {
        Self::message(Role::System, text)
    }

    /// Create a user message
    pub fn user(text: impl Into<String>) -> Self {
        Self::message(Role::User, text)
    }

    /// Create an assistant message
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::message(Role::Assistant, text)
    }

    /// Create a function call item
    pub fn function_call(
        call_id: impl Into<String>,
        name: impl Into<String>,
        arguments: Value,
    ) -> Self {
        Self::new(ItemContent::FunctionCall {
            call_id: call_id.into(),
            name: name.into(),
            arguments,
        })
    }

    /// Create a function call output item
    pub fn function_output(
        call_id: impl Into<String>,
        name: impl Into<String>,
        output: impl Into<String>,
        is_error: bool,
    ) -> Self {
        Self::new(ItemContent::FunctionCallOutput {
            call_id: call_id.into(),
            name: name.into(),
            output: output.into(),
            is_error,
        })
    }

    /// Get the type tag
    pub fn kind(&self) -> ItemKind {
        match self.content {
            ItemContent::Message { .. } => ItemKind::Message,
            ItemContent::FunctionCall { .. } => ItemKind::FunctionCall,
            ItemContent::FunctionCallOutput { .. } => ItemKind::FunctionCallOutput,
        }
    }

    /// Get the role (messages only)
    pub fn role(&self) -> Option<Role> {
        match &self.content {
            ItemContent::Message { role, .. } => Some(*role),
            _ => None,
        }
    }

    /// Get the message text (messages only)
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            ItemContent::Message { text, .. } => Some(text.as_str()),
            _ => None,
        }
    }

    /// Whether this is a function call or function call output
    pub fn is_function_item(&self) -> bool {
        matches!(
            self.kind(),
            ItemKind::FunctionCall | ItemKind::FunctionCallOutput
        )
    }

    /// Whether this is a system message
    pub fn is_system_message(&self) -> bool {
        self.role() == Some(Role::System)
    }
}
