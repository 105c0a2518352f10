//! Conversation history
//!
//! This module provides:
//! - `HistoryItem` - a message, function call or function call output with a stable id
//! - `ChatContext` - an agent's own history with identity-based merging
//! - `truncate` - bounded, filtered windows over a history

mod chat_context;
mod item;
mod truncate;

pub use chat_context::ChatContext;
pub use item::{HistoryItem, ItemContent, ItemKind, Role};
pub use truncate::{truncate, TruncationPolicy};
