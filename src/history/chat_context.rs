//! Chat context - an agent's own ordered history

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::item::{HistoryItem, Role};

/// Ordered history owned by a single agent, oldest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatContext {
    items: Vec<HistoryItem>,
}

impl ChatContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context from existing items
    pub fn from_items(items: Vec<HistoryItem>) -> Self {
        Self { items }
    }

    /// Get the items
    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    /// Append an item
    pub fn push(&mut self, item: HistoryItem) {
        self.items.push(item);
    }

    /// Append a message
    pub fn add_message(&mut self, role: Role, text: impl Into<String>) -> &HistoryItem {
        self.items.push(HistoryItem::message(role, text));
        &self.items[self.items.len() - 1]
    }

    /// Check whether an item with this id is present
    pub fn contains_id(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Append the items whose id is not already present
    ///
    /// Returns the number of items appended. Duplicates inside `incoming`
    /// are collapsed to their first occurrence.
    pub fn merge_unique(&mut self, incoming: impl IntoIterator<Item = HistoryItem>) -> usize {
        let mut seen: HashSet<String> = self.items.iter().map(|i| i.id.clone()).collect();
        let before = self.items.len();

        for item in incoming {
            if seen.insert(item.id.clone()) {
                self.items.push(item);
            }
        }

        self.items.len() - before
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the context is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Last item, if any
    pub fn last(&self) -> Option<&HistoryItem> {
        self.items.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_skips_existing_ids() {
        let shared = HistoryItem::user("I have a fever");
        let mut ctx = ChatContext::from_items(vec![shared.clone()]);

        let added = ctx.merge_unique(vec![shared.clone(), HistoryItem::assistant("Since when?")]);
        assert_eq!(added, 1);
        assert_eq!(ctx.len(), 2);
        assert_eq!(ctx.items()[0].id, shared.id);
    }

    #[test]
    fn test_merge_dedups_within_incoming() {
        let item = HistoryItem::user("hello");
        let mut ctx = ChatContext::new();

        let added = ctx.merge_unique(vec![item.clone(), item.clone()]);
        assert_eq!(added, 1);
        assert!(ctx.contains_id(&item.id));
    }

    #[test]
    fn test_merge_keeps_value_equal_items_with_distinct_ids() {
        let mut ctx = ChatContext::from_items(vec![HistoryItem::user("yes")]);
        let added = ctx.merge_unique(vec![HistoryItem::user("yes")]);
        assert_eq!(added, 1);
        assert_eq!(ctx.len(), 2);
    }

    #[test]
    fn test_add_message() {
        let mut ctx = ChatContext::new();
        assert!(ctx.is_empty());
        let id = ctx.add_message(Role::User, "hi").id.clone();
        assert_eq!(ctx.last().map(|i| i.id.clone()), Some(id));
    }
}
