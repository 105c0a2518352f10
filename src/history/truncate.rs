//! Context truncation
//!
//! Produces a bounded window of the most recent eligible history items.
//! Only eligible items count toward `keep_last_n`; filtered-out items are
//! skipped without consuming the budget.

use serde::{Deserialize, Serialize};

use super::item::HistoryItem;

/// Filter and size policy for a truncated window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruncationPolicy {
    /// Number of retained items (not scanned items)
    pub keep_last_n: usize,

    /// Keep system messages
    #[serde(default)]
    pub keep_system_messages: bool,

    /// Keep function calls and their outputs
    #[serde(default)]
    pub keep_function_calls: bool,
}

impl TruncationPolicy {
    /// Create a policy keeping the last `n` eligible items with both filters on
    pub fn new(keep_last_n: usize) -> Self {
        Self {
            keep_last_n,
            keep_system_messages: false,
            keep_function_calls: false,
        }
    }

    /// Policy applied when a new agent inherits its predecessor's history
    pub fn handoff() -> Self {
        Self {
            keep_last_n: 50,
            keep_system_messages: false,
            keep_function_calls: true,
        }
    }

    /// Set whether system messages are kept
    pub fn with_system_messages(mut self, keep: bool) -> Self {
        self.keep_system_messages = keep;
        self
    }

    /// Set whether function calls are kept
    pub fn with_function_calls(mut self, keep: bool) -> Self {
        self.keep_function_calls = keep;
        self
    }

    /// Whether an item passes the filters
    pub fn is_eligible(&self, item: &HistoryItem) -> bool {
        if !self.keep_system_messages && item.is_system_message() {
            return false;
        }
        if !self.keep_function_calls && item.is_function_item() {
            return false;
        }
        true
    }
}

impl Default for TruncationPolicy {
    fn default() -> Self {
        Self::new(6)
    }
}

/// Truncate `items` (oldest first) to at most `policy.keep_last_n` items
///
/// The result preserves source order and never starts with a function call
/// or function call output.
pub fn truncate(items: &[HistoryItem], policy: &TruncationPolicy) -> Vec<HistoryItem> {
    if policy.keep_last_n == 0 {
        return Vec::new();
    }

    let mut window: Vec<HistoryItem> = items
        .iter()
        .rev()
        .filter(|item| policy.is_eligible(item))
        .take(policy.keep_last_n)
        .cloned()
        .collect();
    window.reverse();

    // A tool fragment with no preceding message cannot open a window
    let dangling = window
        .iter()
        .take_while(|item| item.is_function_item())
        .count();
    if dangling > 0 {
        tracing::debug!("[Truncate] Dropping {} leading tool item(s)", dangling);
        window.drain(..dangling);
    }

    window
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ids(items: &[HistoryItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    fn item(id: &str, base: HistoryItem) -> HistoryItem {
        HistoryItem::with_id(id, base.content)
    }

    /// `[sys, user1, assistant1(tool-call), tool-result1, assistant2, user2, assistant3]`
    fn sample_history() -> Vec<HistoryItem> {
        vec![
            item("sys", HistoryItem::system("You are a clinic intake assistant")),
            item("user1", HistoryItem::user("I have a headache")),
            item(
                "assistant1",
                HistoryItem::function_call("call_1", "update_symptom_form", json!({})),
            ),
            item(
                "tool_result1",
                HistoryItem::function_output("call_1", "update_symptom_form", "ok", false),
            ),
            item("assistant2", HistoryItem::assistant("How long has it lasted?")),
            item("user2", HistoryItem::user("Two days")),
            item("assistant3", HistoryItem::assistant("Anything that helps?")),
        ]
    }

    fn handoff(n: usize) -> TruncationPolicy {
        TruncationPolicy::new(n).with_function_calls(true)
    }

    #[test]
    fn test_keeps_last_three() {
        let result = truncate(&sample_history(), &handoff(3));
        assert_eq!(ids(&result), vec!["assistant2", "user2", "assistant3"]);
    }

    #[test]
    fn test_keeps_last_two() {
        let result = truncate(&sample_history(), &handoff(2));
        assert_eq!(ids(&result), vec!["user2", "assistant3"]);
    }

    #[test]
    fn test_strips_leading_tool_fragment() {
        let items = vec![
            item("tool_call", HistoryItem::function_call("c", "x", json!({}))),
            item("tool_result", HistoryItem::function_output("c", "x", "ok", false)),
            item("user1", HistoryItem::user("hello")),
        ];
        let result = truncate(&items, &handoff(3));
        assert_eq!(ids(&result), vec!["user1"]);
    }

    #[test]
    fn test_window_cut_inside_tool_exchange() {
        // n=5 lands on tool_result1 as the oldest kept item
        let result = truncate(&sample_history(), &handoff(5));
        assert_eq!(ids(&result), vec!["assistant2", "user2", "assistant3"]);
        // n=6 reaches user1, so the tool exchange stays attached to it
        let result = truncate(&sample_history(), &handoff(6));
        assert_eq!(
            ids(&result),
            vec!["user1", "assistant1", "tool_result1", "assistant2", "user2", "assistant3"]
        );
    }

    #[test]
    fn test_filtered_items_do_not_consume_budget() {
        // With function calls filtered out, n=4 reaches back past the tool pair
        let policy = TruncationPolicy::new(4);
        let result = truncate(&sample_history(), &policy);
        assert_eq!(ids(&result), vec!["user1", "assistant2", "user2", "assistant3"]);
    }

    #[test]
    fn test_system_messages() {
        let dropped = truncate(&sample_history(), &handoff(50));
        assert!(dropped.iter().all(|i| !i.is_system_message()));

        let kept = truncate(&sample_history(), &handoff(50).with_system_messages(true));
        assert_eq!(kept.first().map(|i| i.id.as_str()), Some("sys"));
        assert_eq!(kept.len(), 7);
    }

    #[test]
    fn test_edge_cases() {
        assert!(truncate(&[], &handoff(3)).is_empty());
        assert!(truncate(&sample_history(), &handoff(0)).is_empty());

        let only_system = vec![HistoryItem::system("a"), HistoryItem::system("b")];
        assert!(truncate(&only_system, &handoff(3)).is_empty());

        let only_tools = vec![
            HistoryItem::function_call("c", "x", json!({})),
            HistoryItem::function_output("c", "x", "ok", false),
        ];
        assert!(truncate(&only_tools, &handoff(3)).is_empty());
    }

    #[test]
    fn test_length_bound_and_head_for_every_n() {
        let history = sample_history();
        for n in 0..10 {
            let result = truncate(&history, &handoff(n));
            assert!(result.len() <= n);
            assert!(result.first().map_or(true, |i| !i.is_function_item()));
        }
    }

    #[test]
    fn test_idempotent() {
        let history = sample_history();
        for n in 0..10 {
            let once = truncate(&history, &handoff(n));
            let twice = truncate(&once, &handoff(n));
            assert_eq!(ids(&once), ids(&twice));
        }
    }

    #[test]
    fn test_policy_defaults() {
        let default = TruncationPolicy::default();
        assert_eq!(default.keep_last_n, 6);
        assert!(!default.keep_system_messages);
        assert!(!default.keep_function_calls);

        let handoff = TruncationPolicy::handoff();
        assert_eq!(handoff.keep_last_n, 50);
        assert!(!handoff.keep_system_messages);
        assert!(handoff.keep_function_calls);
    }
}
