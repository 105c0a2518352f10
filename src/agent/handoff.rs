//! Agent handoff
//!
//! A handoff happens in two steps:
//! 1. [`transfer_to`] refreshes the target's instructions and records the
//!    current agent as `previous_agent`. No history moves.
//! 2. [`activate`] runs when the driver makes the target active. It tags the
//!    connection and merges a truncated window of the previous agent's history
//!    into the target, skipping items it already holds.
//!
//! The driver requests the opening reply after `activate` returns.

use std::collections::HashMap;

use crate::core::{FrameworkError, FrameworkResult};
use crate::history::{truncate, TruncationPolicy};
use crate::prompts::PromptRenderer;
use crate::session::SessionState;

use super::agent::Agent;

/// What an activation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationReport {
    /// Agent that became active
    pub agent: String,
    /// Agent whose history was carried, if any
    pub previous: Option<String>,
    /// Items in the truncated window
    pub carried: usize,
    /// Items actually added after deduplication
    pub merged: usize,
}

/// Resolve a transfer target and prepare it
///
/// Fails with `UnknownAgent` when `name` is not registered, leaving
/// `previous_agent` untouched.
pub fn transfer_to<'s>(
    state: &'s mut SessionState,
    name: &str,
    current: &str,
    renderer: &dyn PromptRenderer,
) -> FrameworkResult<&'s mut dyn Agent> {
    let target = state
        .agents
        .get_mut(name)
        .ok_or_else(|| FrameworkError::UnknownAgent(name.to_string()))?;

    target.set_data(&state.data, renderer);

    tracing::info!("[Handoff] Transfer {} -> {}", current, name);
    state.previous_agent = Some(current.to_string());

    Ok(target)
}

/// Make `name` the active agent's context
pub async fn activate(
    state: &mut SessionState,
    name: &str,
    policy: &TruncationPolicy,
    attribute_key: &str,
) -> FrameworkResult<ActivationReport> {
    if !state.agents.contains(name) {
        return Err(FrameworkError::UnknownAgent(name.to_string()));
    }

    if let Some(connection) = state.connection.clone() {
        let attributes = HashMap::from([(attribute_key.to_string(), name.to_string())]);
        if let Err(e) = connection.set_attributes(attributes).await {
            tracing::warn!("[Handoff] Failed to tag participant for '{}': {}", name, e);
        }
    }

    let previous = state.previous_agent.clone();
    let window = match previous.as_deref() {
        Some(prev) => match state.agents.get(prev) {
            Some(agent) => truncate(agent.chat_ctx().items(), policy),
            None => {
                tracing::warn!("[Handoff] Previous agent '{}' is not registered", prev);
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    let carried = window.len();
    let target = state.agents.require_mut(name)?;
    let merged = target.chat_ctx_mut().merge_unique(window);

    tracing::info!(
        "[Handoff] Activated '{}' (carried {}, merged {}, history {})",
        name,
        carried,
        merged,
        target.chat_ctx().len()
    );

    Ok(ActivationReport {
        agent: name.to_string(),
        previous,
        carried,
        merged,
    })
}
