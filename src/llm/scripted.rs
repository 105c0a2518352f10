//! Scripted generator
//!
//! Replays a fixed queue of turns and records every request it receives.
//! An exhausted script yields empty turns.

use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use super::provider::{GeneratedTurn, ReplyGenerator, ReplyRequest};

/// Generator that replays queued turns
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    turns: Mutex<VecDeque<GeneratedTurn>>,
    requests: Mutex<Vec<ReplyRequest>>,
}

impl ScriptedGenerator {
    /// Create a generator from a list of turns
    pub fn new(turns: impl IntoIterator<Item = GeneratedTurn>) -> Self {
        Self {
            turns: Mutex::new(turns.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<ReplyRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Turns not yet consumed
    pub fn remaining(&self) -> usize {
        self.turns.lock().map(|turns| turns.len()).unwrap_or(0)
    }
}

#[async_trait]
impl ReplyGenerator for ScriptedGenerator {
    async fn generate(&self, request: ReplyRequest) -> Result<GeneratedTurn> {
        tracing::debug!(
            "[ScriptedGenerator] Request for '{}' ({} history items)",
            request.agent,
            request.history.len()
        );

        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        let turn = self
            .turns
            .lock()
            .ok()
            .and_then(|mut turns| turns.pop_front())
            .unwrap_or_default();
        Ok(turn)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
