//! Intake session driver
//!
//! `IntakeSession` owns the shared state and runs turns for the active agent:
//! request a reply, record it, run tool calls, speak queued utterances and
//! follow transfers. A transfer is completed within the same turn: the target
//! is prepared, activated and asked for a non-interruptible opening reply.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::agent::{activate, transfer_to, ActivationReport, ToolContext};
use crate::core::state::SessionPhase;
use crate::core::{FrameworkError, FrameworkResult, SessionEvent};
use crate::history::{HistoryItem, Role};
use crate::llm::{GeneratedTurn, ReplyGenerator, ReplyRequest};
use crate::prompts::PromptRenderer;
use crate::tools::{ToolCall, ToolOutcome, ToolResult};

use super::config::SessionConfig;
use super::events::{create_event_channel, EventReceiver, EventSender};
use super::metadata::IntakeRecord;
use super::state::SessionState;
use super::storage::IntakeStorage;

/// What the turn loop does after a batch of tool calls
enum Flow {
    Continue,
    Transfer(String),
    Complete,
}

/// A running intake conversation
pub struct IntakeSession {
    state: SessionState,
    generator: Arc<dyn ReplyGenerator>,
    renderer: Arc<dyn PromptRenderer>,
    config: SessionConfig,
    storage: Option<IntakeStorage>,
    active: Option<String>,
    visited: Vec<String>,
    phase: SessionPhase,
    started_at: DateTime<Utc>,
    events: EventSender,
}

impl IntakeSession {
    /// Create a session over prepared state
    pub fn new(
        state: SessionState,
        generator: Arc<dyn ReplyGenerator>,
        renderer: Arc<dyn PromptRenderer>,
        config: SessionConfig,
    ) -> FrameworkResult<Self> {
        config.validate()?;
        let storage = config.storage_dir.as_ref().map(IntakeStorage::new);

        Ok(Self {
            state,
            generator,
            renderer,
            config,
            storage,
            active: None,
            visited: Vec::new(),
            phase: SessionPhase::NotStarted,
            started_at: Utc::now(),
            events: create_event_channel(),
        })
    }

    /// Subscribe to session events
    pub fn subscribe(&self) -> EventReceiver {
        self.events.subscribe()
    }

    pub fn session_id(&self) -> &str {
        &self.state.session_id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    /// Name of the active agent
    pub fn active_agent(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Agents in activation order
    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    pub fn is_completed(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Activate the first agent and run its opening turn
    pub async fn start(&mut self, agent: &str) -> FrameworkResult<()> {
        self.ensure_open()?;
        tracing::info!("[IntakeSession] Starting {} with '{}'", self.session_id(), agent);

        let result = match self.prepare_first(agent) {
            Ok(()) => match self.enter(agent).await {
                Ok(_) => self.run_turn(false).await,
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        };
        self.finish_turn(result)
    }

    /// Add user text to the active agent and run a turn
    pub async fn user_input(&mut self, text: &str) -> FrameworkResult<()> {
        self.ensure_open()?;
        let name = self.active.clone().ok_or(FrameworkError::NoActiveAgent)?;

        self.state
            .agents
            .require_mut(&name)?
            .chat_ctx_mut()
            .add_message(Role::User, text);

        let result = self.run_turn(true).await;
        self.finish_turn(result)
    }

    /// Speak a scripted line as the active agent
    pub fn say(&mut self, text: &str) -> FrameworkResult<()> {
        let name = self.active.clone().ok_or(FrameworkError::NoActiveAgent)?;
        self.speak(&name, text)
    }

    fn ensure_open(&self) -> FrameworkResult<()> {
        if self.is_completed() {
            return Err(FrameworkError::SessionCompleted(
                self.state.session_id.clone(),
            ));
        }
        Ok(())
    }

    fn finish_turn(&mut self, result: FrameworkResult<()>) -> FrameworkResult<()> {
        match result {
            Ok(()) => {
                if !self.phase.is_terminal() {
                    self.phase = SessionPhase::Idle;
                }
                Ok(())
            }
            Err(e) => {
                tracing::error!("[IntakeSession] Turn aborted: {}", e);
                self.phase = SessionPhase::error(e.to_string());
                self.emit(SessionEvent::Error(e.to_string()));
                Err(e)
            }
        }
    }

    fn emit(&self, event: SessionEvent) -> usize {
        self.events.send(event).unwrap_or(0)
    }

    fn speak(&mut self, agent: &str, text: &str) -> FrameworkResult<()> {
        self.state
            .agents
            .require_mut(agent)?
            .chat_ctx_mut()
            .add_message(Role::Assistant, text);
        self.emit(SessionEvent::Say {
            agent: agent.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    /// Render instructions for a first agent that was never given data
    fn prepare_first(&mut self, agent: &str) -> FrameworkResult<()> {
        let target = self.state.agents.require_mut(agent)?;
        if target.instructions().is_empty() {
            target.set_data(&self.state.data, self.renderer.as_ref());
        }
        Ok(())
    }

    async fn enter(&mut self, agent: &str) -> FrameworkResult<ActivationReport> {
        let report = activate(
            &mut self.state,
            agent,
            &self.config.handoff_policy,
            &self.config.agent_attribute_key,
        )
        .await?;

        self.active = Some(agent.to_string());
        self.visited.push(agent.to_string());
        self.emit(SessionEvent::AgentEntered {
            agent: agent.to_string(),
            carried: report.carried,
            merged: report.merged,
        });
        Ok(report)
    }

    fn handoff(&mut self, from: &str, to: &str) -> FrameworkResult<()> {
        self.phase = SessionPhase::Transferring {
            from: from.to_string(),
            to: to.to_string(),
        };
        transfer_to(&mut self.state, to, from, self.renderer.as_ref())?;
        self.emit(SessionEvent::Transferred {
            from: from.to_string(),
            to: to.to_string(),
        });
        Ok(())
    }

    async fn run_turn(&mut self, allow_interruptions: bool) -> FrameworkResult<()> {
        let mut allow_interruptions = allow_interruptions;
        let mut iterations = 0;

        loop {
            if iterations >= self.config.max_tool_iterations {
                tracing::warn!(
                    "[IntakeSession] Reached max tool iterations ({})",
                    self.config.max_tool_iterations
                );
                return Ok(());
            }
            iterations += 1;

            let name = self.active.clone().ok_or(FrameworkError::NoActiveAgent)?;
            let turn = self.generate(&name, allow_interruptions).await?;
            // Only the opening reply of an activation is protected
            allow_interruptions = true;

            if let Some(text) = turn.text.as_deref().filter(|t| !t.is_empty()) {
                self.state
                    .agents
                    .require_mut(&name)?
                    .chat_ctx_mut()
                    .add_message(Role::Assistant, text);
                self.emit(SessionEvent::AssistantText {
                    agent: name.clone(),
                    text: text.to_string(),
                });
            }

            if !turn.has_tool_calls() {
                return Ok(());
            }

            match self.run_tools(&name, &turn.tool_calls)? {
                Flow::Continue => {}
                Flow::Transfer(target) => {
                    self.handoff(&name, &target)?;
                    self.enter(&target).await?;
                    allow_interruptions = false;
                    iterations = 0;
                }
                Flow::Complete => {
                    self.complete(&name)?;
                    return Ok(());
                }
            }
        }
    }

    async fn generate(&mut self, name: &str, allow_interruptions: bool) -> FrameworkResult<GeneratedTurn> {
        let request = {
            let agent = self.state.agents.require(name)?;
            ReplyRequest {
                agent: name.to_string(),
                instructions: agent.instructions().to_string(),
                tools: agent.tool_definitions(),
                history: agent.chat_ctx().items().to_vec(),
                allow_interruptions,
            }
        };

        self.phase = SessionPhase::Generating {
            agent: name.to_string(),
        };
        self.emit(SessionEvent::ReplyRequested {
            agent: name.to_string(),
            allow_interruptions,
        });

        tracing::debug!(
            "[IntakeSession] '{}' reply from {} generator",
            name,
            self.generator.name()
        );
        self.generator
            .generate(request)
            .await
            .map_err(|e| FrameworkError::Generation(e.to_string()))
    }

    /// Run calls in order, stopping at the first transfer or completion
    fn run_tools(&mut self, name: &str, calls: &[ToolCall]) -> FrameworkResult<Flow> {
        for call in calls {
            self.phase = SessionPhase::executing_tool(&call.name, &call.id);
            self.state
                .agents
                .require_mut(name)?
                .chat_ctx_mut()
                .push(HistoryItem::function_call(
                    &call.id,
                    &call.name,
                    call.arguments.clone(),
                ));
            self.emit(SessionEvent::ToolStarted {
                id: call.id.clone(),
                name: call.name.clone(),
                arguments: call.arguments.clone(),
            });

            let (result, outcome, utterances) = self.execute_tool(name, call)?;

            self.state
                .agents
                .require_mut(name)?
                .chat_ctx_mut()
                .push(HistoryItem::function_output(
                    &call.id,
                    &call.name,
                    &result.output,
                    result.is_error,
                ));
            self.emit(SessionEvent::ToolFinished {
                id: call.id.clone(),
                output: result.output.clone(),
                is_error: result.is_error,
            });

            for text in utterances {
                self.speak(name, &text)?;
            }

            match outcome {
                Some(ToolOutcome::Transfer { target }) => return Ok(Flow::Transfer(target)),
                Some(ToolOutcome::Complete) => return Ok(Flow::Complete),
                _ => {}
            }
        }

        Ok(Flow::Continue)
    }

    fn execute_tool(
        &mut self,
        name: &str,
        call: &ToolCall,
    ) -> FrameworkResult<(ToolResult, Option<ToolOutcome>, Vec<String>)> {
        let agent = self.state.agents.require(name)?;
        let mut ctx = ToolContext::new(&mut self.state.data);

        tracing::info!("[IntakeSession] '{}' executing tool: {}", name, call.name);
        tracing::debug!("[IntakeSession] Input: {}", call.arguments);

        let (result, outcome) = match agent.call_tool(call, &mut ctx) {
            Ok(ToolOutcome::Output(text)) => (ToolResult::success(text), None),
            Ok(ToolOutcome::Transfer { target }) => (
                ToolResult::success(format!("Transferring to {}.", target)),
                Some(ToolOutcome::Transfer { target }),
            ),
            Ok(ToolOutcome::Complete) => (
                ToolResult::success("Intake complete."),
                Some(ToolOutcome::Complete),
            ),
            Err(e) if e.is_tool_input() => {
                tracing::warn!("[IntakeSession] Tool error: {}", e);
                (ToolResult::error(e.to_string()), None)
            }
            Err(e) => return Err(e),
        };

        Ok((result, outcome, ctx.take_utterances()))
    }

    fn complete(&mut self, name: &str) -> FrameworkResult<()> {
        if let Some(storage) = &self.storage {
            let record = IntakeRecord::new(
                self.state.session_id.clone(),
                name,
                self.state.data.clone(),
                self.started_at,
            )
            .with_agents_visited(self.visited.clone());
            let transcript = self.state.agents.require(name)?.chat_ctx().items();
            storage.save(&record, transcript)?;
        }

        tracing::info!("[IntakeSession] Intake {} completed", self.state.session_id);
        self.phase = SessionPhase::Completed;
        self.emit(SessionEvent::Completed {
            session_id: self.state.session_id.clone(),
        });
        Ok(())
    }
}
