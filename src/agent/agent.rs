//! Agent trait and shared agent state

use serde_json::{json, Value};

use crate::core::FrameworkResult;
use crate::history::ChatContext;
use crate::models::IntakeData;
use crate::prompts::PromptRenderer;
use crate::tools::{ToolCall, ToolDefinition, ToolOutcome};

/// State every agent carries
#[derive(Debug, Clone)]
pub struct AgentCore {
    /// Registry key
    pub name: String,
    /// Prompt template reference
    pub template_id: String,
    /// Current rendered instructions
    pub instructions: String,
    /// Own history, installed on activation
    pub chat_ctx: ChatContext,
}

impl AgentCore {
    /// Create agent state with no instructions and empty history
    pub fn new(name: impl Into<String>, template_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template_id: template_id.into(),
            instructions: String::new(),
            chat_ctx: ChatContext::new(),
        }
    }

    /// Seed the agent with history
    pub fn with_history(mut self, chat_ctx: ChatContext) -> Self {
        self.chat_ctx = chat_ctx;
        self
    }
}

/// Mutable view handed to tool handlers
pub struct ToolContext<'a> {
    /// Collected intake records
    pub data: &'a mut IntakeData,
    utterances: Vec<String>,
}

impl<'a> ToolContext<'a> {
    pub fn new(data: &'a mut IntakeData) -> Self {
        Self {
            data,
            utterances: Vec::new(),
        }
    }

    /// Queue a scripted utterance, spoken by the driver after the tool returns
    pub fn say(&mut self, text: impl Into<String>) {
        self.utterances.push(text.into());
    }

    /// Drain queued utterances
    pub fn take_utterances(&mut self) -> Vec<String> {
        std::mem::take(&mut self.utterances)
    }
}

/// A dialogue agent taking part in the intake
///
/// Implementors provide their [`AgentCore`], the data they need for their
/// instructions, and a closed tool set. Activation is shared and lives in
/// [`crate::agent::handoff`].
pub trait Agent: Send + Sync {
    fn core(&self) -> &AgentCore;

    fn core_mut(&mut self) -> &mut AgentCore;

    fn name(&self) -> &str {
        &self.core().name
    }

    fn instructions(&self) -> &str {
        &self.core().instructions
    }

    fn chat_ctx(&self) -> &ChatContext {
        &self.core().chat_ctx
    }

    fn chat_ctx_mut(&mut self) -> &mut ChatContext {
        &mut self.core_mut().chat_ctx
    }

    /// Data rendered into this agent's instructions
    fn agent_data(&self, _data: &IntakeData) -> Value {
        json!({})
    }

    /// Definitions of the tools this agent can run
    fn tool_definitions(&self) -> Vec<ToolDefinition>;

    /// Run one tool call against the session data
    ///
    /// Unknown tools and malformed arguments come back as `Err` and are
    /// reported to the model as error output.
    fn call_tool(&self, call: &ToolCall, ctx: &mut ToolContext<'_>) -> FrameworkResult<ToolOutcome>;

    /// Re-render instructions from the current session data
    fn set_data(&mut self, data: &IntakeData, renderer: &dyn PromptRenderer) {
        let value = self.agent_data(data);
        let context = render_context(&value);

        tracing::info!("[Agent] Setting data for '{}'", self.name());
        tracing::debug!("[Agent] '{}' context: {}", self.name(), context);

        let instructions = renderer.render(&self.core().template_id, &context);
        self.core_mut().instructions = instructions;
    }
}

/// Pretty JSON for a data value, empty for an empty object
fn render_context(value: &Value) -> String {
    match value {
        Value::Object(map) if map.is_empty() => String::new(),
        Value::Null => String::new(),
        other => serde_json::to_string_pretty(other).unwrap_or_default(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::tools::unknown_tool;
    use std::sync::Mutex;

    /// Renderer that echoes its inputs and records calls
    #[derive(Default)]
    pub(crate) struct EchoRenderer {
        pub calls: Mutex<Vec<(String, String)>>,
    }

    impl PromptRenderer for EchoRenderer {
        fn render(&self, template_id: &str, context: &str) -> String {
            self.calls
                .lock()
                .unwrap()
                .push((template_id.to_string(), context.to_string()));
            format!("{}|{}", template_id, context)
        }
    }

    struct Bare {
        core: AgentCore,
    }

    impl Agent for Bare {
        fn core(&self) -> &AgentCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut AgentCore {
            &mut self.core
        }

        fn tool_definitions(&self) -> Vec<ToolDefinition> {
            Vec::new()
        }

        fn call_tool(
            &self,
            call: &ToolCall,
            _ctx: &mut ToolContext<'_>,
        ) -> FrameworkResult<ToolOutcome> {
            Err(unknown_tool(self.name(), call))
        }
    }

    #[test]
    fn test_default_data_renders_without_context() {
        let mut agent = Bare {
            core: AgentCore::new("bare", "agents/bare.yaml"),
        };
        let renderer = EchoRenderer::default();

        agent.set_data(&IntakeData::default(), &renderer);

        assert_eq!(agent.instructions(), "agents/bare.yaml|");
        assert_eq!(renderer.calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_render_context_is_pretty() {
        let context = render_context(&json!({ "patient": { "name": "A" } }));
        assert_eq!(context, "{\n  \"patient\": {\n    \"name\": \"A\"\n  }\n}");
    }

    #[test]
    fn test_tool_context_queues_utterances() {
        let mut data = IntakeData::default();
        let mut ctx = ToolContext::new(&mut data);
        ctx.say("one");
        ctx.say("two");
        assert_eq!(ctx.take_utterances(), vec!["one", "two"]);
        assert!(ctx.take_utterances().is_empty());
    }
}
