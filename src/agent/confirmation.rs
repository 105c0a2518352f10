//! Confirmation agent

use serde_json::{json, Value};

use crate::core::FrameworkResult;
use crate::models::IntakeData;
use crate::tools::{unknown_tool, Capability, ToolCall, ToolDefinition, ToolOutcome};

use super::agent::{Agent, AgentCore, ToolContext};

/// Registry name
pub const CONFIRMATION_AGENT: &str = "confirmation";

const CLOSING_LINE: &str = "Thank you for providing the information. You medical provider will review the information and get back to you shortly. Have a great day!";

/// Tools of the confirmation agent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationTool {
    /// Patient confirmed the summary
    Confirm,
}

impl Capability for ConfirmationTool {
    fn definitions() -> Vec<ToolDefinition> {
        vec![ToolDefinition::new(
            "confirm",
            "Call once the patient has confirmed the collected information is correct.",
        )]
    }

    fn parse(agent: &str, call: &ToolCall) -> FrameworkResult<Self> {
        match call.name.as_str() {
            "confirm" => Ok(ConfirmationTool::Confirm),
            _ => Err(unknown_tool(agent, call)),
        }
    }
}

/// Reads back everything collected and ends the intake
pub struct ConfirmationAgent {
    core: AgentCore,
}

impl ConfirmationAgent {
    pub fn new() -> Self {
        Self {
            core: AgentCore::new(CONFIRMATION_AGENT, "agents/confirmation.yaml"),
        }
    }
}

impl Default for ConfirmationAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for ConfirmationAgent {
    fn core(&self) -> &AgentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AgentCore {
        &mut self.core
    }

    fn agent_data(&self, data: &IntakeData) -> Value {
        json!({
            "patient": data.patient,
            "symptom_form": data.symptom_form,
            "med_info_form": data.med_info_form,
        })
    }

    fn tool_definitions(&self) -> Vec<ToolDefinition> {
        ConfirmationTool::definitions()
    }

    fn call_tool(&self, call: &ToolCall, ctx: &mut ToolContext<'_>) -> FrameworkResult<ToolOutcome> {
        match ConfirmationTool::parse(self.name(), call)? {
            ConfirmationTool::Confirm => {
                tracing::info!("[ConfirmationAgent] Intake confirmed: {}", ctx.data.summarize());
                ctx.say(CLOSING_LINE);
                Ok(ToolOutcome::Complete)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_completes() {
        let agent = ConfirmationAgent::new();
        let mut data = IntakeData::default();
        let mut ctx = ToolContext::new(&mut data);

        let call = ToolCall::with_id("c1", "confirm", Value::Null);
        assert_eq!(agent.call_tool(&call, &mut ctx).unwrap(), ToolOutcome::Complete);
        assert_eq!(ctx.take_utterances(), vec![CLOSING_LINE]);
    }

    #[test]
    fn test_agent_data_has_all_records() {
        let value = ConfirmationAgent::new().agent_data(&IntakeData::default());
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 3);
        assert!(value.get("med_info_form").is_some());
    }

    #[test]
    fn test_update_tools_not_available() {
        let call = ToolCall::with_id("c1", "update_symptom_form", json!({}));
        assert!(ConfirmationTool::parse(CONFIRMATION_AGENT, &call).is_err());
    }
}
