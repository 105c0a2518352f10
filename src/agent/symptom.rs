//! Symptom collection agent

use crate::core::FrameworkResult;
use crate::models::SymptomForm;
use crate::schema::SchemaDoc;
use crate::tools::{parse_param, unknown_tool, Capability, ToolCall, ToolDefinition, ToolOutcome};

use super::agent::{Agent, AgentCore, ToolContext};

/// Registry name
pub const SYMPTOM_AGENT: &str = "symptom";

const TRANSITION_LINE: &str =
    "Thank you for providing the information. Let's talk about your medical history.";

/// Tools of the symptom agent
#[derive(Debug, Clone, PartialEq)]
pub enum SymptomTool {
    /// Replace the symptom form
    UpdateForm(SymptomForm),
    /// Finish and move on to medical history
    Finish,
}

impl Capability for SymptomTool {
    fn definitions() -> Vec<ToolDefinition> {
        vec![
            ToolDefinition::new(
                "update_symptom_form",
                "Update the symptom form with everything the patient has said so far.",
            )
            .with_record_param("form", &SymptomForm::schema()),
            ToolDefinition::new(
                "finish_symptom_collection",
                "Call when the chief complaint and all symptoms have been collected.",
            ),
        ]
    }

    fn parse(agent: &str, call: &ToolCall) -> FrameworkResult<Self> {
        match call.name.as_str() {
            "update_symptom_form" => Ok(SymptomTool::UpdateForm(parse_param(call, "form")?)),
            "finish_symptom_collection" => Ok(SymptomTool::Finish),
            _ => Err(unknown_tool(agent, call)),
        }
    }
}

/// Collects the chief complaint and symptoms
pub struct SymptomAgent {
    core: AgentCore,
}

impl SymptomAgent {
    pub fn new() -> Self {
        Self {
            core: AgentCore::new(SYMPTOM_AGENT, "agents/symptom.yaml"),
        }
    }
}

impl Default for SymptomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for SymptomAgent {
    fn core(&self) -> &AgentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AgentCore {
        &mut self.core
    }

    fn tool_definitions(&self) -> Vec<ToolDefinition> {
        SymptomTool::definitions()
    }

    fn call_tool(&self, call: &ToolCall, ctx: &mut ToolContext<'_>) -> FrameworkResult<ToolOutcome> {
        match SymptomTool::parse(self.name(), call)? {
            SymptomTool::UpdateForm(form) => {
                tracing::info!(
                    "[SymptomAgent] Form updated: {} symptom(s)",
                    form.symptoms.len()
                );
                ctx.data.symptom_form = form;
                Ok(ToolOutcome::output("Symptom form updated."))
            }
            SymptomTool::Finish => {
                ctx.say(TRANSITION_LINE);
                Ok(ToolOutcome::transfer(super::MED_INFO_AGENT))
            }
        }
    }
}
