//! Medical history agent

use serde_json::{json, Value};

use crate::core::FrameworkResult;
use crate::models::{IntakeData, MedInfoForm};
use crate::schema::SchemaDoc;
use crate::tools::{parse_param, unknown_tool, Capability, ToolCall, ToolDefinition, ToolOutcome};

use super::agent::{Agent, AgentCore, ToolContext};

/// Registry name
pub const MED_INFO_AGENT: &str = "med_info";

const TRANSITION_LINE: &str =
    "Thank you for providing the information. Let's go to the final step.";

/// Tools of the med info agent
#[derive(Debug, Clone, PartialEq)]
pub enum MedInfoTool {
    /// Replace the medical history form
    UpdateForm(MedInfoForm),
    /// Finish and move on to confirmation
    Finish,
}

impl Capability for MedInfoTool {
    fn definitions() -> Vec<ToolDefinition> {
        vec![
            ToolDefinition::new(
                "update_med_info_form",
                "Update the medical history form with everything collected so far.",
            )
            .with_record_param("form", &MedInfoForm::schema()),
            ToolDefinition::new(
                "finish_med_info_collection",
                "Call when medical history, medications and allergies have been collected.",
            ),
        ]
    }

    fn parse(agent: &str, call: &ToolCall) -> FrameworkResult<Self> {
        match call.name.as_str() {
            "update_med_info_form" => Ok(MedInfoTool::UpdateForm(parse_param(call, "form")?)),
            "finish_med_info_collection" => Ok(MedInfoTool::Finish),
            _ => Err(unknown_tool(agent, call)),
        }
    }
}

/// Collects past history, family history, medications and allergies
pub struct MedInfoAgent {
    core: AgentCore,
}

impl MedInfoAgent {
    pub fn new() -> Self {
        Self {
            core: AgentCore::new(MED_INFO_AGENT, "agents/med_info.yaml"),
        }
    }
}

impl Default for MedInfoAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for MedInfoAgent {
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
        })
    }

    fn tool_definitions(&self) -> Vec<ToolDefinition> {
        MedInfoTool::definitions()
    }

    fn call_tool(&self, call: &ToolCall, ctx: &mut ToolContext<'_>) -> FrameworkResult<ToolOutcome> {
        match MedInfoTool::parse(self.name(), call)? {
            MedInfoTool::UpdateForm(form) => {
                tracing::info!(
                    "[MedInfoAgent] Form updated: {} medication(s), {} allergy(ies)",
                    form.medications.len(),
                    form.allergies.len()
                );
                ctx.data.med_info_form = form;
                Ok(ToolOutcome::output("Medical information form updated."))
            }
            MedInfoTool::Finish => {
                ctx.say(TRANSITION_LINE);
                Ok(ToolOutcome::transfer(super::CONFIRMATION_AGENT))
            }
        }
    }
}
