//! Intake agents
//!
//! - `Agent` trait with shared instruction rendering
//! - `handoff` - transfer and activation
//! - three concrete agents: symptom, med info, confirmation

pub mod agent;
pub mod confirmation;
pub mod handoff;
pub mod med_info;
pub mod symptom;

pub use agent::{Agent, AgentCore, ToolContext};
pub use confirmation::{ConfirmationAgent, ConfirmationTool, CONFIRMATION_AGENT};
pub use handoff::{activate, transfer_to, ActivationReport};
pub use med_info::{MedInfoAgent, MedInfoTool, MED_INFO_AGENT};
pub use symptom::{SymptomAgent, SymptomTool, SYMPTOM_AGENT};
