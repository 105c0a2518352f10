//! Instruction templates
//!
//! Agents refer to their instructions by template id. A [`PromptRenderer`]
//! turns the id plus a JSON context string into the final instructions.

mod loader;

pub use loader::{PromptTemplate, YamlPromptLoader};

/// Renders agent instructions from a template id and context
pub trait PromptRenderer: Send + Sync {
    /// Render the template
    ///
    /// Failures are recovered as an empty string so a missing template never
    /// aborts a handoff.
    fn render(&self, template_id: &str, context: &str) -> String;
}

/// Placeholder replaced by the serialized agent data
pub const CONTEXT_PLACEHOLDER: &str = "{context}";
