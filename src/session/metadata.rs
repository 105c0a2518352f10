//! Stored intake record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::IntakeData;

/// Everything persisted about a completed intake
///
/// Written next to the transcript so records can be listed without parsing
/// history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeRecord {
    // --- Identity ---
    /// Unique session ID
    pub session_id: String,

    /// Agent active when the intake completed
    pub final_agent: String,

    /// Agents in the order they were activated
    #[serde(default)]
    pub agents_visited: Vec<String>,

    // --- Collected data ---
    /// Patient and forms
    #[serde(flatten)]
    pub data: IntakeData,

    // --- Timestamps ---
    /// When the session started
    pub started_at: DateTime<Utc>,

    /// When the intake was confirmed
    pub completed_at: DateTime<Utc>,
}

impl IntakeRecord {
    /// Create a record completed now
    pub fn new(
        session_id: impl Into<String>,
        final_agent: impl Into<String>,
        data: IntakeData,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            final_agent: final_agent.into(),
            agents_visited: Vec::new(),
            data,
            started_at,
            completed_at: Utc::now(),
        }
    }

    /// Set the visited agents
    pub fn with_agents_visited(mut self, agents: Vec<String>) -> Self {
        self.agents_visited = agents;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Patient;

    #[test]
    fn test_record_flattens_data() {
        let record = IntakeRecord::new(
            "s1",
            "confirmation",
            IntakeData::for_patient(Patient::new("John Doe", 30)),
            Utc::now(),
        )
        .with_agents_visited(vec!["symptom".into(), "confirmation".into()]);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["patient"]["name"], "John Doe");
        assert!(value.get("symptom_form").is_some());
        assert!(value.get("data").is_none());

        let back: IntakeRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back.agents_visited.len(), 2);
        assert_eq!(back.data.patient.age, 30);
    }
}
