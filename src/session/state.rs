//! Shared session state
//!
//! One `SessionState` exists per conversation. It owns every agent through the
//! registry and refers to the previous agent by name only.

use std::collections::HashMap;
use std::sync::Arc;

use crate::agent::Agent;
use crate::connection::RoomConnection;
use crate::core::{FrameworkError, FrameworkResult};
use crate::models::IntakeData;

/// Agents by name, in registration order
#[derive(Default)]
pub struct AgentRegistry {
    agents: HashMap<String, Box<dyn Agent>>,
    order: Vec<String>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent under its own name
    pub fn register(&mut self, agent: Box<dyn Agent>) -> FrameworkResult<()> {
        let name = agent.name().to_string();
        if self.agents.contains_key(&name) {
            return Err(FrameworkError::DuplicateAgent(name));
        }

        tracing::info!("[AgentRegistry] Registering agent: {}", name);
        self.order.push(name.clone());
        self.agents.insert(name, agent);
        Ok(())
    }

    /// Builder form of [`register`](Self::register)
    pub fn with<A: Agent + 'static>(mut self, agent: A) -> FrameworkResult<Self> {
        self.register(Box::new(agent))?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&dyn Agent> {
        self.agents.get(name).map(|agent| agent.as_ref())
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut dyn Agent> {
        self.agents
            .get_mut(name)
            .map(|agent| -> &mut dyn Agent { agent.as_mut() })
    }

    /// Lookup that fails with `UnknownAgent`
    pub fn require(&self, name: &str) -> FrameworkResult<&dyn Agent> {
        self.get(name)
            .ok_or_else(|| FrameworkError::UnknownAgent(name.to_string()))
    }

    /// Mutable lookup that fails with `UnknownAgent`
    pub fn require_mut(&mut self, name: &str) -> FrameworkResult<&mut dyn Agent> {
        self.get_mut(name)
            .ok_or_else(|| FrameworkError::UnknownAgent(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.agents.contains_key(name)
    }

    /// Names in registration order
    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

/// State shared by every agent of one conversation
pub struct SessionState {
    /// Unique session ID
    pub session_id: String,
    /// Registered agents
    pub agents: AgentRegistry,
    /// Name of the agent that handed off most recently
    pub previous_agent: Option<String>,
    /// Collected intake records
    pub data: IntakeData,
    /// Room connection, if any
    pub connection: Option<Arc<dyn RoomConnection>>,
}

impl SessionState {
    /// Create state with a fresh session id
    pub fn new(agents: AgentRegistry, data: IntakeData) -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            agents,
            previous_agent: None,
            data,
            connection: None,
        }
    }

    /// Use a specific session id
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    /// Attach a room connection
    pub fn with_connection(mut self, connection: Arc<dyn RoomConnection>) -> Self {
        self.connection = Some(connection);
        self
    }
}
