//! Session configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{FrameworkError, FrameworkResult};
use crate::history::TruncationPolicy;

/// Configuration for an intake session
///
/// ```ignore
/// let config = SessionConfig::new()
///     .with_prompts_dir("prompts")
///     .with_handoff_policy(TruncationPolicy::handoff())
///     .with_storage_dir("intakes");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory holding prompt templates
    #[serde(default = "default_prompts_dir")]
    pub prompts_dir: PathBuf,

    /// Window applied to the previous agent's history on activation
    #[serde(default = "TruncationPolicy::handoff")]
    pub handoff_policy: TruncationPolicy,

    /// Maximum generator calls per turn
    #[serde(default = "default_max_tool_iterations")]
    pub max_tool_iterations: usize,

    /// Participant attribute naming the active agent
    #[serde(default = "default_agent_attribute_key")]
    pub agent_attribute_key: String,

    /// Where completed intakes are written, none to skip persistence
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,
}

fn default_prompts_dir() -> PathBuf {
    PathBuf::from("prompts")
}

fn default_max_tool_iterations() -> usize {
    10
}

fn default_agent_attribute_key() -> String {
    "agent".to_string()
}

impl SessionConfig {
    pub fn new() -> Self {
        Self {
            prompts_dir: default_prompts_dir(),
            handoff_policy: TruncationPolicy::handoff(),
            max_tool_iterations: default_max_tool_iterations(),
            agent_attribute_key: default_agent_attribute_key(),
            storage_dir: None,
        }
    }

    /// Load from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> FrameworkResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by `RELAY_*` environment variables
    pub fn from_env() -> FrameworkResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by values from `lookup`
    pub fn from_lookup<F>(lookup: F) -> FrameworkResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(dir) = lookup("RELAY_PROMPTS_DIR") {
            config.prompts_dir = PathBuf::from(dir);
        }
        if let Some(n) = lookup("RELAY_HANDOFF_KEEP_LAST_N") {
            config.handoff_policy.keep_last_n = parse_number("RELAY_HANDOFF_KEEP_LAST_N", &n)?;
        }
        if let Some(n) = lookup("RELAY_MAX_TOOL_ITERATIONS") {
            config.max_tool_iterations = parse_number("RELAY_MAX_TOOL_ITERATIONS", &n)?;
        }
        if let Some(dir) = lookup("RELAY_STORAGE_DIR") {
            config.storage_dir = Some(PathBuf::from(dir));
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the driver cannot run with
    pub fn validate(&self) -> FrameworkResult<()> {
        if self.max_tool_iterations == 0 {
            return Err(FrameworkError::InvalidConfig(
                "max_tool_iterations must be at least 1".to_string(),
            ));
        }
        if self.agent_attribute_key.is_empty() {
            return Err(FrameworkError::InvalidConfig(
                "agent_attribute_key must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Set the prompts directory
    pub fn with_prompts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.prompts_dir = dir.into();
        self
    }

    /// Set the handoff truncation policy
    pub fn with_handoff_policy(mut self, policy: TruncationPolicy) -> Self {
        self.handoff_policy = policy;
        self
    }

    /// Set maximum generator calls per turn
    pub fn with_max_tool_iterations(mut self, max: usize) -> Self {
        self.max_tool_iterations = max;
        self
    }

    /// Set the participant attribute key
    pub fn with_agent_attribute_key(mut self, key: impl Into<String>) -> Self {
        self.agent_attribute_key = key.into();
        self
    }

    /// Persist completed intakes under `dir`
    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = Some(dir.into());
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_number(key: &str, value: &str) -> FrameworkResult<usize> {
    value
        .trim()
        .parse()
        .map_err(|_| FrameworkError::InvalidConfig(format!("{} must be a number, got '{}'", key, value)))
}
