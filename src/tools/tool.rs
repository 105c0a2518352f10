//! Tool calls, definitions and outcomes
//!
//! Tools are exposed to the reply generator as [`ToolDefinition`]s and come
//! back as [`ToolCall`]s. Executing a call yields a [`ToolOutcome`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::{object_json_schema, ObjectSchema};

/// A tool invocation requested by the reply generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Call id, echoed back in the matching output item
    pub id: String,
    /// Name of the tool
    pub name: String,
    /// JSON arguments
    #[serde(default)]
    pub arguments: Value,
}

impl ToolCall {
    /// Create a call with a generated id
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: format!("call_{}", uuid::Uuid::new_v4().simple()),
            name: name.into(),
            arguments,
        }
    }

    /// Create a call with an explicit id
    pub fn with_id(id: impl Into<String>, name: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }

    /// Arguments as an object, treating `null` as `{}`
    pub fn arguments_object(&self) -> Value {
        match &self.arguments {
            Value::Null => Value::Object(Default::default()),
            other => other.clone(),
        }
    }
}

/// What a tool produced
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    /// Plain output returned to the model
    Output(String),
    /// Hand the conversation to another agent
    Transfer { target: String },
    /// The intake is finished
    Complete,
}

impl ToolOutcome {
    /// Plain output
    pub fn output(text: impl Into<String>) -> Self {
        ToolOutcome::Output(text.into())
    }

    /// Transfer to the named agent
    pub fn transfer(target: impl Into<String>) -> Self {
        ToolOutcome::Transfer {
            target: target.into(),
        }
    }
}

/// Result text recorded in history for a tool call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// The output of the tool
    pub output: String,
    /// Whether the tool execution resulted in an error
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful tool result
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            is_error: false,
        }
    }

    /// Create an error tool result
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            output: message.into(),
            is_error: true,
        }
    }
}

/// Tool definition handed to the reply generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name
    pub name: String,

    /// Tool description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// JSON schema for the tool input
    pub input_schema: ToolInputSchema,
}

impl ToolDefinition {
    /// Create a definition with no inputs
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
            input_schema: ToolInputSchema::new(),
        }
    }

    /// Add a required record-typed parameter
    pub fn with_record_param(mut self, param: &str, schema: &ObjectSchema) -> Self {
        let mut properties = match self.input_schema.properties.take() {
            Some(Value::Object(map)) => map,
            _ => Default::default(),
        };
        properties.insert(param.to_string(), object_json_schema(schema));

        let mut required = self.input_schema.required.take().unwrap_or_default();
        required.push(param.to_string());

        self.input_schema = self
            .input_schema
            .with_properties(Value::Object(properties))
            .with_required(required);
        self
    }
}

/// JSON schema for tool input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInputSchema {
    /// Type (always "object")
    #[serde(rename = "type")]
    pub schema_type: String,

    /// Properties of the input object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,

    /// Required properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl ToolInputSchema {
    /// Create a new tool input schema
    pub fn new() -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: None,
            required: None,
        }
    }

    /// Set the properties
    pub fn with_properties(mut self, properties: Value) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Set the required fields
    pub fn with_required(mut self, required: Vec<String>) -> Self {
        self.required = Some(required);
        self
    }
}

impl Default for ToolInputSchema {
    fn default() -> Self {
        Self::new()
    }
}
