//! Schema documentation for structured records
//!
//! Records describe their own shape through [`SchemaDoc`]. Two renderings are
//! derived from the description:
//! - `commented_json_schema` - human/model readable JSON with `//` comments
//! - `json_schema` - a JSON schema value used in tool definitions

mod commented;

use serde_json::Value;

pub use commented::{commented_json_schema, json_schema, object_json_schema};

/// Type of a documented field
#[derive(Debug, Clone)]
pub enum FieldType {
    String,
    Integer,
    Number,
    Boolean,
    Array(Box<FieldType>),
    Object(fn() -> ObjectSchema),
}

impl FieldType {
    /// Array of the given element type
    pub fn array(element: FieldType) -> Self {
        FieldType::Array(Box::new(element))
    }

    /// Nested record type
    pub fn object<T: SchemaDoc>() -> Self {
        FieldType::Object(T::schema)
    }

    /// JSON type name used in comments
    pub fn type_name(&self) -> String {
        match self {
            FieldType::String => "string".to_string(),
            FieldType::Integer => "integer".to_string(),
            FieldType::Number => "number".to_string(),
            FieldType::Boolean => "boolean".to_string(),
            FieldType::Array(inner) => format!("{}[]", inner.type_name()),
            FieldType::Object(_) => "object".to_string(),
        }
    }
}

/// One documented field
#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub name: &'static str,
    pub field_type: FieldType,
    pub description: Option<&'static str>,
    pub default: Option<Value>,
}

impl FieldSchema {
    /// Create a field of the given type
    pub fn new(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            description: None,
            default: None,
        }
    }

    /// String field
    pub fn string(name: &'static str) -> Self {
        Self::new(name, FieldType::String)
    }

    /// Integer field
    pub fn integer(name: &'static str) -> Self {
        Self::new(name, FieldType::Integer)
    }

    /// Array of strings
    pub fn strings(name: &'static str) -> Self {
        Self::new(name, FieldType::array(FieldType::String))
    }

    /// Array of nested records
    pub fn records<T: SchemaDoc>(name: &'static str) -> Self {
        Self::new(name, FieldType::array(FieldType::object::<T>()))
    }

    /// Nested record
    pub fn record<T: SchemaDoc>(name: &'static str) -> Self {
        Self::new(name, FieldType::object::<T>())
    }

    /// Attach a description
    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    /// Attach an explicit default value
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// Documented shape of a record
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    /// Rust type name of the record
    pub name: &'static str,
    pub fields: Vec<FieldSchema>,
}

impl ObjectSchema {
    /// Create an empty schema for a named record
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    /// Add a field
    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    /// Short element name used for arrays of this record
    ///
    /// `SymptomInput` becomes `symptom`, `MedInfoForm` becomes `medinfo`.
    pub fn element_name(&self) -> String {
        self.name.replace("Input", "").replace("Form", "").to_lowercase()
    }
}

/// Records that can describe their own shape
pub trait SchemaDoc {
    fn schema() -> ObjectSchema;
}
