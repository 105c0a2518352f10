//! Commented JSON and JSON schema rendering

use serde_json::{json, Map, Value};

use super::{FieldSchema, FieldType, ObjectSchema, SchemaDoc};

/// Render a record as JSON with type and description comments
///
/// ```text
/// {
///   "chief_complaint": "" // string - The chief complaint of the patient,
///   "symptoms": [ // symptom[] - The symptoms of the patient
///     {
///       "name": "" // string - The name of the symptom
///     }
///   ]
/// }
/// ```
pub fn commented_json_schema<T: SchemaDoc>(indent: usize) -> String {
    render_object(&T::schema(), indent, 0)
}

/// JSON schema for a record
pub fn json_schema<T: SchemaDoc>() -> Value {
    object_json_schema(&T::schema())
}

/// JSON schema for an already-built object schema
pub fn object_json_schema(schema: &ObjectSchema) -> Value {
    let mut properties = Map::new();
    for field in &schema.fields {
        let mut property = type_json_schema(&field.field_type);
        if let (Some(description), Some(obj)) = (field.description, property.as_object_mut()) {
            obj.insert("description".into(), Value::String(description.into()));
        }
        properties.insert(field.name.to_string(), property);
    }

    json!({
        "type": "object",
        "properties": properties,
    })
}

fn type_json_schema(field_type: &FieldType) -> Value {
    match field_type {
        FieldType::String => json!({ "type": "string" }),
        FieldType::Integer => json!({ "type": "integer" }),
        FieldType::Number => json!({ "type": "number" }),
        FieldType::Boolean => json!({ "type": "boolean" }),
        FieldType::Array(inner) => json!({ "type": "array", "items": type_json_schema(inner) }),
        FieldType::Object(schema) => object_json_schema(&schema()),
    }
}

fn render_object(schema: &ObjectSchema, indent: usize, level: usize) -> String {
    let mut lines = vec!["{".to_string()];

    let count = schema.fields.len();
    for (i, field) in schema.fields.iter().enumerate() {
        let mut line = render_field(field, indent, level + 1);
        if i + 1 < count {
            line.push(',');
        }
        lines.push(line);
    }

    lines.push(format!("{}}}", " ".repeat(level * indent)));
    lines.join("\n")
}

fn render_field(field: &FieldSchema, indent: usize, level: usize) -> String {
    let base = " ".repeat(level * indent);
    let description = field
        .description
        .map(|d| format!(" - {}", d))
        .unwrap_or_default();

    match &field.field_type {
        FieldType::Array(inner) => match inner.as_ref() {
            FieldType::Object(nested) => {
                let nested = nested();
                let body = render_object(&nested, indent, level + 1);
                format!(
                    "{base}\"{name}\": [ // {element}[]{description}\n{base}{pad}{body}\n{base}]",
                    name = field.name,
                    element = nested.element_name(),
                    pad = " ".repeat(indent),
                )
            }
            _ => format!(
                "{base}\"{}\": {} // {}{description}",
                field.name,
                default_literal(field),
                field.field_type.type_name()
            ),
        },
        FieldType::Object(nested) => {
            let body = render_object(&nested(), indent, level);
            format!("{base}\"{}\": {body} // object{description}", field.name)
        }
        _ => format!(
            "{base}\"{}\": {} // {}{description}",
            field.name,
            default_literal(field),
            field.field_type.type_name()
        ),
    }
}

fn default_literal(field: &FieldSchema) -> String {
    if let Some(default) = &field.default {
        return match default {
            Value::Array(_) => "[]".to_string(),
            Value::Object(_) => "{}".to_string(),
            other => other.to_string(),
        };
    }

    match field.field_type {
        FieldType::String => "\"\"".to_string(),
        FieldType::Integer | FieldType::Number => "0".to_string(),
        FieldType::Boolean => "false".to_string(),
        FieldType::Array(_) => "[]".to_string(),
        FieldType::Object(_) => "{}".to_string(),
    }
}
