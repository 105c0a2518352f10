use serde::{Deserialize, Serialize};

use crate::schema::{FieldSchema, ObjectSchema, SchemaDoc};

/// One symptom reported by the patient
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymptomInput {
    pub name: String,
    pub sites: Vec<String>,
    pub onset: String,
    pub timing: String,
    pub triggers: Vec<String>,
    pub alleviating_factors: Vec<String>,
    pub worsening_factors: Vec<String>,
}

impl SchemaDoc for SymptomInput {
    fn schema() -> ObjectSchema {
        ObjectSchema::new("SymptomInput")
            .field(FieldSchema::string("name").describe("The name of the symptom"))
            .field(
                FieldSchema::strings("sites")
                    .describe("The sites of the symptom (e.g. head, chest, etc.)"),
            )
            .field(
                FieldSchema::string("onset")
                    .describe("The onset of the symptom (e.g. sudden, gradual, etc.)"),
            )
            .field(
                FieldSchema::string("timing")
                    .describe("The timing of the symptom (e.g. daily, intermittent, etc.)"),
            )
            .field(
                FieldSchema::strings("triggers")
                    .describe("The triggers of the symptom (e.g. stress, exercise, etc.)"),
            )
            .field(FieldSchema::strings("alleviating_factors").describe(
                "The alleviating factors of the symptom (e.g. rest, medication, etc.)",
            ))
            .field(FieldSchema::strings("worsening_factors").describe(
                "The worsening factors of the symptom (e.g. stress, exercise, etc.)",
            ))
    }
}

/// Symptom intake form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymptomForm {
    pub chief_complaint: String,
    pub symptoms: Vec<SymptomInput>,
}

impl SymptomForm {
    /// Whether nothing has been collected yet
    pub fn is_empty(&self) -> bool {
        self.chief_complaint.is_empty() && self.symptoms.is_empty()
    }
}

impl SchemaDoc for SymptomForm {
    fn schema() -> ObjectSchema {
        ObjectSchema::new("SymptomForm")
            .field(
                FieldSchema::string("chief_complaint")
                    .describe("The chief complaint of the patient"),
            )
            .field(
                FieldSchema::records::<SymptomInput>("symptoms")
                    .describe("The symptoms of the patient (e.g. headache, fever, etc.)"),
            )
    }
}
