use serde::{Deserialize, Serialize};

use crate::schema::{FieldSchema, ObjectSchema, SchemaDoc};

/// An allergy with its cause, reaction and severity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllergyInput {
    pub cause: String,
    pub symptom: String,
    pub severity: String,
}

impl SchemaDoc for AllergyInput {
    fn schema() -> ObjectSchema {
        ObjectSchema::new("AllergyInput")
            .field(FieldSchema::string("cause"))
            .field(FieldSchema::string("symptom"))
            .field(FieldSchema::string("severity"))
    }
}

/// Medical background form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MedInfoForm {
    pub past_medical_history: Vec<String>,
    pub family_history: Vec<String>,
    pub medications: Vec<String>,
    pub otc_medications: Vec<String>,
    pub allergies: Vec<AllergyInput>,
}

impl MedInfoForm {
    /// Whether nothing has been collected yet
    pub fn is_empty(&self) -> bool {
        self.past_medical_history.is_empty()
            && self.family_history.is_empty()
            && self.medications.is_empty()
            && self.otc_medications.is_empty()
            && self.allergies.is_empty()
    }
}

impl SchemaDoc for MedInfoForm {
    fn schema() -> ObjectSchema {
        ObjectSchema::new("MedInfoForm")
            .field(FieldSchema::strings("past_medical_history"))
            .field(FieldSchema::strings("family_history"))
            .field(FieldSchema::strings("medications"))
            .field(FieldSchema::strings("otc_medications"))
            .field(FieldSchema::records::<AllergyInput>("allergies"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::commented_json_schema;

    #[test]
    fn test_commented_schema() {
        let doc = commented_json_schema::<MedInfoForm>(2);
        assert!(doc.starts_with("{\n  \"past_medical_history\": [] // string[],"));
        assert!(doc.contains("\"allergies\": [ // allergy[]\n    {"));
        assert!(doc.ends_with("  ]\n}"));
    }

    #[test]
    fn test_is_empty() {
        let mut form = MedInfoForm::default();
        assert!(form.is_empty());
        form.allergies.push(AllergyInput {
            cause: "penicillin".into(),
            symptom: "rash".into(),
            severity: "mild".into(),
        });
        assert!(!form.is_empty());
    }
}
