use serde::{Deserialize, Serialize};

use crate::schema::{FieldSchema, ObjectSchema, SchemaDoc};

/// Demographics of the patient being interviewed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

impl Patient {
    /// Create a patient record with a name and age
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            age,
            ..Default::default()
        }
    }

    /// Set the gender
    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = gender.into();
        self
    }

    /// Set the location
    pub fn with_location(
        mut self,
        city: impl Into<String>,
        state: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        self.city = city.into();
        self.state = state.into();
        self.country = country.into();
        self
    }
}

impl SchemaDoc for Patient {
    fn schema() -> ObjectSchema {
        ObjectSchema::new("Patient")
            .field(FieldSchema::string("name"))
            .field(FieldSchema::integer("age"))
            .field(FieldSchema::string("gender"))
            .field(FieldSchema::string("city"))
            .field(FieldSchema::string("state"))
            .field(FieldSchema::string("country"))
    }
}
