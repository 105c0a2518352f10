//! Structured records collected during an intake
//!
//! Each record is owned by the tools of one agent: the symptom agent writes
//! `symptom_form`, the med info agent writes `med_info_form`. `patient` is
//! provided at session setup.

mod med_info_form;
mod patient;
mod symptom_form;

use serde::{Deserialize, Serialize};

pub use med_info_form::{AllergyInput, MedInfoForm};
pub use patient::Patient;
pub use symptom_form::{SymptomForm, SymptomInput};

/// All records collected across the session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeData {
    pub patient: Patient,
    pub symptom_form: SymptomForm,
    pub med_info_form: MedInfoForm,
}

impl IntakeData {
    /// Create intake data for a known patient
    pub fn for_patient(patient: Patient) -> Self {
        Self {
            patient,
            ..Default::default()
        }
    }

    /// One-line summary for logs
    pub fn summarize(&self) -> String {
        format!(
            "patient={} symptoms={} allergies={} medications={}",
            self.patient.name,
            self.symptom_form.symptoms.len(),
            self.med_info_form.allergies.len(),
            self.med_info_form.medications.len()
        )
    }
}
