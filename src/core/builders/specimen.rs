//! Specimen resource builder

use crate::domain::ResourceType;
use serde_json::{json, Value};

/// `type.text` used when the caller gives none
pub const DEFAULT_SPECIMEN_TYPE_TEXT: &str = "specimen";

/// Canonical specimen fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecimenFields {
    pub id: String,
    /// Reference to the subject, e.g. `Patient/P1`
    pub patient_ref: String,
    pub type_text: String,
}

impl SpecimenFields {
    pub fn new(id: impl Into<String>, patient_ref: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            patient_ref: patient_ref.into(),
            type_text: DEFAULT_SPECIMEN_TYPE_TEXT.to_string(),
        }
    }

    pub fn with_type_text(mut self, type_text: impl Into<String>) -> Self {
        self.type_text = type_text.into();
        self
    }
}

/// Builds a FHIR `Specimen`
///
/// `subject.reference` and `type.text` are always present.
pub fn build_specimen(fields: &SpecimenFields) -> Value {
    json!({
        "resourceType": ResourceType::Specimen.as_str(),
        "id": fields.id,
        "subject": {"reference": fields.patient_ref},
        "type": {"text": fields.type_text},
    })
}
