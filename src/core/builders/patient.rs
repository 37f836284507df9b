//! Patient resource builder

use super::present;
use crate::domain::ResourceType;
use serde_json::{json, Map, Value};

/// Canonical patient fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientFields {
    pub id: String,
    pub given: Option<String>,
    pub family: Option<String>,
    /// Calendar date, `YYYY-MM-DD`
    pub birth_date: Option<String>,
    /// FHIR administrative gender: `female`, `male`, `other` or `unknown`
    pub sex: Option<String>,
}

impl PatientFields {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_given(mut self, given: impl Into<String>) -> Self {
        self.given = Some(given.into());
        self
    }

    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }

    pub fn with_birth_date(mut self, birth_date: impl Into<String>) -> Self {
        self.birth_date = Some(birth_date.into());
        self
    }

    pub fn with_sex(mut self, sex: impl Into<String>) -> Self {
        self.sex = Some(sex.into());
        self
    }
}

/// Builds a FHIR `Patient`
///
/// `name` is a single HumanName holding only the parts that are present and
/// is left out entirely when neither given nor family name is known.
///
/// # Examples
///
/// ```
/// use pgx_fhir::core::builders::{build_patient, PatientFields};
///
/// let patient = build_patient(&PatientFields::new("P1").with_family("Perez"));
/// assert_eq!(patient["name"][0]["family"], "Perez");
/// assert!(patient["name"][0].get("given").is_none());
/// assert!(patient.get("gender").is_none());
/// ```
pub fn build_patient(fields: &PatientFields) -> Value {
    let mut patient = json!({
        "resourceType": ResourceType::Patient.as_str(),
        "id": fields.id,
    });

    let mut name = Map::new();
    if let Some(family) = present(&fields.family) {
        name.insert("family".to_string(), json!(family));
    }
    if let Some(given) = present(&fields.given) {
        name.insert("given".to_string(), json!([given]));
    }
    if !name.is_empty() {
        patient["name"] = json!([name]);
    }

    if let Some(birth_date) = present(&fields.birth_date) {
        patient["birthDate"] = json!(birth_date);
    }

    if let Some(sex) = present(&fields.sex) {
        patient["gender"] = json!(sex);
    }

    patient
}
