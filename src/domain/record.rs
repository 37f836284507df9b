//! PGx record models
//!
//! Two shapes live here:
//!
//! - [`PgxRecord`] is what the bundle converter consumes. Its patient,
//!   specimen and result sections are open key/value objects because field
//!   naming varies between producers (English and Spanish names, `dob` vs
//!   `birth_date`, ...).
//! - [`PgxInput`] is the strongly-typed input schema emitted by the
//!   synthetic data generator. It converts into a [`PgxRecord`] through its
//!   JSON shape.

use super::errors::{PgxFhirError, ValidationError};
use super::result::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One record section with producer-defined field names
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordSection(Map<String, Value>);

impl RecordSection {
    /// Creates an empty section
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing JSON object
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Adds a field, builder style
    ///
    /// # Examples
    ///
    /// ```
    /// use pgx_fhir::domain::RecordSection;
    ///
    /// let patient = RecordSection::new().with("id", "P1").with("sexo", "female");
    /// assert_eq!(patient.get("sexo").and_then(|v| v.as_str()), Some("female"));
    /// ```
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Returns the raw value stored under `name`, null included
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Borrows the underlying JSON object
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Number of fields in the section
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the section has no fields
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for RecordSection {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// A validated PGx record as handed to the bundle converter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PgxRecord {
    /// Patient demographics
    pub patient: RecordSection,

    /// The specimen the results were obtained from
    pub specimen: RecordSection,

    /// Gene results, in report order
    #[serde(default)]
    pub results: Vec<RecordSection>,

    /// Version of the interpretation ruleset that produced the results
    #[serde(default = "default_ruleset_version", alias = "rulesetVersion")]
    pub ruleset_version: String,
}

impl PgxRecord {
    /// Creates a record from its sections with the default ruleset version
    pub fn new(patient: RecordSection, specimen: RecordSection, results: Vec<RecordSection>) -> Self {
        Self {
            patient,
            specimen,
            results,
            ruleset_version: default_ruleset_version(),
        }
    }

    /// Parses a record from JSON text
    ///
    /// Shape problems (missing `patient`, non-object sections, ...) surface
    /// as [`ValidationError::InvalidRecord`].
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::try_from(value)
    }
}

impl TryFrom<Value> for PgxRecord {
    type Error = PgxFhirError;

    fn try_from(value: Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| ValidationError::InvalidRecord(e.to_string()).into())
    }
}

impl TryFrom<&PgxInput> for PgxRecord {
    type Error = PgxFhirError;

    fn try_from(input: &PgxInput) -> Result<Self> {
        let value = serde_json::to_value(input)?;
        Self::try_from(value)
    }
}

/// Administrative sex as recorded by the producer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Female,
    Male,
    Other,
    #[default]
    Unknown,
}

/// Specimen kinds accepted by the typed input schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecimenType {
    #[default]
    Blood,
    Saliva,
    Tumor,
    Other,
}

/// Typed patient section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub patient_id: String,
    pub given_name: String,
    pub family_name: String,
    pub birth_date: NaiveDate,
    #[serde(default)]
    pub sex: Sex,
}

/// Typed specimen section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecimenRecord {
    pub specimen_id: String,
    pub patient_id: String,
    #[serde(default)]
    pub specimen_type: SpecimenType,
    pub collected_on: NaiveDate,
}

/// Typed gene result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneResultRecord {
    pub gene: String,
    pub diplotype: String,
    pub phenotype: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_score: Option<f64>,
}

impl GeneResultRecord {
    /// Creates a result without an activity score
    pub fn new(
        gene: impl Into<String>,
        diplotype: impl Into<String>,
        phenotype: impl Into<String>,
    ) -> Self {
        Self {
            gene: gene.into(),
            diplotype: diplotype.into(),
            phenotype: phenotype.into(),
            activity_score: None,
        }
    }

    /// Sets the activity score
    pub fn with_activity_score(mut self, score: f64) -> Self {
        self.activity_score = Some(score);
        self
    }
}

/// Typed PGx input document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PgxInput {
    pub patient: PatientRecord,
    pub specimen: SpecimenRecord,
    pub results: Vec<GeneResultRecord>,
    #[serde(default = "default_ruleset_version")]
    pub ruleset_version: String,
}

fn default_ruleset_version() -> String {
    "0.1".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn typed_input() -> PgxInput {
        PgxInput {
            patient: PatientRecord {
                patient_id: "P1".to_string(),
                given_name: "Maria".to_string(),
                family_name: "Perez".to_string(),
                birth_date: NaiveDate::from_ymd_opt(1991, 10, 9).unwrap(),
                sex: Sex::Female,
            },
            specimen: SpecimenRecord {
                specimen_id: "S1".to_string(),
                patient_id: "P1".to_string(),
                specimen_type: SpecimenType::Saliva,
                collected_on: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            },
            results: vec![GeneResultRecord::new(
                "CYP2C19",
                "*1/*2",
                "intermediate metabolizer",
            )],
            ruleset_version: "0.1".to_string(),
        }
    }

    #[test]
    fn test_record_from_json_with_alternate_names() {
        let record = PgxRecord::from_json(
            r#"{
                "patient": {"patient_id": "P9", "nombre": "Ana"},
                "specimen": {"specimen_id": "S9", "tipo": "saliva"},
                "results": [{"gen": "CYP2D6", "diplotipo": "*1/*4"}],
                "rulesetVersion": "0.3"
            }"#,
        )
        .unwrap();

        assert_eq!(record.patient.get("nombre"), Some(&json!("Ana")));
        assert_eq!(record.results.len(), 1);
        assert_eq!(record.ruleset_version, "0.3");
    }

    #[test]
    fn test_record_defaults() {
        let record = PgxRecord::from_json(r#"{"patient": {}, "specimen": {}}"#).unwrap();
        assert!(record.results.is_empty());
        assert_eq!(record.ruleset_version, "0.1");
    }

    #[test]
    fn test_record_missing_patient_is_invalid() {
        let err = PgxRecord::from_json(r#"{"specimen": {}}"#).unwrap_err();
        assert!(matches!(
            err,
            PgxFhirError::Validation(ValidationError::InvalidRecord(_))
        ));
    }

    #[test]
    fn test_record_non_object_section_is_invalid() {
        let err = PgxRecord::try_from(json!({"patient": "P1", "specimen": {}})).unwrap_err();
        assert!(matches!(err, PgxFhirError::Validation(_)));
    }

    #[test]
    fn test_typed_input_converts_to_record() {
        let record = PgxRecord::try_from(&typed_input()).unwrap();

        assert_eq!(record.patient.get("patient_id"), Some(&json!("P1")));
        assert_eq!(record.patient.get("birth_date"), Some(&json!("1991-10-09")));
        assert_eq!(record.patient.get("sex"), Some(&json!("female")));
        assert_eq!(record.specimen.get("specimen_type"), Some(&json!("saliva")));
        assert!(record.results[0].get("activity_score").is_none());
    }

    #[test]
    fn test_sex_defaults_to_unknown() {
        let patient: PatientRecord = serde_json::from_value(json!({
            "patient_id": "P1",
            "given_name": "Maria",
            "family_name": "Perez",
            "birth_date": "1991-10-09"
        }))
        .unwrap();
        assert_eq!(patient.sex, Sex::Unknown);
    }
}
