//! Pharmacogenomics Observation builder

use super::present;
use crate::core::clock::format_instant;
use crate::core::context::BuildContext;
use crate::domain::ResourceType;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

/// `category[0].text` used when the caller gives none
pub const DEFAULT_CATEGORY_TEXT: &str = "laboratory";

/// Fixed `code.text` of every PGx observation
pub const PGX_CODE_TEXT: &str = "Pharmacogenomics result";

/// Canonical fields of one PGx observation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationFields {
    pub id: String,
    pub patient_ref: String,
    pub specimen_ref: Option<String>,
    pub gene: String,
    pub diplotype: Option<String>,
    pub phenotype: Option<String>,
    /// Report time; the context clock is used when unset
    pub issued: Option<DateTime<Utc>>,
    pub category_text: String,
}

impl ObservationFields {
    pub fn new(
        id: impl Into<String>,
        patient_ref: impl Into<String>,
        gene: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            patient_ref: patient_ref.into(),
            specimen_ref: None,
            gene: gene.into(),
            diplotype: None,
            phenotype: None,
            issued: None,
            category_text: DEFAULT_CATEGORY_TEXT.to_string(),
        }
    }

    pub fn with_specimen_ref(mut self, specimen_ref: impl Into<String>) -> Self {
        self.specimen_ref = Some(specimen_ref.into());
        self
    }

    pub fn with_diplotype(mut self, diplotype: impl Into<String>) -> Self {
        self.diplotype = Some(diplotype.into());
        self
    }

    pub fn with_phenotype(mut self, phenotype: impl Into<String>) -> Self {
        self.phenotype = Some(phenotype.into());
        self
    }

    pub fn with_issued(mut self, issued: DateTime<Utc>) -> Self {
        self.issued = Some(issued);
        self
    }

    pub fn with_category_text(mut self, category_text: impl Into<String>) -> Self {
        self.category_text = category_text.into();
        self
    }
}

/// Builds a final, free-text PGx `Observation`
///
/// Components always start with `gene`; `diplotype` and `phenotype` follow
/// in that order when present. `effectiveDateTime` and `issued` carry the
/// same instant.
///
/// # Examples
///
/// ```
/// use pgx_fhir::core::builders::{build_observation_pgx, ObservationFields};
/// use pgx_fhir::core::context::BuildContext;
///
/// let obs = build_observation_pgx(
///     &ObservationFields::new("obs-1", "Patient/P1", "CYP2D6").with_phenotype("poor metabolizer"),
///     &BuildContext::system(),
/// );
/// assert_eq!(obs["component"].as_array().unwrap().len(), 2);
/// assert!(obs.get("specimen").is_none());
/// ```
pub fn build_observation_pgx(fields: &ObservationFields, ctx: &BuildContext<'_>) -> Value {
    let issued = format_instant(fields.issued.unwrap_or_else(|| ctx.now()));

    let mut components = vec![component("gene", &fields.gene)];
    if let Some(diplotype) = present(&fields.diplotype) {
        components.push(component("diplotype", diplotype));
    }
    if let Some(phenotype) = present(&fields.phenotype) {
        components.push(component("phenotype", phenotype));
    }

    let mut observation = json!({
        "resourceType": ResourceType::Observation.as_str(),
        "id": fields.id,
        "status": "final",
        "category": [{"text": fields.category_text}],
        "code": {"text": PGX_CODE_TEXT},
        "subject": {"reference": fields.patient_ref},
        "effectiveDateTime": issued,
        "issued": issued,
        "component": components,
    });

    if let Some(specimen_ref) = present(&fields.specimen_ref) {
        observation["specimen"] = json!({"reference": specimen_ref});
    }

    observation
}

fn component(label: &str, value: &str) -> Value {
    json!({"code": {"text": label}, "valueString": value})
}
