//! FHIR resource builders
//!
//! Each builder maps canonical, typed fields to one FHIR resource document
//! (`serde_json::Value`). Optional fields are appended only when present;
//! an empty string counts as absent, and nothing is ever emitted as `null`.
//! Builders never fail: non-empty ids and references are the caller's
//! responsibility.

pub mod observation;
pub mod patient;
pub mod specimen;

pub use observation::{
    build_observation_pgx, ObservationFields, DEFAULT_CATEGORY_TEXT, PGX_CODE_TEXT,
};
pub use patient::{build_patient, PatientFields};
pub use specimen::{build_specimen, SpecimenFields, DEFAULT_SPECIMEN_TYPE_TEXT};

/// Returns the text when it is present and non-empty
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
